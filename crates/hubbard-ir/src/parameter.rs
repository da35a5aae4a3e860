//! Parameter expressions for parameterized circuits.
//!
//! Gate angles are small expression trees over named symbols. Cost
//! functions evaluate them under a [`ParameterBindings`] map and need their
//! partial derivatives, so both [`ParameterExpression::evaluate`] and
//! [`ParameterExpression::derivative`] are provided.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Symbol name to value map used when evaluating expressions.
pub type ParameterBindings = FxHashMap<String, f64>;

/// A symbolic or concrete parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A symbolic parameter.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Division.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Try to evaluate as a concrete f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        self.evaluate(&ParameterBindings::default())
    }

    /// Evaluate the expression with symbols looked up in `bindings`.
    ///
    /// Returns `None` if a symbol is missing or a divisor evaluates to zero.
    pub fn evaluate(&self, bindings: &ParameterBindings) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(name) => bindings.get(name).copied(),
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Neg(e) => e.evaluate(bindings).map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.evaluate(bindings)? + b.evaluate(bindings)?),
            ParameterExpression::Sub(a, b) => Some(a.evaluate(bindings)? - b.evaluate(bindings)?),
            ParameterExpression::Mul(a, b) => Some(a.evaluate(bindings)? * b.evaluate(bindings)?),
            ParameterExpression::Div(a, b) => {
                let divisor = b.evaluate(bindings)?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.evaluate(bindings)? / divisor)
            }
        }
    }

    /// Partial derivative with respect to `name`, evaluated at `bindings`.
    ///
    /// Returns `None` under the same conditions as [`Self::evaluate`].
    pub fn derivative(&self, name: &str, bindings: &ParameterBindings) -> Option<f64> {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => Some(0.0),
            ParameterExpression::Symbol(n) => Some(if n == name { 1.0 } else { 0.0 }),
            ParameterExpression::Neg(e) => e.derivative(name, bindings).map(|d| -d),
            ParameterExpression::Add(a, b) => {
                Some(a.derivative(name, bindings)? + b.derivative(name, bindings)?)
            }
            ParameterExpression::Sub(a, b) => {
                Some(a.derivative(name, bindings)? - b.derivative(name, bindings)?)
            }
            ParameterExpression::Mul(a, b) => {
                let (av, bv) = (a.evaluate(bindings)?, b.evaluate(bindings)?);
                let (da, db) = (a.derivative(name, bindings)?, b.derivative(name, bindings)?);
                Some(da * bv + av * db)
            }
            ParameterExpression::Div(a, b) => {
                let (av, bv) = (a.evaluate(bindings)?, b.evaluate(bindings)?);
                if bv == 0.0 {
                    return None;
                }
                let (da, db) = (a.derivative(name, bindings)?, b.derivative(name, bindings)?);
                Some((da * bv - av * db) / (bv * bv))
            }
        }
    }

    /// Symbol names in this expression, in first-appearance order, without
    /// duplicates.
    pub fn symbols(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_symbols(&mut names);
        names
    }

    fn collect_symbols(&self, names: &mut Vec<String>) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Symbol(name) => {
                if !names.iter().any(|n| n == name) {
                    names.push(name.clone());
                }
            }
            ParameterExpression::Neg(e) => e.collect_symbols(names),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => {
                a.collect_symbols(names);
                b.collect_symbols(names);
            }
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => write!(f, "{name}"),
            ParameterExpression::Pi => write!(f, "π"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Sub(a, b) => write!(f, "({a} - {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
            ParameterExpression::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<&str> for ParameterExpression {
    fn from(name: &str) -> Self {
        ParameterExpression::Symbol(name.to_string())
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParameterExpression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        ParameterExpression::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bindings(pairs: &[(&str, f64)]) -> ParameterBindings {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_constant_and_pi() {
        assert_eq!(ParameterExpression::constant(1.5).as_f64(), Some(1.5));
        assert_eq!(ParameterExpression::pi().as_f64(), Some(PI));
        assert!(!ParameterExpression::pi().is_symbolic());
    }

    #[test]
    fn test_symbol_requires_binding() {
        let p = ParameterExpression::symbol("theta");
        assert!(p.is_symbolic());
        assert_eq!(p.as_f64(), None);
        assert_eq!(p.evaluate(&bindings(&[("theta", 0.25)])), Some(0.25));
    }

    #[test]
    fn test_symbols_first_appearance_order() {
        let e = ParameterExpression::symbol("b") * ParameterExpression::symbol("a")
            + ParameterExpression::symbol("b");
        assert_eq!(e.symbols(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_derivative_product_and_quotient() {
        let x = ParameterExpression::symbol("x");
        let y = ParameterExpression::symbol("y");
        let b = bindings(&[("x", 2.0), ("y", 4.0)]);

        let prod = x.clone() * y.clone();
        assert_eq!(prod.derivative("x", &b), Some(4.0));
        assert_eq!(prod.derivative("y", &b), Some(2.0));

        let quot = x / y;
        assert!((quot.derivative("x", &b).unwrap() - 0.25).abs() < 1e-12);
        assert!((quot.derivative("y", &b).unwrap() + 2.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_none() {
        let e = ParameterExpression::constant(1.0) / ParameterExpression::symbol("d");
        assert_eq!(e.evaluate(&bindings(&[("d", 0.0)])), None);
    }

    proptest! {
        #[test]
        fn derivative_matches_finite_difference(x in -3.0f64..3.0, c in -2.0f64..2.0) {
            // f(x) = (c * x - x) * pi
            let sym = ParameterExpression::symbol("x");
            let f = (ParameterExpression::constant(c) * sym.clone() - sym) * ParameterExpression::pi();
            let h = 1e-6;
            let fp = f.evaluate(&bindings(&[("x", x + h)])).unwrap();
            let fm = f.evaluate(&bindings(&[("x", x - h)])).unwrap();
            let fd = (fp - fm) / (2.0 * h);
            let exact = f.derivative("x", &bindings(&[("x", x)])).unwrap();
            prop_assert!((fd - exact).abs() < 1e-6);
        }
    }
}
