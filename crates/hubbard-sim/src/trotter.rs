//! Trotter-Suzuki product formulas.
//!
//! A product formula approximates `exp(-i H t)` for `H = Σ_k c_k P_k` by a
//! sequence of exact single-term evolutions. [`EvolutionSynthesis::schedule`]
//! returns that sequence as `(term index, duration)` pairs; the circuit is
//! built from it by [`crate::evolution::PauliEvolutionGate::definition`].
//!
//! # Lie-Trotter
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/r)]^r
//!
//! # Suzuki-Trotter
//!
//! Order 2 is the symmetric splitting with the last term merged:
//!
//!   S₂(τ) = ∏_{k<m} e^{-i c_k P_k τ/2} · e^{-i c_m P_m τ} · ∏_{k<m, reversed} e^{-i c_k P_k τ/2}
//!
//! Higher even orders recurse with `u = 1 / (4 − 4^{1/(2k−1)})`:
//!
//!   S_{2k}(τ) = S_{2k−2}(uτ)² · S_{2k−2}((1−4u)τ) · S_{2k−2}(uτ)²

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Product-formula strategy used to synthesize an evolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EvolutionSynthesis {
    /// First-order formula, repeated `reps` times.
    LieTrotter {
        /// Number of time slices.
        reps: usize,
    },
    /// Suzuki formula of the given order, repeated `reps` times.
    SuzukiTrotter {
        /// Formula order: 1 or a positive even number.
        order: u32,
        /// Number of time slices.
        reps: usize,
    },
}

impl EvolutionSynthesis {
    /// Lie-Trotter with `reps` slices.
    pub fn lie_trotter(reps: usize) -> Self {
        EvolutionSynthesis::LieTrotter { reps }
    }

    /// Second-order Suzuki-Trotter with `reps` slices.
    pub fn suzuki_trotter(reps: usize) -> Self {
        EvolutionSynthesis::SuzukiTrotter { order: 2, reps }
    }

    /// Change the Suzuki order. Lie-Trotter is returned unchanged.
    #[must_use]
    pub fn with_order(self, order: u32) -> Self {
        match self {
            EvolutionSynthesis::SuzukiTrotter { reps, .. } => {
                EvolutionSynthesis::SuzukiTrotter { order, reps }
            }
            lie => lie,
        }
    }

    /// Number of time slices.
    pub fn reps(&self) -> usize {
        match self {
            EvolutionSynthesis::LieTrotter { reps }
            | EvolutionSynthesis::SuzukiTrotter { reps, .. } => *reps,
        }
    }

    /// Check `reps ≥ 1` and that the order is 1 or even.
    pub fn validate(&self) -> SimResult<()> {
        let reps = self.reps();
        if reps == 0 {
            return Err(SimError::InvalidSteps(reps));
        }
        if let EvolutionSynthesis::SuzukiTrotter { order, .. } = *self {
            if order == 0 || (order > 1 && order % 2 == 1) {
                return Err(SimError::InvalidOrder(order));
            }
        }
        Ok(())
    }

    /// The `(term index, duration)` sequence for evolving `n_terms` terms
    /// for total time `time`.
    ///
    /// Slices are concatenated without merging the boundary terms of
    /// neighbouring slices.
    #[allow(clippy::cast_precision_loss)]
    pub fn schedule(&self, n_terms: usize, time: f64) -> SimResult<Vec<(usize, f64)>> {
        self.validate()?;
        let reps = self.reps();
        let slice_t = time / reps as f64;
        let terms: Vec<usize> = (0..n_terms).collect();

        let slice = match *self {
            EvolutionSynthesis::LieTrotter { .. } => first_order(&terms, slice_t),
            EvolutionSynthesis::SuzukiTrotter { order, .. } => suzuki(order, &terms, slice_t),
        };

        let mut out = Vec::with_capacity(slice.len() * reps);
        for _ in 0..reps {
            out.extend_from_slice(&slice);
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn first_order(terms: &[usize], t: f64) -> Vec<(usize, f64)> {
    terms.iter().map(|&k| (k, t)).collect()
}

fn suzuki(order: u32, terms: &[usize], t: f64) -> Vec<(usize, f64)> {
    match order {
        1 => first_order(terms, t),
        2 => {
            let Some((&last, rest)) = terms.split_last() else {
                return Vec::new();
            };
            let halves: Vec<(usize, f64)> = rest.iter().map(|&k| (k, t / 2.0)).collect();
            let mut out = halves.clone();
            out.push((last, t));
            out.extend(halves.into_iter().rev());
            out
        }
        _ => {
            let u = 1.0 / (4.0 - 4f64.powf(1.0 / f64::from(order - 1)));
            let outer = suzuki(order - 2, terms, u * t);
            let inner = suzuki(order - 2, terms, (1.0 - 4.0 * u) * t);
            let mut out = Vec::with_capacity(4 * outer.len() + inner.len());
            out.extend_from_slice(&outer);
            out.extend_from_slice(&outer);
            out.extend(inner);
            out.extend_from_slice(&outer);
            out.extend_from_slice(&outer);
            out
        }
    }
}
