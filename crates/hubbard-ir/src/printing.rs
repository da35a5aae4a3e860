//! Plain-text circuit listing.

use std::io::{self, Write};

use crate::circuit::Circuit;
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;

/// Render one operation.
///
/// Operations without parameters print as their `Display` form. Otherwise
/// the parameter values follow in brackets; a parameter that cannot be
/// reduced to a number prints as its expression.
pub fn format_operation(op: &Instruction) -> String {
    let params = op.params();
    if params.is_empty() {
        return op.to_string();
    }
    let values: Vec<String> = params.into_iter().map(format_param).collect();
    format!("{op} [{}]", values.join(", "))
}

fn format_param(p: &ParameterExpression) -> String {
    match p.as_f64() {
        Some(v) => format!("{v:?}"),
        None => p.to_string(),
    }
}

/// One line per operation, in circuit order.
pub fn format_circuit(circuit: &Circuit) -> Vec<String> {
    circuit.operations().map(format_operation).collect()
}

/// Write the listing of `circuit` to `out`, one operation per line.
pub fn write_circuit<W: Write>(circuit: &Circuit, out: &mut W) -> io::Result<()> {
    for line in format_circuit(circuit) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print every operation of `circuit` to stdout.
///
/// Stops quietly if stdout is closed, e.g. when piped into `head`.
pub fn print_circuit(circuit: &Circuit) {
    let mut out = io::stdout().lock();
    if write_circuit(circuit, &mut out).is_err() {
        return;
    }
    let _ = out.flush();
}
