//! Paramsize command implementation.

use anyhow::{Context, Result};
use console::style;

use hubbard_chem::singlet_paramsize;

/// Execute the paramsize command.
pub fn execute(qubits: u32, electrons: u32) -> Result<()> {
    let n = singlet_paramsize(qubits, electrons)
        .with_context(|| format!("Cannot size {electrons} electrons in {qubits} spin-orbitals"))?;
    println!(
        "{} {} amplitudes for {} electrons in {} spin-orbitals",
        style("→").cyan().bold(),
        style(n).yellow(),
        electrons,
        qubits
    );
    Ok(())
}
