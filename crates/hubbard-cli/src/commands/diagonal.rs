//! Diagonal command implementation.

use anyhow::{Context, Result};
use console::style;

use hubbard_compile::{
    CircuitUnitary, CostFunction, DiagonalCost, hilbert_schmidt_distance, replace_pauliz,
};
use hubbard_ir::{Circuit, QubitId, print_circuit};

/// Execute the diagonal command.
pub fn execute(qubits: u32, angles: &[f64], print: bool) -> Result<()> {
    println!(
        "{} Synthesizing a {}-qubit diagonal from {} angles",
        style("→").cyan().bold(),
        style(qubits).yellow(),
        angles.len()
    );

    let register: Vec<QubitId> = (0..qubits).map(QubitId).collect();
    let mut original = Circuit::with_size("diagonal", qubits, 0);
    original
        .pauli_z(angles.iter().copied(), &register)
        .context("Invalid diagonal gate")?;

    let rebuilt = replace_pauliz(&original).context("Diagonal synthesis failed")?;

    let target = original.get_unitary(&[])?;
    let cost = DiagonalCost::new(&rebuilt, &target).get_cost(&[])?;
    let distance = hilbert_schmidt_distance(&target, &rebuilt.get_unitary(&[])?)?;

    println!("{} Synthesis complete", style("✓").green().bold());
    println!(
        "  Result: depth {}, {} ops",
        rebuilt.depth(),
        rebuilt.num_operations()
    );
    println!("  Diagonal cost: {cost:.3e}");
    println!("  Hilbert-Schmidt distance: {distance:.3e}");

    if print {
        println!();
        print_circuit(&rebuilt);
    }

    Ok(())
}
