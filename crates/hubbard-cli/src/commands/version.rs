//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - UCCSD evolution circuits and diagonal-gate synthesis",
        style("Hubbard").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hubbard-ir       Circuit intermediate representation");
    println!("  hubbard-sim      Pauli operators and Trotterized evolution");
    println!("  hubbard-chem     UCCSD generators and fermion-to-qubit mappings");
    println!("  hubbard-compile  Unitaries, passes and diagonal synthesis");
    println!("  hubbard-cli      Command-line interface");
}
