//! Evolve command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::info;

use hubbard_chem::singlet_evolution;
use hubbard_ir::print_circuit;

use crate::config::{RunConfig, TransformKind};

/// Arguments of the evolve command. Flags override the configuration.
#[derive(Debug, Args)]
pub struct EvolveArgs {
    /// YAML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of spin-orbitals (qubits)
    #[arg(short, long)]
    pub qubits: Option<u32>,

    /// Number of electrons
    #[arg(short, long)]
    pub electrons: Option<u32>,

    /// Packed amplitudes, comma separated
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    pub amplitudes: Option<Vec<f64>>,

    /// Trotterization mode (suzuki, lie, trotter)
    #[arg(short, long)]
    pub trotter_mode: Option<String>,

    /// Number of Trotter slices
    #[arg(short, long)]
    pub reps: Option<usize>,

    /// Fermion-to-qubit mapping
    #[arg(long, value_enum)]
    pub transform: Option<TransformKind>,

    /// Print the synthesized circuit
    #[arg(long)]
    pub print: bool,
}

impl EvolveArgs {
    /// Layer the flags over `config`.
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(q) = self.qubits {
            config.qubits = q;
        }
        if let Some(e) = self.electrons {
            config.electrons = e;
        }
        if let Some(ref a) = self.amplitudes {
            config.amplitudes = Some(a.clone());
        }
        if let Some(ref m) = self.trotter_mode {
            config.trotter_mode.clone_from(m);
        }
        if let Some(r) = self.reps {
            config.reps = r;
        }
        if let Some(t) = self.transform {
            config.transform = t;
        }
        config
    }
}

/// Execute the evolve command.
pub fn execute(args: &EvolveArgs) -> Result<()> {
    let config = RunConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply(config);
    config.validate().context("Invalid run parameters")?;
    let amplitudes = config.resolved_amplitudes()?;

    println!(
        "{} Evolving {} electrons in {} spin-orbitals ({}, {} x{})",
        style("→").cyan().bold(),
        style(config.electrons).yellow(),
        style(config.qubits).yellow(),
        config.transform,
        config.trotter_mode,
        config.reps
    );
    info!(?config, "Resolved run configuration");

    let gate = singlet_evolution(
        &amplitudes,
        config.qubits,
        config.electrons,
        config.transform.transform(),
        &config.trotter_mode,
        config.reps,
    )
    .context("Failed to build the singlet evolution")?;

    let circuit = gate
        .definition()
        .context("Failed to synthesize the evolution circuit")?;

    println!("{} Evolution circuit ready", style("✓").green().bold());
    println!("  Amplitudes: {}", amplitudes.len());
    println!("  Pauli terms: {}", gate.operator().n_terms());
    println!(
        "  Result: {} qubits, depth {}, {} ops",
        circuit.num_qubits(),
        circuit.depth(),
        circuit.num_operations()
    );

    if args.print {
        println!();
        print_circuit(&circuit);
    }

    Ok(())
}
