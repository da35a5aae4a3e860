//! Hubbard Command-Line Interface
//!
//! Builds UCCSD singlet evolution circuits and synthesizes diagonal gates.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{diagonal, evolve, paramsize, version};

/// Hubbard - UCCSD evolution circuits and diagonal-gate synthesis
#[derive(Parser)]
#[command(name = "hubbard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv); HUBBARD_LOG is used when absent
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the amplitudes of a singlet UCCSD ansatz
    Paramsize {
        /// Number of spin-orbitals (qubits)
        #[arg(short, long)]
        qubits: u32,

        /// Number of electrons
        #[arg(short, long)]
        electrons: u32,
    },

    /// Build the singlet evolution circuit
    Evolve(evolve::EvolveArgs),

    /// Replace a general diagonal gate by a CX/Rz circuit
    Diagonal {
        /// Number of qubits the diagonal acts on
        #[arg(short, long)]
        qubits: u32,

        /// One angle per Z-string, comma separated (2^qubits values)
        #[arg(
            short,
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            required = true
        )]
        angles: Vec<f64>,

        /// Print the synthesized circuit
        #[arg(long)]
        print: bool,
    },

    /// Show version information
    Version,
}

fn log_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_env("HUBBARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Paramsize { qubits, electrons } => paramsize::execute(qubits, electrons),

        Commands::Evolve(args) => evolve::execute(&args),

        Commands::Diagonal {
            qubits,
            angles,
            print,
        } => diagonal::execute(qubits, &angles, print),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
