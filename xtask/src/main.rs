// Desktop/tooling crate - unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;
mod sim;
mod step;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Orbit Panel development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the workspace: no_std core crates, emulator build, clippy, fmt
    Check,
    /// Run all tests (unit, integration, emulator-only, doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build and optionally open documentation
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
    },
    /// Run the headless panel emulator against the simulated printer
    Sim {
        /// How long to run, in seconds
        #[arg(long, default_value_t = 40)]
        seconds: u64,
        /// Save a PNG of every screen change into this directory
        #[arg(long)]
        shots: Option<std::path::PathBuf>,
        /// Panel configuration (JSON); validated before launch
        #[arg(long)]
        config: Option<std::path::PathBuf>,
        /// Report the printer offline on every n-th poll
        #[arg(long)]
        dropout: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open } => doc::run(open),
        Commands::Sim {
            seconds,
            shots,
            config,
            dropout,
        } => sim::run(&sim::SimOptions {
            seconds,
            shots,
            config,
            dropout,
        }),
    }
}
