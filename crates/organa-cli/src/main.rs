//! Organa CLI - headless tick driver for the population loop.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "organa")]
#[command(author, version, about = "Organa - bounded organism population loop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default organa.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Drive the simulation and print a readout
    Run {
        #[command(flatten)]
        driver: commands::DriverArgs,
    },

    /// Drive the simulation, then write the final frame as JSON
    Export {
        /// Output file path
        output: String,

        #[command(flatten)]
        driver: commands::DriverArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { driver } => commands::run::run(&driver, cli.verbose),
        Commands::Export { output, driver } => commands::export::run(&output, &driver),
    }
}
