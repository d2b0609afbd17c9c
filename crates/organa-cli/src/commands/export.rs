//! Drive the simulation, then export the final frame.

use anyhow::{Context, Result};
use colored::Colorize;
use organa::prelude::*;

use super::{drive, DriverArgs};
use crate::config::Config;

pub fn run(output: &str, args: &DriverArgs) -> Result<()> {
    let (config, driver) = args.resolve(Config::load()?);
    let mut sim = Simulation::new(config).context("Failed to create simulation")?;

    println!(
        "{} Running {} ticks...",
        "→".blue(),
        driver.ticks.to_string().cyan()
    );
    drive(&mut sim, &driver, false)?;

    let snapshot = sim.snapshot();
    write_json(&snapshot, output).with_context(|| format!("Failed to export to {}", output))?;

    println!();
    println!("{} Exported to {}", "✓".green().bold(), output.cyan());
    println!("  Organisms: {}", snapshot.len().to_string().cyan());
    println!("  Links:     {}", export_links(&snapshot).len().to_string().cyan());

    Ok(())
}
