//! Drive the simulation and print a readout.

use anyhow::{Context, Result};
use colored::Colorize;
use organa::prelude::*;
use tracing::warn;

use super::{drive, DriverArgs};
use crate::config::Config;

pub fn run(args: &DriverArgs, verbose: bool) -> Result<()> {
    let (config, driver) = args.resolve(Config::load()?);
    let cap = config.population_cap;
    let mut sim = Simulation::new(config).context("Failed to create simulation")?;

    let initial = sim.stats().clone();
    println!(
        "{} Running {} ticks (dt {}s, pressure {})...",
        "→".blue(),
        driver.ticks.to_string().cyan(),
        driver.delta_seconds,
        driver.pressure
    );

    let events = drive(&mut sim, &driver, verbose)?;

    let snapshot = sim.snapshot();
    let violations = snapshot.violations(cap);
    for problem in &violations {
        warn!(%problem, "invariant violated");
    }

    let births = events
        .iter()
        .filter(|(_, e)| matches!(e, PopulationEvent::Born { .. }))
        .count();
    let links = events
        .iter()
        .filter(|(_, e)| matches!(e, PopulationEvent::Linked { .. }))
        .count();

    let stats = &snapshot.stats;
    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!(
        "  Population:       {} → {} (cap {})",
        initial.population.to_string().yellow(),
        stats.population.to_string().green(),
        cap
    );
    println!(
        "  Total efficiency: {} → {}",
        format!("{:.2}", initial.total_efficiency).yellow(),
        format!("{:.2}", stats.total_efficiency).green()
    );
    println!(
        "  Efficiency:       mean {:.2}, min {:.2}, max {:.2}, std {:.2}",
        stats.mean_efficiency, stats.min_efficiency, stats.max_efficiency, stats.efficiency_std
    );
    println!(
        "  Active:           {}/{}",
        stats.active_count.to_string().cyan(),
        stats.population
    );
    println!(
        "  Generations:      {}",
        stats.max_generation.to_string().cyan()
    );
    println!(
        "  Links:            {} ({} formed, {} births)",
        stats.link_count.to_string().cyan(),
        links,
        births
    );

    if !violations.is_empty() {
        println!(
            "  {} {} invariant violations",
            "!".red().bold(),
            violations.len()
        );
    }

    if verbose {
        println!();
        for organism in &snapshot.organisms {
            let lifecycle = match organism.lifecycle(&snapshot.thresholds) {
                Lifecycle::Active => "active".green(),
                Lifecycle::Emerging => "emerging".yellow(),
            };
            println!(
                "  {} gen {} c={:.3} i={:.3} d={:.4} eff={:.2} {}",
                organism.id,
                organism.generation,
                organism.coherence,
                organism.integration,
                organism.decoherence_rate,
                organism.efficiency(),
                lifecycle
            );
        }
    }

    Ok(())
}
