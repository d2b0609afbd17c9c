//! CLI command implementations.

pub mod init;
pub mod run;
pub mod export;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use organa::prelude::*;

use crate::config::{Config, DriverConfig};

/// Driver overrides shared by `run` and `export`. Unset flags fall back to
/// the `[driver]` table of organa.toml.
#[derive(Args, Debug, Clone, Default)]
pub struct DriverArgs {
    /// Number of ticks to run
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Seconds per tick
    #[arg(long)]
    pub dt: Option<f64>,

    /// External pressure on integration
    #[arg(short, long)]
    pub pressure: Option<f64>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Observe the weakest organism every N ticks
    #[arg(long)]
    pub observe_every: Option<u64>,
}

impl DriverArgs {
    /// Merge flags over the loaded config.
    pub fn resolve(&self, mut config: Config) -> (SimulationConfig, DriverConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        let mut driver = config.driver;
        if let Some(ticks) = self.ticks {
            driver.ticks = ticks;
        }
        if let Some(dt) = self.dt {
            driver.delta_seconds = dt;
        }
        if let Some(pressure) = self.pressure {
            driver.pressure = pressure;
        }
        if let Some(every) = self.observe_every {
            driver.observe_every = every;
        }
        (config.simulation, driver)
    }
}

/// Run the tick loop behind a progress bar, returning every event produced.
pub fn drive(
    sim: &mut Simulation,
    driver: &DriverConfig,
    verbose: bool,
) -> Result<Vec<(Tick, PopulationEvent)>> {
    let pb = ProgressBar::new(driver.ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let mut events = Vec::new();
    for _ in 0..driver.ticks {
        let outcome = sim.step(driver.delta_seconds, driver.pressure);
        let tick = outcome.snapshot.tick;

        if verbose {
            for event in &outcome.events {
                pb.println(format!("  tick {}: {:?}", tick, event));
            }
        }
        events.extend(outcome.events.into_iter().map(|e| (tick, e)));

        if driver.observe_every > 0 && tick % driver.observe_every == 0 {
            if let Some(id) = weakest(&outcome.snapshot) {
                sim.observe(id)
                    .with_context(|| format!("Failed to observe {}", id))?;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(events)
}

fn weakest(snapshot: &PopulationSnapshot) -> Option<OrganismId> {
    snapshot
        .organisms
        .iter()
        .min_by(|a, b| a.efficiency().total_cmp(&b.efficiency()))
        .map(|o| o.id)
}
