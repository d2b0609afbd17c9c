//! Reproduction policies for population growth.
//!
//! After every step the simulation asks its policy whether some organism
//! should clone itself. `FitnessReproduction` picks the most efficient
//! organism and lets it reproduce on a coin flip when it is active and
//! clears the efficiency bar. Growth is always refused at the cap.

use crate::organism::Organism;
use organa_core::config::{ActivityThresholds, SimulationConfig};
use organa_core::random::RandomSource;

/// Parameters a policy needs to judge eligibility.
#[derive(Debug, Clone, Copy)]
pub struct ReproductionContext {
    pub population_cap: usize,
    pub thresholds: ActivityThresholds,
    pub min_efficiency: f64,
    pub probability: f64,
}

impl ReproductionContext {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            population_cap: config.population_cap,
            thresholds: config.thresholds(),
            min_efficiency: config.reproduction_efficiency,
            probability: config.reproduction_probability,
        }
    }
}

/// Trait for reproduction policies.
pub trait ReproductionPolicy: Send {
    /// Index of the organism that reproduces this step, or None.
    fn select(
        &mut self,
        organisms: &[Organism],
        ctx: &ReproductionContext,
        source: &mut dyn RandomSource,
    ) -> Option<usize>;
}

/// Index of the most efficient organism; the first one wins ties.
pub fn fittest_index(organisms: &[Organism]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, organism) in organisms.iter().enumerate() {
        let efficiency = organism.efficiency();
        match best {
            Some((_, top)) if efficiency <= top => {}
            _ => best = Some((idx, efficiency)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Fitness-based reproduction: the fittest organism clones itself.
#[derive(Debug, Default)]
pub struct FitnessReproduction {
    births: u64,
}

impl FitnessReproduction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Births this policy has approved.
    pub fn births(&self) -> u64 {
        self.births
    }
}

impl ReproductionPolicy for FitnessReproduction {
    fn select(
        &mut self,
        organisms: &[Organism],
        ctx: &ReproductionContext,
        source: &mut dyn RandomSource,
    ) -> Option<usize> {
        if organisms.len() >= ctx.population_cap {
            return None;
        }

        let idx = fittest_index(organisms)?;
        let parent = &organisms[idx];
        if !parent.is_active(&ctx.thresholds) || parent.efficiency() <= ctx.min_efficiency {
            return None;
        }

        // The coin is only drawn for an eligible parent
        if !source.chance(ctx.probability) {
            return None;
        }

        self.births += 1;
        Some(idx)
    }
}

/// No-reproduction policy: the population never grows on its own.
pub struct NoReproduction;

impl ReproductionPolicy for NoReproduction {
    fn select(
        &mut self,
        _organisms: &[Organism],
        _ctx: &ReproductionContext,
        _source: &mut dyn RandomSource,
    ) -> Option<usize> {
        None
    }
}
