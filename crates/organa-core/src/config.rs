//! Simulation configuration.
//!
//! Every tunable constant of the population loop lives here. All fields
//! carry serde defaults, so a partial TOML table only overrides what it
//! names. Use `validate()` before handing a deserialized config to the
//! runtime.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Pair of thresholds that makes an organism count as active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityThresholds {
    pub coherence: f64,
    pub integration: f64,
}

/// What `insert` does when the population is already at its cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPolicy {
    /// Reject the new organism.
    #[default]
    Refuse,
    /// Drop the lowest-efficiency organism to make room.
    EvictWeakest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hard upper bound on population size (default: 12).
    pub population_cap: usize,
    /// Size of the seed set created by `Simulation::seeded` (default: 3).
    pub initial_population: usize,
    /// Samples kept per organism (default: 100).
    pub history_capacity: usize,
    /// Published statistics kept by the simulation (default: 240).
    pub stats_history_capacity: usize,
    /// Upper clamp for the step delta in seconds (default: 0.05).
    pub max_delta_seconds: f64,
    /// Minimum coherence of an active organism (default: 0.70).
    pub coherence_threshold: f64,
    /// Minimum integration of an active organism (default: 0.75).
    pub integration_threshold: f64,
    /// Decoherence growth per second (default: 0.01).
    pub entropy_rate: f64,
    /// Decoherence reduction per second while active (default: 0.05).
    pub repair_rate: f64,
    /// Fraction of the gap to 1 restored per second while active (default: 0.1).
    pub restore_rate: f64,
    /// Phase advance in radians per second (default: 51.843 degrees).
    pub phase_velocity: f64,
    /// Phase distance below which two organisms link (default: 0.3 rad).
    pub coupling_threshold: f64,
    /// Coherence blend per second between linked organisms (default: 2.0).
    pub coupling_rate: f64,
    /// Cap on the per-step coherence blend (default: 0.1).
    pub coupling_max_blend: f64,
    /// Efficiency a parent must exceed to reproduce (default: 25.0).
    pub reproduction_efficiency: f64,
    /// Coin flip probability for an eligible parent (default: 0.02).
    pub reproduction_probability: f64,
    /// Half-width of offspring perturbation (default: 0.05).
    pub mutation_spread: f64,
    /// Fraction of the gap to 1 closed by one observation (default: 0.05).
    pub observe_gain: f64,
    /// Decoherence at which healing applies (default: 0.3).
    pub healing_threshold: f64,
    /// Heal automatically during `step` (default: false).
    pub auto_heal: bool,
    /// Behaviour of `insert` at the cap (default: refuse).
    pub cap_policy: CapPolicy,
    /// Seed for the default random source; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_cap: 12,
            initial_population: 3,
            history_capacity: 100,
            stats_history_capacity: 240,
            max_delta_seconds: 0.05,
            coherence_threshold: 0.70,
            integration_threshold: 0.75,
            entropy_rate: 0.01,
            repair_rate: 0.05,
            restore_rate: 0.1,
            phase_velocity: 51.843_f64.to_radians(),
            coupling_threshold: 0.3,
            coupling_rate: 2.0,
            coupling_max_blend: 0.1,
            reproduction_efficiency: 25.0,
            reproduction_probability: 0.02,
            mutation_spread: 0.05,
            observe_gain: 0.05,
            healing_threshold: 0.3,
            auto_heal: false,
            cap_policy: CapPolicy::Refuse,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn thresholds(&self) -> ActivityThresholds {
        ActivityThresholds {
            coherence: self.coherence_threshold,
            integration: self.integration_threshold,
        }
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every field against its admissible range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_cap == 0 {
            return Err(ConfigError::invalid_value(
                "population_cap",
                0,
                "population must allow at least one organism",
            ));
        }
        if self.initial_population > self.population_cap {
            return Err(ConfigError::invalid_value(
                "initial_population",
                self.initial_population,
                format!("exceeds population_cap {}", self.population_cap),
            ));
        }
        if !(self.max_delta_seconds.is_finite() && self.max_delta_seconds > 0.0) {
            return Err(ConfigError::invalid_value(
                "max_delta_seconds",
                self.max_delta_seconds,
                "must be a positive number of seconds",
            ));
        }

        let unit = [
            ("coherence_threshold", self.coherence_threshold),
            ("integration_threshold", self.integration_threshold),
            ("reproduction_probability", self.reproduction_probability),
            ("observe_gain", self.observe_gain),
            ("mutation_spread", self.mutation_spread),
        ];
        for (field, value) in unit {
            check_range(field, value, 0.0, 1.0)?;
        }

        check_range("coupling_max_blend", self.coupling_max_blend, 0.0, 0.5)?;
        check_range("coupling_threshold", self.coupling_threshold, 0.0, std::f64::consts::PI)?;
        check_range("healing_threshold", self.healing_threshold, 0.0, 1.0)?;

        let rates = [
            ("entropy_rate", self.entropy_rate),
            ("repair_rate", self.repair_rate),
            ("restore_rate", self.restore_rate),
            ("phase_velocity", self.phase_velocity),
            ("coupling_rate", self.coupling_rate),
            ("reproduction_efficiency", self.reproduction_efficiency),
        ];
        for (field, value) in rates {
            check_range(field, value, 0.0, f64::MAX)?;
        }

        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(field, min, max, value))
    }
}
