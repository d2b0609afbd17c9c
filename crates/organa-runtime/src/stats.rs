//! Aggregate statistics over one population snapshot.
//!
//! Stats are always computed from the exact organism list they are
//! published with, in population order, so `total_efficiency` equals the
//! sum a reader gets by iterating the same snapshot.

use organa_agents::organism::Organism;
use organa_core::config::ActivityThresholds;
use organa_core::types::Tick;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationStats {
    pub tick: Tick,
    /// Simulated seconds.
    pub time: f64,
    pub population: usize,
    pub total_efficiency: f64,
    pub mean_efficiency: f64,
    pub max_efficiency: f64,
    pub min_efficiency: f64,
    /// Population standard deviation of efficiency.
    pub efficiency_std: f64,
    pub avg_coherence: f64,
    pub avg_integration: f64,
    pub avg_decoherence_rate: f64,
    pub active_count: usize,
    pub max_generation: u32,
    /// Unordered linked pairs.
    pub link_count: usize,
}

impl PopulationStats {
    pub fn compute(
        organisms: &[Organism],
        thresholds: &ActivityThresholds,
        tick: Tick,
        time: f64,
    ) -> Self {
        let population = organisms.len();
        if population == 0 {
            return Self::empty(tick, time);
        }

        let efficiencies: Vec<f64> = organisms.iter().map(Organism::efficiency).collect();
        let total_efficiency: f64 = efficiencies.iter().sum();
        let n = population as f64;
        let mean_efficiency = total_efficiency / n;

        let variance = efficiencies
            .iter()
            .map(|e| (e - mean_efficiency).powi(2))
            .sum::<f64>()
            / n;

        let max_efficiency = efficiencies.iter().copied().fold(f64::MIN, f64::max);
        let min_efficiency = efficiencies.iter().copied().fold(f64::MAX, f64::min);

        let mut coherence = 0.0;
        let mut integration = 0.0;
        let mut decoherence = 0.0;
        let mut active_count = 0;
        let mut max_generation = 0;
        let mut link_ends = 0;

        for organism in organisms {
            coherence += organism.coherence;
            integration += organism.integration;
            decoherence += organism.decoherence_rate;
            if organism.is_active(thresholds) {
                active_count += 1;
            }
            max_generation = max_generation.max(organism.generation);
            link_ends += organism.relations.len();
        }

        Self {
            tick,
            time,
            population,
            total_efficiency,
            mean_efficiency,
            max_efficiency,
            min_efficiency,
            efficiency_std: variance.sqrt(),
            avg_coherence: coherence / n,
            avg_integration: integration / n,
            avg_decoherence_rate: decoherence / n,
            active_count,
            max_generation,
            link_count: link_ends / 2,
        }
    }

    fn empty(tick: Tick, time: f64) -> Self {
        Self {
            tick,
            time,
            population: 0,
            total_efficiency: 0.0,
            mean_efficiency: 0.0,
            max_efficiency: 0.0,
            min_efficiency: 0.0,
            efficiency_std: 0.0,
            avg_coherence: 0.0,
            avg_integration: 0.0,
            avg_decoherence_rate: 0.0,
            active_count: 0,
            max_generation: 0,
            link_count: 0,
        }
    }
}
