//! Immutable population snapshots.
//!
//! A snapshot is built once, wrapped in an `Arc` and never mutated again.
//! The statistics it carries were computed from its own organism list.

use crate::stats::PopulationStats;
use organa_agents::organism::Organism;
use organa_core::config::ActivityThresholds;
use organa_core::types::*;
use serde::Serialize;
use std::collections::HashSet;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Serialize)]
pub struct PopulationSnapshot {
    pub tick: Tick,
    /// Simulated seconds.
    pub time: f64,
    pub thresholds: ActivityThresholds,
    pub organisms: Vec<Organism>,
    pub stats: PopulationStats,
}

impl PopulationSnapshot {
    pub fn new(
        organisms: Vec<Organism>,
        thresholds: ActivityThresholds,
        tick: Tick,
        time: f64,
    ) -> Self {
        let stats = PopulationStats::compute(&organisms, &thresholds, tick, time);
        Self {
            tick,
            time,
            thresholds,
            organisms,
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.organisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organisms.is_empty()
    }

    pub fn get(&self, id: &OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == *id)
    }

    /// Every linked unordered pair, smaller id first.
    pub fn links(&self) -> Vec<(OrganismId, OrganismId)> {
        let mut pairs = Vec::new();
        for organism in &self.organisms {
            for other in &organism.relations {
                if organism.id < *other {
                    pairs.push((organism.id, *other));
                }
            }
        }
        pairs
    }

    /// Describe every broken invariant. Empty means the snapshot is sound.
    ///
    /// Checks bounded scalars, history capacity, link symmetry, dangling
    /// links, duplicate ids and the population cap.
    pub fn violations(&self, population_cap: usize) -> Vec<String> {
        let mut problems = Vec::new();

        if self.organisms.len() > population_cap {
            problems.push(format!(
                "population {} exceeds cap {}",
                self.organisms.len(),
                population_cap
            ));
        }

        let ids: HashSet<OrganismId> = self.organisms.iter().map(|o| o.id).collect();
        if ids.len() != self.organisms.len() {
            problems.push("duplicate organism ids".to_string());
        }

        for o in &self.organisms {
            let bounded = [
                ("coherence", o.coherence, COHERENCE_RANGE),
                ("integration", o.integration, INTEGRATION_RANGE),
                ("decoherence_rate", o.decoherence_rate, DECOHERENCE_RANGE),
                ("amplitude", o.amplitude, AMPLITUDE_RANGE),
            ];
            for (name, value, range) in bounded {
                if !range.contains(value) {
                    problems.push(format!("{} {} = {} outside [{}, {}]", o.id, name, value, range.min, range.max));
                }
            }
            if !(o.phase >= 0.0 && o.phase < TAU) {
                problems.push(format!("{} phase {} not wrapped", o.id, o.phase));
            }
            if o.history.len() > o.history.capacity() {
                problems.push(format!("{} history overflow", o.id));
            }
            for other in &o.relations {
                if *other == o.id {
                    problems.push(format!("{} linked to itself", o.id));
                    continue;
                }
                match self.get(other) {
                    None => problems.push(format!("{} linked to missing {}", o.id, other)),
                    Some(peer) if !peer.is_linked_to(&o.id) => {
                        problems.push(format!("link {} -> {} is not symmetric", o.id, other))
                    }
                    Some(_) => {}
                }
            }
        }

        problems
    }
}
