//! Thread-shareable simulation handle.
//!
//! A tick driver and a renderer usually live on different threads. Every
//! mutating call holds the lock for the whole operation, so steps and
//! observations never interleave. `snapshot()` only clones the published
//! `Arc`, so readers never hold the lock while they render.

use crate::simulation::{Simulation, StepOutcome};
use crate::snapshot::PopulationSnapshot;
use organa_agents::organism::Organism;
use organa_core::error::Result;
use organa_core::types::OrganismId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone)]
pub struct SharedSimulation {
    inner: Arc<Mutex<Simulation>>,
}

impl SharedSimulation {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            inner: Arc::new(Mutex::new(simulation)),
        }
    }

    // A poisoned lock still guards a whole snapshot.
    fn lock(&self) -> MutexGuard<'_, Simulation> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn step(&self, delta_seconds: f64, external_pressure: f64) -> StepOutcome {
        self.lock().step(delta_seconds, external_pressure)
    }

    pub fn observe(&self, id: OrganismId) -> Result<Arc<PopulationSnapshot>> {
        self.lock().observe(id)
    }

    pub fn heal(&self, id: OrganismId) -> Result<Arc<PopulationSnapshot>> {
        self.lock().heal(id)
    }

    pub fn insert(&self, organism: Organism) -> Result<OrganismId> {
        self.lock().insert(organism)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<PopulationSnapshot> {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the simulation.
    pub fn with<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }
}

impl From<Simulation> for SharedSimulation {
    fn from(simulation: Simulation) -> Self {
        Self::new(simulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use organa_core::config::SimulationConfig;

    #[test]
    fn snapshot_outlives_later_steps() {
        let shared = SharedSimulation::new(Simulation::new(SimulationConfig::default().with_seed(1)).unwrap());
        let held = shared.snapshot();
        shared.step(0.016, 0.0);
        assert_eq!(held.tick, 0);
        assert_eq!(shared.snapshot().tick, 1);
        assert_eq!(shared.with(|sim| sim.tick()), 1);
    }
}
