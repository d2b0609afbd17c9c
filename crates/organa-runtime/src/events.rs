//! Events emitted by the simulation.

use organa_core::types::OrganismId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PopulationEvent {
    /// An organism cloned itself.
    Born { id: OrganismId, parent: OrganismId, generation: u32 },
    /// Two organisms became linked for the first time.
    Linked { a: OrganismId, b: OrganismId },
    /// Decoherence was reset by healing.
    Healed { id: OrganismId },
    /// A user observation nudged an organism toward order.
    Observed { id: OrganismId },
    /// An externally built organism joined the population.
    Inserted { id: OrganismId },
    /// An organism was dropped to respect the population cap.
    Evicted { id: OrganismId },
}
