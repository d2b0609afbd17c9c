//! Organa Runtime Prelude - convenient imports for common usage.
//!
//! ```rust
//! use organa_runtime::prelude::*;
//! ```

// Re-export the state owner
pub use crate::simulation::{Simulation, StepOutcome, MAX_PRESSURE, sanitize_delta, sanitize_pressure};
pub use crate::handle::SharedSimulation;

// Re-export published data
pub use crate::snapshot::PopulationSnapshot;
pub use crate::stats::PopulationStats;
pub use crate::events::PopulationEvent;

// Re-export export helpers
pub use crate::export::{LinkEdge, OrganismView, RenderFrame, export_links, to_json, write_json};

// Re-export from agents
pub use organa_agents::prelude::*;
