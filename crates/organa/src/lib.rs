//! # Organa
//!
//! A bounded population of simulated organisms, advanced once per frame.
//!
//! Every organism carries bounded coherence, integration and decoherence
//! metrics, a phase and an amplitude. Each step applies entropy, bounded
//! self-repair and external pressure, links organisms whose phases line up,
//! and occasionally lets the fittest organism clone itself. Aggregate
//! statistics are always computed from the same snapshot a renderer reads.
//!
//! ## Quick Start
//!
//! ```rust
//! use organa::prelude::*;
//!
//! let mut sim = Simulation::new(SimulationConfig::default().with_seed(42)).unwrap();
//!
//! for _ in 0..60 {
//!     sim.step(0.016, 0.0);
//! }
//!
//! let snapshot = sim.snapshot();
//! println!(
//!     "{} organisms, total efficiency {:.2}",
//!     snapshot.stats.population, snapshot.stats.total_efficiency
//! );
//!
//! let first = snapshot.organisms[0].id;
//! sim.observe(first).unwrap();
//! ```
//!
//! ## Architecture
//!
//! - [`organa_core`] - Ids, metric ranges, ring buffer, random source, config, errors
//! - [`organa_agents`] - The organism record, inheritance, reproduction policies
//! - [`organa_runtime`] - The `Simulation` state owner, stats, events, export
//!
//! ## Key Concepts
//!
//! | Term | Meaning |
//! |------|---------|
//! | Efficiency | `coherence * integration / max(decoherence_rate, 1e-3)`, derived on read |
//! | Active | coherence and integration both at or above their thresholds |
//! | Coupling | organisms with close phases link and blend coherence |
//! | Snapshot | immutable population plus the stats computed from it |

// Re-export all subcrates
pub use organa_core as core;
pub use organa_agents as agents;
pub use organa_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use organa::prelude::*;
/// ```
pub mod prelude {
    pub use organa_runtime::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
