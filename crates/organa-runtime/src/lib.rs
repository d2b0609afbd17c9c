//! # Organa Runtime
//!
//! The population loop and its state owner.
//!
//! `Simulation` owns the current population snapshot and replaces it
//! wholesale on every operation: `step` reads the whole previous snapshot,
//! builds the next one and publishes it together with the statistics
//! computed from it. Readers hold an `Arc` to a snapshot that never changes
//! underneath them.

pub mod snapshot;
pub mod stats;
pub mod events;
pub mod simulation;
pub mod handle;
pub mod export;
pub mod prelude;
