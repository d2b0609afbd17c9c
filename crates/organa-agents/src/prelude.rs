//! Organa Agents Prelude - convenient imports for common usage.
//!
//! ```rust
//! use organa_agents::prelude::*;
//! ```

pub use crate::organism::{Organism, Sample, Lifecycle};
pub use crate::reproduction::{
    ReproductionPolicy, ReproductionContext, FitnessReproduction, NoReproduction, fittest_index,
};

// Re-export from core
pub use organa_core::prelude::*;
