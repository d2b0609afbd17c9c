//! Organa Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use organa_core::prelude::*;
//! ```

pub use crate::types::{
    OrganismId, Tick, Bounds,
    COHERENCE_RANGE, INTEGRATION_RANGE, DECOHERENCE_RANGE, AMPLITUDE_RANGE,
    EFFICIENCY_EPSILON,
    wrap_phase, phase_distance,
};

pub use crate::history::RingBuffer;

pub use crate::random::{RandomSource, SeededSource, ScriptedSource};

pub use crate::config::{SimulationConfig, ActivityThresholds, CapPolicy};

pub use crate::error::{OrganaError, PopulationError, ConfigError, Result};
