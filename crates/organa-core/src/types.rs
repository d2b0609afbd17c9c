//! Shared types used across all organa crates.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an organism in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub Uuid);

impl OrganismId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrganismId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic step counter.
pub type Tick = u64;

/// Closed interval a bounded scalar must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the interval. NaN collapses to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const COHERENCE_RANGE: Bounds = Bounds::new(0.0, 1.0);
pub const INTEGRATION_RANGE: Bounds = Bounds::new(0.0, 1.0);
pub const DECOHERENCE_RANGE: Bounds = Bounds::new(0.001, 0.3);
pub const AMPLITUDE_RANGE: Bounds = Bounds::new(0.0, 1.0);

/// Floor applied to the decoherence rate when computing efficiency.
pub const EFFICIENCY_EPSILON: f64 = 1e-3;

/// Decoherence value healing resets an organism to.
pub const HEALED_DECOHERENCE: f64 = 0.092;

/// Coherence gain factor applied by healing.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Ceiling for coherence after healing.
pub const HEALED_COHERENCE_CAP: f64 = 0.99;

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_phase(phase: f64) -> f64 {
    if !phase.is_finite() {
        return 0.0;
    }
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Absolute angular distance between two phases, in `[0, π]`.
pub fn phase_distance(a: f64, b: f64) -> f64 {
    let diff = wrap_phase(a - b);
    diff.min(TAU - diff)
}
