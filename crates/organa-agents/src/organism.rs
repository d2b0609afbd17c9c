//! Organism - a simulated unit with bounded scalar state.
//!
//! Each organism carries three bounded metrics (coherence, integration,
//! decoherence rate), a phase angle, an amplitude, symmetric relation links
//! to other organisms and a ring buffer of recent samples.
//!
//! Efficiency and activity are derived on read and never stored. An
//! organism is `Active` while both coherence and integration sit at or
//! above their thresholds and `Emerging` otherwise; there is no explicit
//! transition table and no terminal state.

use organa_core::config::{ActivityThresholds, SimulationConfig};
use organa_core::history::RingBuffer;
use organa_core::random::RandomSource;
use organa_core::types::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// One entry of an organism's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Simulated seconds since the simulation started.
    pub time: f64,
    pub efficiency: f64,
    pub active: bool,
}

/// Derived activity predicate, named for readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Lifecycle {
    Emerging,
    Active,
}

#[derive(Debug, Clone, Serialize)]
pub struct Organism {
    pub id: OrganismId,
    /// 0 for the seed set, parent generation + 1 for offspring.
    pub generation: u32,
    pub coherence: f64,
    pub integration: f64,
    pub decoherence_rate: f64,
    /// Radians in `[0, 2π)`.
    pub phase: f64,
    pub amplitude: f64,
    pub relations: BTreeSet<OrganismId>,
    pub history: RingBuffer<Sample>,
    pub parent: Option<OrganismId>,
    /// Simulated time of birth.
    pub born_at: f64,
}

impl Organism {
    /// Create a generation-0 organism. Out-of-range inputs are clamped.
    pub fn new(
        coherence: f64,
        integration: f64,
        decoherence_rate: f64,
        phase: f64,
        amplitude: f64,
        history_capacity: usize,
    ) -> Self {
        let mut organism = Self {
            id: OrganismId::new(),
            generation: 0,
            coherence,
            integration,
            decoherence_rate,
            phase,
            amplitude,
            relations: BTreeSet::new(),
            history: RingBuffer::with_capacity(history_capacity),
            parent: None,
            born_at: 0.0,
        };
        organism.clamp_metrics();
        organism
    }

    /// Random seed-set organism in the healthy band.
    pub fn random(source: &mut dyn RandomSource, history_capacity: usize) -> Self {
        let coherence = source.range(0.75, 0.85);
        let integration = source.range(0.80, 0.90);
        let decoherence_rate = source.range(0.04, 0.06);
        let phase = source.range(0.0, 2.0 * PI);
        let amplitude = source.range(0.5, 1.0);
        Self::new(coherence, integration, decoherence_rate, phase, amplitude, history_capacity)
    }

    /// `coherence * integration / max(decoherence_rate, ε)`.
    pub fn efficiency(&self) -> f64 {
        (self.coherence * self.integration) / self.decoherence_rate.max(EFFICIENCY_EPSILON)
    }

    pub fn is_active(&self, thresholds: &ActivityThresholds) -> bool {
        self.coherence >= thresholds.coherence && self.integration >= thresholds.integration
    }

    pub fn lifecycle(&self, thresholds: &ActivityThresholds) -> Lifecycle {
        if self.is_active(thresholds) {
            Lifecycle::Active
        } else {
            Lifecycle::Emerging
        }
    }

    /// Clamp every bounded scalar into its declared range and wrap the phase.
    pub fn clamp_metrics(&mut self) {
        self.coherence = COHERENCE_RANGE.clamp(self.coherence);
        self.integration = INTEGRATION_RANGE.clamp(self.integration);
        self.decoherence_rate = DECOHERENCE_RANGE.clamp(self.decoherence_rate);
        self.amplitude = AMPLITUDE_RANGE.clamp(self.amplitude);
        self.phase = wrap_phase(self.phase);
    }

    /// Advance the continuous dynamics by `dt` seconds.
    ///
    /// Order: entropy growth, self-repair while active, external pressure on
    /// integration, phase advance, clamp. `dt` and `pressure` are expected to
    /// be sanitized by the caller; with `dt == 0` nothing moves.
    pub fn advance(&mut self, dt: f64, pressure: f64, config: &SimulationConfig) {
        self.decoherence_rate += config.entropy_rate * dt;

        if self.is_active(&config.thresholds()) {
            self.decoherence_rate -= config.repair_rate * dt;
            self.coherence += config.restore_rate * (1.0 - self.coherence) * dt;
            self.integration += config.restore_rate * (1.0 - self.integration) * dt;
        }

        self.integration += pressure * (1.0 - self.integration) * dt;
        self.phase += config.phase_velocity * dt;

        self.clamp_metrics();
    }

    /// Measurement nudges coherence and integration toward 1.
    pub fn observe(&mut self, gain: f64) {
        self.coherence += gain * (1.0 - self.coherence);
        self.integration += gain * (1.0 - self.integration);
        self.clamp_metrics();
    }

    pub fn needs_healing(&self, threshold: f64) -> bool {
        self.decoherence_rate >= threshold
    }

    /// Reset decoherence to its fixed point and lift coherence by the golden
    /// ratio, capped below 1.
    pub fn heal(&mut self) {
        self.decoherence_rate = HEALED_DECOHERENCE;
        self.coherence = (self.coherence * GOLDEN_RATIO).min(HEALED_COHERENCE_CAP);
        self.clamp_metrics();
    }

    pub fn record(&mut self, sample: Sample) {
        self.history.push(sample);
    }

    /// Sample describing the current state at `time`.
    pub fn sample(&self, time: f64, thresholds: &ActivityThresholds) -> Sample {
        Sample {
            time,
            efficiency: self.efficiency(),
            active: self.is_active(thresholds),
        }
    }

    /// Add a one-sided link. Symmetry is the population's job.
    pub fn link(&mut self, other: OrganismId) -> bool {
        other != self.id && self.relations.insert(other)
    }

    pub fn unlink(&mut self, other: &OrganismId) -> bool {
        self.relations.remove(other)
    }

    pub fn is_linked_to(&self, other: &OrganismId) -> bool {
        self.relations.contains(other)
    }

    /// Generation + 1 clone with perturbed metrics.
    ///
    /// The child gets a fresh id, an empty history of its own and no
    /// relation links; nothing is shared with the parent.
    pub fn offspring(
        &self,
        source: &mut dyn RandomSource,
        spread: f64,
        born_at: f64,
        history_capacity: usize,
    ) -> Self {
        let mut child = Self {
            id: OrganismId::new(),
            generation: self.generation.saturating_add(1),
            coherence: self.coherence + source.symmetric(spread),
            integration: self.integration + source.symmetric(spread),
            decoherence_rate: self.decoherence_rate + source.symmetric(spread * 0.2),
            phase: self.phase + source.symmetric(spread * PI),
            amplitude: self.amplitude + source.symmetric(spread),
            relations: BTreeSet::new(),
            history: RingBuffer::with_capacity(history_capacity),
            parent: Some(self.id),
            born_at,
        };
        child.clamp_metrics();
        child
    }
}
