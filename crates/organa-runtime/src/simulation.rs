//! Simulation - owner of the population and its evolution loop.
//!
//! Each step:
//! 1. Sanitize the delta (clamped to `[0, max_delta_seconds]`) and pressure
//! 2. Advance every organism of the previous snapshot independently
//!    (entropy, self-repair, pressure, phase, clamp) and record a sample
//! 3. Link every pair whose phases are close and blend their coherence
//! 4. Let the reproduction policy clone the fittest organism
//! 5. Publish the new snapshot with stats computed from it
//!
//! Operations take `&mut self`, so a step can never interleave with another
//! step or an observation. Use `SharedSimulation` to drive one simulation
//! from several threads.

use crate::events::PopulationEvent;
use crate::snapshot::PopulationSnapshot;
use crate::stats::PopulationStats;
use organa_agents::organism::Organism;
use organa_agents::reproduction::{FitnessReproduction, ReproductionContext, ReproductionPolicy};
use organa_core::config::{CapPolicy, SimulationConfig};
use organa_core::error::{OrganaError, PopulationError, Result};
use organa_core::history::RingBuffer;
use organa_core::random::{RandomSource, SeededSource};
use organa_core::types::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Upper clamp for external pressure.
pub const MAX_PRESSURE: f64 = 1.0e6;

const EVENT_LOG_CAPACITY: usize = 512;

/// Result of one `step` call.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The snapshot published by this step.
    pub snapshot: Arc<PopulationSnapshot>,
    pub events: Vec<PopulationEvent>,
}

impl StepOutcome {
    pub fn stats(&self) -> &PopulationStats {
        &self.snapshot.stats
    }
}

/// Clamp a caller-supplied wall-clock delta into `[0, max]`. NaN becomes 0.
pub fn sanitize_delta(delta_seconds: f64, max: f64) -> f64 {
    if delta_seconds.is_nan() {
        0.0
    } else {
        delta_seconds.clamp(0.0, max)
    }
}

/// Clamp external pressure into `[0, MAX_PRESSURE]`. NaN becomes 0.
pub fn sanitize_pressure(pressure: f64) -> f64 {
    if pressure.is_nan() {
        0.0
    } else {
        pressure.clamp(0.0, MAX_PRESSURE)
    }
}

pub struct Simulation {
    config: SimulationConfig,
    current: Arc<PopulationSnapshot>,
    source: Box<dyn RandomSource>,
    policy: Box<dyn ReproductionPolicy>,
    stats_history: RingBuffer<PopulationStats>,
    event_log: RingBuffer<(Tick, PopulationEvent)>,
}

impl Simulation {
    /// Seeded simulation using the config's seed (OS entropy when unset).
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let source = SeededSource::from_optional_seed(config.seed);
        Self::seeded(config, Box::new(source))
    }

    /// Create `initial_population` random organisms drawn from `source`.
    pub fn seeded(config: SimulationConfig, mut source: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;
        let organisms = (0..config.initial_population)
            .map(|_| Organism::random(source.as_mut(), config.history_capacity))
            .collect();
        Self::from_organisms(config, organisms, source)
    }

    /// Start from an explicit population.
    ///
    /// Metric values are taken as given and clamped by the first update.
    /// Duplicate ids after the first occurrence get a fresh id. Links to
    /// organisms outside the population are dropped and one-sided links are
    /// mirrored.
    pub fn from_organisms(
        config: SimulationConfig,
        mut organisms: Vec<Organism>,
        source: Box<dyn RandomSource>,
    ) -> Result<Self> {
        config.validate()?;
        if organisms.len() > config.population_cap {
            return Err(PopulationError::Overflow {
                len: organisms.len(),
                cap: config.population_cap,
            }
            .into());
        }

        assign_unique_ids(&mut organisms);
        reconcile_links(&mut organisms);

        let snapshot = PopulationSnapshot::new(organisms, config.thresholds(), 0, 0.0);
        let mut stats_history = RingBuffer::with_capacity(config.stats_history_capacity);
        stats_history.push(snapshot.stats.clone());

        debug!(population = snapshot.len(), cap = config.population_cap, "simulation created");

        Ok(Self {
            current: Arc::new(snapshot),
            source,
            policy: Box::new(FitnessReproduction::new()),
            stats_history,
            event_log: RingBuffer::with_capacity(EVENT_LOG_CAPACITY),
            config,
        })
    }

    /// Replace the reproduction policy.
    pub fn with_policy(mut self, policy: Box<dyn ReproductionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Advance the whole population by one time step.
    ///
    /// Never fails; degenerate inputs are clamped. A zero delta leaves every
    /// bounded scalar untouched and neither creates nor evicts organisms.
    pub fn step(&mut self, delta_seconds: f64, external_pressure: f64) -> StepOutcome {
        let dt = sanitize_delta(delta_seconds, self.config.max_delta_seconds);
        let pressure = sanitize_pressure(external_pressure);

        let previous = Arc::clone(&self.current);
        let tick = previous.tick + 1;
        let time = previous.time + dt;
        let thresholds = self.config.thresholds();
        let mut events = Vec::new();

        let mut organisms = previous.organisms.clone();
        for organism in organisms.iter_mut() {
            organism.advance(dt, pressure, &self.config);

            if dt > 0.0
                && self.config.auto_heal
                && organism.needs_healing(self.config.healing_threshold)
            {
                organism.heal();
                debug!(id = %organism.id, "auto-heal");
                events.push(PopulationEvent::Healed { id: organism.id });
            }

            let sample = organism.sample(time, &thresholds);
            organism.record(sample);
        }

        couple(&mut organisms, dt, &self.config, &mut events);

        if dt > 0.0 {
            if let Some(child) = self.reproduce(&organisms, time) {
                debug!(
                    id = %child.id,
                    generation = child.generation,
                    population = organisms.len() + 1,
                    "organism born"
                );
                if let Some(parent) = child.parent {
                    events.push(PopulationEvent::Born {
                        id: child.id,
                        parent,
                        generation: child.generation,
                    });
                }
                organisms.push(child);
            }
        }

        self.publish(organisms, tick, time);
        self.stats_history.push(self.current.stats.clone());
        for event in &events {
            self.event_log.push((tick, event.clone()));
        }

        trace!(
            tick,
            dt,
            population = self.current.stats.population,
            active = self.current.stats.active_count,
            total_efficiency = self.current.stats.total_efficiency,
            "step"
        );

        StepOutcome {
            snapshot: Arc::clone(&self.current),
            events,
        }
    }

    /// Run `steps` steps with a fixed delta and pressure, returning the last snapshot.
    pub fn run(&mut self, steps: u64, delta_seconds: f64, external_pressure: f64) -> Arc<PopulationSnapshot> {
        for _ in 0..steps {
            self.step(delta_seconds, external_pressure);
        }
        self.snapshot()
    }

    /// Measurement: nudge one organism's coherence and integration toward 1.
    pub fn observe(&mut self, id: OrganismId) -> Result<Arc<PopulationSnapshot>> {
        let gain = self.config.observe_gain;
        self.update_one(id, |organism| organism.observe(gain))?;
        self.log(PopulationEvent::Observed { id });
        Ok(self.snapshot())
    }

    /// Reset one organism's decoherence to the fixed point.
    pub fn heal(&mut self, id: OrganismId) -> Result<Arc<PopulationSnapshot>> {
        self.update_one(id, Organism::heal)?;
        debug!(%id, "healed");
        self.log(PopulationEvent::Healed { id });
        Ok(self.snapshot())
    }

    /// Add an externally built organism, honoring the cap policy.
    ///
    /// Under `EvictWeakest` a newcomer less efficient than every resident
    /// is refused with `CapacityReached`.
    pub fn insert(&mut self, mut organism: Organism) -> Result<OrganismId> {
        let mut organisms = self.current.organisms.clone();

        if organisms.iter().any(|o| o.id == organism.id) {
            organism.id = OrganismId::new();
        }
        organism.clamp_metrics();

        if organisms.len() >= self.config.population_cap {
            match self.config.cap_policy {
                CapPolicy::Refuse => {
                    return Err(OrganaError::capacity_reached(self.config.population_cap));
                }
                CapPolicy::EvictWeakest => {
                    let idx = weakest_index(&organisms)
                        .ok_or_else(|| OrganaError::capacity_reached(self.config.population_cap))?;
                    if organism.efficiency() < organisms[idx].efficiency() {
                        debug!(
                            id = %organism.id,
                            efficiency = organism.efficiency(),
                            "newcomer weaker than every resident"
                        );
                        return Err(OrganaError::capacity_reached(self.config.population_cap));
                    }
                    let evicted = organisms.remove(idx);
                    for survivor in organisms.iter_mut() {
                        survivor.unlink(&evicted.id);
                    }
                    debug!(id = %evicted.id, efficiency = evicted.efficiency(), "evicted weakest");
                    self.log(PopulationEvent::Evicted { id: evicted.id });
                }
            }
        }

        let id = organism.id;
        organisms.push(organism);
        reconcile_links(&mut organisms);

        let (tick, time) = (self.current.tick, self.current.time);
        self.publish(organisms, tick, time);
        debug!(%id, population = self.current.len(), "inserted");
        self.log(PopulationEvent::Inserted { id });
        Ok(id)
    }

    /// Current published snapshot.
    pub fn snapshot(&self) -> Arc<PopulationSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.current.stats
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.current.organisms
    }

    pub fn organism(&self, id: &OrganismId) -> Option<&Organism> {
        self.current.get(id)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn tick(&self) -> Tick {
        self.current.tick
    }

    /// Simulated seconds elapsed.
    pub fn time(&self) -> f64 {
        self.current.time
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Stats of recent published snapshots, oldest first.
    pub fn stats_history(&self) -> &RingBuffer<PopulationStats> {
        &self.stats_history
    }

    pub fn event_log(&self) -> &RingBuffer<(Tick, PopulationEvent)> {
        &self.event_log
    }

    fn reproduce(&mut self, organisms: &[Organism], time: f64) -> Option<Organism> {
        if organisms.len() >= self.config.population_cap {
            return None;
        }
        let ctx = ReproductionContext::from_config(&self.config);
        let idx = self.policy.select(organisms, &ctx, self.source.as_mut())?;
        let parent = organisms.get(idx)?;
        Some(parent.offspring(
            self.source.as_mut(),
            self.config.mutation_spread,
            time,
            self.config.history_capacity,
        ))
    }

    /// Copy the population, apply `f` to one organism, publish the copy.
    fn update_one(&mut self, id: OrganismId, f: impl FnOnce(&mut Organism)) -> Result<()> {
        let mut organisms = self.current.organisms.clone();
        let organism = organisms
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| OrganaError::unknown_organism(id))?;
        f(organism);

        let (tick, time) = (self.current.tick, self.current.time);
        self.publish(organisms, tick, time);
        Ok(())
    }

    fn publish(&mut self, organisms: Vec<Organism>, tick: Tick, time: f64) {
        let snapshot = PopulationSnapshot::new(organisms, self.config.thresholds(), tick, time);
        self.current = Arc::new(snapshot);
    }

    fn log(&mut self, event: PopulationEvent) {
        self.event_log.push((self.current.tick, event));
    }
}

/// Link phase-aligned pairs and blend their coherence toward the pair mean.
///
/// Blend deltas are computed from pre-coupling coherence and applied
/// together, so the result does not depend on pair order.
fn couple(
    organisms: &mut [Organism],
    dt: f64,
    config: &SimulationConfig,
    events: &mut Vec<PopulationEvent>,
) {
    let n = organisms.len();
    let blend = (config.coupling_rate * dt).min(config.coupling_max_blend);
    let coherence: Vec<f64> = organisms.iter().map(|o| o.coherence).collect();
    let mut deltas = vec![0.0; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if phase_distance(organisms[i].phase, organisms[j].phase) >= config.coupling_threshold {
                continue;
            }

            let (a, b) = (organisms[i].id, organisms[j].id);
            let fresh_a = organisms[i].link(b);
            let fresh_b = organisms[j].link(a);
            if fresh_a || fresh_b {
                events.push(PopulationEvent::Linked { a, b });
            }

            let mean = (coherence[i] + coherence[j]) / 2.0;
            deltas[i] += blend * (mean - coherence[i]);
            deltas[j] += blend * (mean - coherence[j]);
        }
    }

    if blend > 0.0 {
        for (organism, delta) in organisms.iter_mut().zip(deltas) {
            organism.coherence += delta;
            organism.clamp_metrics();
        }
    }
}

/// Give every repeated id after its first occurrence a fresh one.
fn assign_unique_ids(organisms: &mut [Organism]) {
    let mut seen = HashSet::new();
    for organism in organisms.iter_mut() {
        if !seen.insert(organism.id) {
            let fresh = OrganismId::new();
            debug!(duplicate = %organism.id, id = %fresh, "reassigned duplicate id");
            organism.id = fresh;
            seen.insert(fresh);
        }
    }
}

/// Drop links to organisms that are not present and mirror one-sided links.
fn reconcile_links(organisms: &mut [Organism]) {
    let ids: HashSet<OrganismId> = organisms.iter().map(|o| o.id).collect();
    for organism in organisms.iter_mut() {
        let own = organism.id;
        organism.relations.retain(|other| *other != own && ids.contains(other));
    }

    let mut mirrored = Vec::new();
    for organism in organisms.iter() {
        for other in &organism.relations {
            mirrored.push((*other, organism.id));
        }
    }
    for (target, peer) in mirrored {
        if let Some(organism) = organisms.iter_mut().find(|o| o.id == target) {
            organism.link(peer);
        }
    }
}

/// Index of the least efficient organism; the first one wins ties.
fn weakest_index(organisms: &[Organism]) -> Option<usize> {
    let mut worst: Option<(usize, f64)> = None;
    for (idx, organism) in organisms.iter().enumerate() {
        let efficiency = organism.efficiency();
        match worst {
            Some((_, low)) if efficiency >= low => {}
            _ => worst = Some((idx, efficiency)),
        }
    }
    worst.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use organa_core::random::ScriptedSource;

    fn organism(coherence: f64, integration: f64, decoherence: f64, phase: f64) -> Organism {
        Organism::new(coherence, integration, decoherence, phase, 0.5, 100)
    }

    fn scripted(organisms: Vec<Organism>, value: f64) -> Simulation {
        Simulation::from_organisms(
            SimulationConfig::default(),
            organisms,
            Box::new(ScriptedSource::constant(value)),
        )
        .unwrap()
    }

    #[test]
    fn sanitize_clamps_inputs() {
        assert_eq!(sanitize_delta(1.0, 0.05), 0.05);
        assert_eq!(sanitize_delta(-1.0, 0.05), 0.0);
        assert_eq!(sanitize_delta(f64::NAN, 0.05), 0.0);
        assert_eq!(sanitize_delta(f64::INFINITY, 0.05), 0.05);
        assert_eq!(sanitize_pressure(-3.0), 0.0);
        assert_eq!(sanitize_pressure(f64::NAN), 0.0);
        assert_eq!(sanitize_pressure(f64::INFINITY), MAX_PRESSURE);
    }

    #[test]
    fn new_creates_seed_set() {
        let sim = Simulation::new(SimulationConfig::default().with_seed(5)).unwrap();
        assert_eq!(sim.len(), 3);
        assert_eq!(sim.tick(), 0);
        assert!(sim.organisms().iter().all(|o| o.generation == 0));
        assert!(sim.snapshot().violations(12).is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimulationConfig {
            coherence_threshold: 2.0,
            ..Default::default()
        };
        assert!(matches!(Simulation::new(config), Err(OrganaError::Config(_))));
    }

    #[test]
    fn rejects_oversized_population() {
        let config = SimulationConfig {
            population_cap: 1,
            initial_population: 1,
            ..Default::default()
        };
        let result = Simulation::from_organisms(
            config,
            vec![organism(0.8, 0.8, 0.05, 0.0), organism(0.8, 0.8, 0.05, 1.0)],
            Box::new(ScriptedSource::constant(0.5)),
        );
        assert!(matches!(
            result,
            Err(OrganaError::Population(PopulationError::Overflow { len: 2, cap: 1 }))
        ));
    }

    #[test]
    fn step_publishes_new_snapshot() {
        let mut sim = scripted(vec![organism(0.8, 0.85, 0.05, 0.0)], 0.99);
        let before = sim.snapshot();
        let outcome = sim.step(0.016, 0.0);
        assert_eq!(outcome.snapshot.tick, 1);
        assert!((outcome.snapshot.time - 0.016).abs() < 1e-12);
        assert!(!Arc::ptr_eq(&before, &outcome.snapshot));
        // the old snapshot is untouched
        assert_eq!(before.tick, 0);
        assert!(before.organisms[0].history.is_empty());
        assert_eq!(outcome.snapshot.organisms[0].history.len(), 1);
    }

    #[test]
    fn close_phases_link_and_blend() {
        let mut sim = scripted(
            vec![organism(0.9, 0.8, 0.05, 0.0), organism(0.7, 0.8, 0.05, 0.1)],
            0.99,
        );
        let outcome = sim.step(0.05, 0.0);
        let snap = &outcome.snapshot;
        let (a, b) = (&snap.organisms[0], &snap.organisms[1]);
        assert!(a.is_linked_to(&b.id) && b.is_linked_to(&a.id));
        assert!(outcome
            .events
            .iter()
            .any(|e| matches!(e, PopulationEvent::Linked { .. })));
        assert!(a.coherence - b.coherence < 0.2);

        // a second step does not report the same link again
        let again = sim.step(0.05, 0.0);
        assert!(!again
            .events
            .iter()
            .any(|e| matches!(e, PopulationEvent::Linked { .. })));
    }

    #[test]
    fn distant_phases_stay_unlinked() {
        let mut sim = scripted(
            vec![organism(0.9, 0.8, 0.05, 0.0), organism(0.7, 0.8, 0.05, 3.0)],
            0.99,
        );
        let snap = sim.step(0.05, 0.0).snapshot;
        assert!(snap.organisms.iter().all(|o| o.relations.is_empty()));
        assert_eq!(snap.stats.link_count, 0);
    }

    #[test]
    fn eligible_parent_reproduces_on_scripted_flip() {
        // efficiency 0.9 * 0.9 / 0.01 = 81, coin 0.0 always succeeds
        let mut sim = scripted(vec![organism(0.9, 0.9, 0.01, 0.0)], 0.0);
        let outcome = sim.step(0.016, 0.0);
        assert_eq!(outcome.snapshot.len(), 2);
        let child = &outcome.snapshot.organisms[1];
        assert_eq!(child.generation, 1);
        assert_eq!(outcome.snapshot.stats.max_generation, 1);
        assert!(matches!(outcome.events.last(), Some(PopulationEvent::Born { generation: 1, .. })));
    }

    #[test]
    fn zero_delta_never_reproduces() {
        let mut sim = scripted(vec![organism(0.9, 0.9, 0.01, 0.0)], 0.0);
        let outcome = sim.step(0.0, 0.0);
        assert_eq!(outcome.snapshot.len(), 1);
    }

    #[test]
    fn observe_unknown_id_fails() {
        let mut sim = scripted(vec![organism(0.8, 0.8, 0.05, 0.0)], 0.5);
        let err = sim.observe(OrganismId::new()).unwrap_err();
        assert!(matches!(err, OrganaError::Population(PopulationError::UnknownOrganism(_))));
    }

    #[test]
    fn heal_resets_target() {
        let target = organism(0.5, 0.8, 0.29, 0.0);
        let id = target.id;
        let mut sim = scripted(vec![target], 0.5);
        let snap = sim.heal(id).unwrap();
        let healed = snap.get(&id).unwrap();
        assert_eq!(healed.decoherence_rate, HEALED_DECOHERENCE);
        assert!((healed.coherence - 0.5 * GOLDEN_RATIO).abs() < 1e-12);
        assert_eq!(snap.stats.avg_decoherence_rate, HEALED_DECOHERENCE);
    }

    #[test]
    fn auto_heal_triggers_at_threshold() {
        let config = SimulationConfig {
            auto_heal: true,
            ..Default::default()
        };
        let mut sim = Simulation::from_organisms(
            config,
            vec![organism(0.5, 0.5, 0.3, 0.0)],
            Box::new(ScriptedSource::constant(0.99)),
        )
        .unwrap();
        let outcome = sim.step(0.016, 0.0);
        assert!(outcome.events.iter().any(|e| matches!(e, PopulationEvent::Healed { .. })));
        assert_eq!(outcome.snapshot.organisms[0].decoherence_rate, HEALED_DECOHERENCE);
    }

    #[test]
    fn from_organisms_mirrors_and_scrubs_links() {
        let mut a = organism(0.8, 0.8, 0.05, 0.0);
        let b = organism(0.8, 0.8, 0.05, 2.0);
        a.link(b.id);
        a.link(OrganismId::new());
        let (a_id, b_id) = (a.id, b.id);
        let sim = scripted(vec![a, b], 0.5);
        assert_eq!(sim.organism(&a_id).unwrap().relations.len(), 1);
        assert!(sim.organism(&b_id).unwrap().is_linked_to(&a_id));
        assert!(sim.snapshot().violations(12).is_empty());
    }

    #[test]
    fn insert_refuses_at_cap() {
        let config = SimulationConfig {
            population_cap: 1,
            initial_population: 1,
            ..Default::default()
        };
        let mut sim = Simulation::from_organisms(
            config,
            vec![organism(0.8, 0.8, 0.05, 0.0)],
            Box::new(ScriptedSource::constant(0.5)),
        )
        .unwrap();
        let err = sim.insert(organism(0.9, 0.9, 0.05, 1.0)).unwrap_err();
        assert_eq!(err, OrganaError::capacity_reached(1));
        assert_eq!(sim.len(), 1);
    }

    #[test]
    fn insert_evicts_weakest_and_scrubs_links() {
        let config = SimulationConfig {
            population_cap: 2,
            initial_population: 2,
            cap_policy: CapPolicy::EvictWeakest,
            ..Default::default()
        };
        let mut strong = organism(0.9, 0.9, 0.02, 0.0);
        let mut weak = organism(0.3, 0.3, 0.2, 0.05);
        strong.link(weak.id);
        weak.link(strong.id);
        let (strong_id, weak_id) = (strong.id, weak.id);

        let mut sim = Simulation::from_organisms(
            config,
            vec![strong, weak],
            Box::new(ScriptedSource::constant(0.5)),
        )
        .unwrap();

        let newcomer = sim.insert(organism(0.8, 0.8, 0.05, 3.0)).unwrap();
        assert_eq!(sim.len(), 2);
        assert!(sim.organism(&weak_id).is_none());
        assert!(sim.organism(&newcomer).is_some());
        assert!(sim.organism(&strong_id).unwrap().relations.is_empty());
        assert!(sim.snapshot().violations(2).is_empty());
        assert!(sim
            .event_log()
            .iter()
            .any(|(_, e)| *e == PopulationEvent::Evicted { id: weak_id }));
    }

    #[test]
    fn from_organisms_reassigns_duplicate_ids() {
        let original = organism(0.8, 0.85, 0.05, 0.0);
        let id = original.id;
        let mut sim = scripted(vec![original.clone(), original], 0.99);

        let ids: Vec<OrganismId> = sim.organisms().iter().map(|o| o.id).collect();
        assert_eq!(ids[0], id);
        assert_ne!(ids[1], id);
        assert!(sim.snapshot().violations(12).is_empty());

        sim.step(0.016, 0.0);
        assert!(sim.snapshot().violations(12).is_empty());

        let before = sim.organism(&ids[1]).unwrap().coherence;
        sim.observe(id).unwrap();
        assert_eq!(sim.organism(&ids[1]).unwrap().coherence, before);
        assert!(sim.organism(&id).unwrap().coherence > before);
    }

    #[test]
    fn insert_refuses_newcomer_weaker_than_residents() {
        let config = SimulationConfig {
            population_cap: 2,
            initial_population: 2,
            cap_policy: CapPolicy::EvictWeakest,
            ..Default::default()
        };
        // efficiencies 40.5 and 12.8
        let strong = organism(0.9, 0.9, 0.02, 0.0);
        let middling = organism(0.8, 0.8, 0.05, 2.0);
        let (strong_id, middling_id) = (strong.id, middling.id);
        let mut sim = Simulation::from_organisms(
            config,
            vec![strong, middling],
            Box::new(ScriptedSource::constant(0.5)),
        )
        .unwrap();

        // efficiency 0.1 * 0.1 / 0.3, about 0.033
        let err = sim.insert(organism(0.1, 0.1, 0.3, 4.0)).unwrap_err();
        assert_eq!(err, OrganaError::capacity_reached(2));
        assert_eq!(sim.len(), 2);
        assert!(sim.organism(&strong_id).is_some());
        assert!(sim.organism(&middling_id).is_some());
        assert!(!sim
            .event_log()
            .iter()
            .any(|(_, e)| matches!(e, PopulationEvent::Evicted { .. })));
    }

    #[test]
    fn stats_history_tracks_steps() {
        let mut sim = scripted(vec![organism(0.8, 0.85, 0.05, 0.0)], 0.99);
        sim.run(5, 0.016, 0.0);
        assert_eq!(sim.stats_history().len(), 6);
        assert_eq!(sim.stats_history().latest().map(|s| s.tick), Some(5));
    }
}
