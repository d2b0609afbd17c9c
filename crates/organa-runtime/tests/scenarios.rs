//! Scenario tests - concrete runs with pinned inputs, deterministic
//! reproduction timing, threaded access and export.

use organa_agents::organism::Organism;
use organa_agents::reproduction::NoReproduction;
use organa_core::config::SimulationConfig;
use organa_core::random::ScriptedSource;
use organa_core::types::OrganismId;
use organa_runtime::events::PopulationEvent;
use organa_runtime::export::{export_links, write_json};
use organa_runtime::handle::SharedSimulation;
use organa_runtime::simulation::Simulation;
use std::thread;

fn seed_set() -> Vec<Organism> {
    // Phases far apart so no pair couples during the run
    let coherence = [0.82, 0.78, 0.75];
    let integration = [0.88, 0.85, 0.82];
    let phase = [0.0, 2.1, 4.2];
    (0..3)
        .map(|i| Organism::new(coherence[i], integration[i], 0.05, phase[i], 0.7, 100))
        .collect()
}

#[test]
fn one_second_of_steps_keeps_seed_set_active_and_improving() {
    let organisms = seed_set();
    let initial: Vec<(OrganismId, f64)> = organisms.iter().map(|o| (o.id, o.efficiency())).collect();

    let mut sim = Simulation::from_organisms(
        SimulationConfig::default(),
        organisms,
        Box::new(ScriptedSource::constant(0.99)),
    )
    .unwrap();

    for _ in 0..60 {
        sim.step(0.016, 0.0);
    }

    let snapshot = sim.snapshot();
    let thresholds = sim.config().thresholds();
    for (id, before) in initial {
        let organism = snapshot.get(&id).unwrap();
        println!(
            "{}: efficiency {:.3} -> {:.3}, c={:.3} i={:.3} d={:.4}",
            id,
            before,
            organism.efficiency(),
            organism.coherence,
            organism.integration,
            organism.decoherence_rate
        );
        assert!(organism.is_active(&thresholds));
        assert!(organism.efficiency() > before);
        assert_eq!(organism.history.len(), 60);
    }
    assert!((snapshot.time - 0.96).abs() < 1e-9);
}

#[test]
fn repeated_observation_converges_toward_one() {
    let organisms = seed_set();
    let id = organisms[2].id;
    let mut sim = Simulation::from_organisms(
        SimulationConfig::default(),
        organisms,
        Box::new(ScriptedSource::constant(0.99)),
    )
    .unwrap();

    let mut coherence = sim.organism(&id).unwrap().coherence;
    let mut integration = sim.organism(&id).unwrap().integration;

    for _ in 0..20 {
        let snapshot = sim.observe(id).unwrap();
        let recomputed: f64 = snapshot.organisms.iter().map(Organism::efficiency).sum();
        assert_eq!(snapshot.stats.total_efficiency, recomputed);
        let organism = snapshot.get(&id).unwrap();
        let mean_coherence =
            snapshot.organisms.iter().map(|o| o.coherence).sum::<f64>() / snapshot.len() as f64;
        assert_eq!(snapshot.stats.avg_coherence, mean_coherence);
        assert!(organism.coherence > coherence && organism.coherence <= 1.0);
        assert!(organism.integration > integration && organism.integration <= 1.0);
        coherence = organism.coherence;
        integration = organism.integration;
    }

    // observation never advances the clock
    assert_eq!(sim.tick(), 0);
    assert_eq!(
        sim.event_log().iter().filter(|(_, e)| *e == PopulationEvent::Observed { id }).count(),
        20
    );
}

#[test]
fn scripted_source_pins_reproduction_step() {
    // efficiency 0.9 * 0.9 / 0.01 = 81, well above the bar
    let parent = Organism::new(0.9, 0.9, 0.01, 0.0, 0.7, 100);
    let parent_id = parent.id;

    // Two failed flips, then a success at 0.01 < 0.02
    let source = ScriptedSource::new(vec![0.5, 0.5, 0.01]);
    let mut sim = Simulation::from_organisms(SimulationConfig::default(), vec![parent], Box::new(source)).unwrap();

    assert!(sim.step(0.016, 0.0).events.is_empty());
    assert_eq!(sim.len(), 1);
    assert!(sim.step(0.016, 0.0).events.is_empty());
    assert_eq!(sim.len(), 1);

    let outcome = sim.step(0.016, 0.0);
    assert_eq!(outcome.snapshot.len(), 2);
    match outcome.events.as_slice() {
        [PopulationEvent::Born { parent, generation, .. }] => {
            assert_eq!(*parent, parent_id);
            assert_eq!(*generation, 1);
        }
        other => panic!("expected a single birth, got {:?}", other),
    }

    let child = &outcome.snapshot.organisms[1];
    assert_eq!(child.parent, Some(parent_id));
    assert!(child.history.is_empty());
    assert!((child.born_at - 0.048).abs() < 1e-12);
}

#[test]
fn static_policy_never_grows() {
    let config = SimulationConfig {
        reproduction_probability: 1.0,
        ..SimulationConfig::default().with_seed(9)
    };
    let mut sim = Simulation::new(config).unwrap().with_policy(Box::new(NoReproduction));
    sim.run(500, 0.05, 2.0);
    assert_eq!(sim.len(), 3);
    assert_eq!(sim.stats().max_generation, 0);
}

#[test]
fn shared_simulation_serves_driver_and_renderer() {
    let shared = SharedSimulation::new(Simulation::new(SimulationConfig::default().with_seed(21)).unwrap());
    let target = shared.snapshot().organisms[0].id;

    let driver = {
        let shared = shared.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                shared.step(0.016, 0.2);
            }
        })
    };

    for _ in 0..50 {
        shared.observe(target).unwrap();
        let snapshot = shared.snapshot();
        let recomputed: f64 = snapshot.organisms.iter().map(Organism::efficiency).sum();
        assert_eq!(snapshot.stats.total_efficiency, recomputed);
        assert!(snapshot.violations(12).is_empty());
    }

    driver.join().unwrap();
    assert_eq!(shared.snapshot().tick, 200);
}

#[test]
fn export_writes_render_frame() {
    let config = SimulationConfig {
        coupling_threshold: 1.5,
        ..SimulationConfig::default().with_seed(4)
    };
    let mut sim = Simulation::new(config).unwrap();
    sim.run(30, 0.016, 0.0);
    let snapshot = sim.snapshot();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.json");
    write_json(&snapshot, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let frame: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(frame["tick"], 30);
    assert_eq!(
        frame["organisms"].as_array().map(|a| a.len()),
        Some(snapshot.len())
    );
    assert_eq!(
        frame["links"].as_array().map(|a| a.len()),
        Some(export_links(&snapshot).len())
    );
    assert_eq!(frame["stats"]["population"], snapshot.len());
}
