//! Frame exporter - a renderer-ready JSON view of one snapshot.
//!
//! Each organism is exported together with its derived efficiency and
//! lifecycle, and each linked pair once, with its phase gap, so a renderer
//! can draw connecting lines without reading relation sets.

use crate::snapshot::PopulationSnapshot;
use crate::stats::PopulationStats;
use organa_agents::organism::{Lifecycle, Organism};
use organa_core::error::Result;
use organa_core::types::*;
use serde::Serialize;
use std::path::Path;

/// One connecting line between two linked organisms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEdge {
    pub a: OrganismId,
    pub b: OrganismId,
    /// Short-arc phase distance in radians.
    pub phase_gap: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganismView {
    pub id: OrganismId,
    pub generation: u32,
    pub coherence: f64,
    pub integration: f64,
    pub decoherence_rate: f64,
    pub phase: f64,
    pub amplitude: f64,
    pub efficiency: f64,
    pub lifecycle: Lifecycle,
    pub parent: Option<OrganismId>,
}

impl OrganismView {
    fn from_organism(organism: &Organism, snapshot: &PopulationSnapshot) -> Self {
        Self {
            id: organism.id,
            generation: organism.generation,
            coherence: organism.coherence,
            integration: organism.integration,
            decoherence_rate: organism.decoherence_rate,
            phase: organism.phase,
            amplitude: organism.amplitude,
            efficiency: organism.efficiency(),
            lifecycle: organism.lifecycle(&snapshot.thresholds),
            parent: organism.parent,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub tick: Tick,
    pub time: f64,
    pub organisms: Vec<OrganismView>,
    pub links: Vec<LinkEdge>,
    pub stats: PopulationStats,
}

impl RenderFrame {
    pub fn from_snapshot(snapshot: &PopulationSnapshot) -> Self {
        Self {
            tick: snapshot.tick,
            time: snapshot.time,
            organisms: snapshot
                .organisms
                .iter()
                .map(|o| OrganismView::from_organism(o, snapshot))
                .collect(),
            links: export_links(snapshot),
            stats: snapshot.stats.clone(),
        }
    }
}

/// One edge per unordered linked pair, closest phases first.
pub fn export_links(snapshot: &PopulationSnapshot) -> Vec<LinkEdge> {
    let mut edges: Vec<LinkEdge> = snapshot
        .links()
        .into_iter()
        .filter_map(|(a, b)| {
            let pa = snapshot.get(&a)?.phase;
            let pb = snapshot.get(&b)?.phase;
            Some(LinkEdge {
                a,
                b,
                phase_gap: phase_distance(pa, pb),
            })
        })
        .collect();

    edges.sort_by(|x, y| x.phase_gap.total_cmp(&y.phase_gap));
    edges
}

/// Serialize a snapshot as a pretty-printed render frame.
pub fn to_json(snapshot: &PopulationSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&RenderFrame::from_snapshot(snapshot))?)
}

/// Write the render frame of `snapshot` to `path`.
pub fn write_json(snapshot: &PopulationSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}
