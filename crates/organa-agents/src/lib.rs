//! # Organa Agents
//!
//! The organism record and the rules that govern how new organisms appear.
//!
//! - **Organism** - bounded metrics, phase, relation links, sample history
//! - **Reproduction** - policies deciding which organism (if any) clones itself

pub mod organism;
pub mod reproduction;
pub mod prelude;
