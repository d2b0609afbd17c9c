//! Error types for organa operations.
//!
//! Numeric updates never fail; values are clamped instead. Errors exist
//! for caller-facing lookups, insertion into a full population, and bad
//! configuration.

use crate::types::OrganismId;
use thiserror::Error;

/// Result type for organa operations.
pub type Result<T> = std::result::Result<T, OrganaError>;

/// Errors that can occur during organa operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrganaError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Population error: {0}")]
    Population(#[from] PopulationError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for OrganaError {
    fn from(e: std::io::Error) -> Self {
        OrganaError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for OrganaError {
    fn from(e: serde_json::Error) -> Self {
        OrganaError::Serialization(e.to_string())
    }
}

/// Population-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulationError {
    #[error("Organism not found: {0}")]
    UnknownOrganism(OrganismId),

    #[error("Population cap of {cap} reached")]
    CapacityReached { cap: usize },

    #[error("{len} organisms exceed the population cap of {cap}")]
    Overflow { len: usize, cap: usize },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl OrganaError {
    pub fn unknown_organism(id: OrganismId) -> Self {
        OrganaError::Population(PopulationError::UnknownOrganism(id))
    }

    pub fn capacity_reached(cap: usize) -> Self {
        OrganaError::Population(PopulationError::CapacityReached { cap })
    }
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        }
    }
}
