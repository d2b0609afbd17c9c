//! # Organa Core
//!
//! Shared building blocks for the organa population loop:
//!
//! - **types** - organism ids, declared metric ranges, phase arithmetic
//! - **history** - fixed-capacity ring buffer used for per-organism samples
//! - **random** - the single injectable random source seam
//! - **config** - tunable simulation parameters with validated defaults
//! - **error** - structured errors for lookups, insertion and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use organa_core::prelude::*;
//!
//! // Bounded metrics clamp instead of escaping their range
//! assert_eq!(DECOHERENCE_RANGE.clamp(0.31), 0.3);
//!
//! // A deterministic random source for reproducible runs
//! let mut source = SeededSource::from_seed(42);
//! let x = source.next_f64();
//! assert!((0.0..1.0).contains(&x));
//! ```

pub mod types;
pub mod history;
pub mod random;
pub mod config;
pub mod error;
pub mod prelude;
