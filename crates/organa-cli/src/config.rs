//! Configuration management for the Organa CLI.

use anyhow::{Context, Result};
use organa::prelude::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "organa.toml";

/// Organa project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub driver: DriverConfig,
}

/// How the headless driver feeds the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Seconds per tick.
    #[serde(default = "default_delta")]
    pub delta_seconds: f64,
    #[serde(default)]
    pub pressure: f64,
    /// Observe the weakest organism every N ticks (0 = never).
    #[serde(default)]
    pub observe_every: u64,
}

// Default value functions
fn default_ticks() -> u64 { 600 }
fn default_delta() -> f64 { 0.016 }

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            delta_seconds: default_delta(),
            pressure: 0.0,
            observe_every: 0,
        }
    }
}

impl Config {
    /// Load config from organa.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .simulation
            .validate()
            .with_context(|| format!("Invalid [simulation] table in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
    }
}

/// Find organa.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
