//! Run configuration with documented defaults
//!
//! Everything the driver may want to tune about a run lives here. The engine
//! itself has no knobs: tick semantics are fixed.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::error::{CircuitError, Result};

/// Configuration for a full circuit run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Ticks between progress snapshots
    ///
    /// A snapshot is also always taken on the tick the circuit finishes.
    pub progress_interval: u64,

    /// Optional tick budget
    ///
    /// Mirror layouts can trap a photon in a cycle that never reaches an
    /// absorbing cell. When set, the run stops after this many ticks even if
    /// photons are still live.
    pub max_ticks: Option<u64>,

    /// Directory that receives `emit_photons.out`, `activation_times.out`
    /// and `total_energy.out`. Nothing is written when unset.
    pub output_dir: Option<PathBuf>,

    /// Maximum emitters accepted by the interactive intake
    pub max_emitters: usize,

    /// Maximum receivers accepted by the interactive intake
    pub max_receivers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            progress_interval: 5,
            max_ticks: None,
            output_dir: None,
            max_emitters: 10,
            max_receivers: 10,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.progress_interval == 0 {
            return Err("progress_interval must be at least 1".into());
        }

        if self.max_ticks == Some(0) {
            return Err("max_ticks must be at least 1 when set".into());
        }

        // Symbol alphabets cap how many components of each kind can exist
        if self.max_emitters > 10 || self.max_receivers > 10 {
            return Err(format!(
                "max_emitters ({}) and max_receivers ({}) cannot exceed 10",
                self.max_emitters, self.max_receivers
            ));
        }

        Ok(())
    }

    /// Parse and validate a TOML configuration
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: RunConfig =
            toml::from_str(content).map_err(|e| CircuitError::Config(e.to_string()))?;
        config.validate().map_err(CircuitError::Config)?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}
