//! Run configuration: an optional TOML file overridden by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use gridfinder_paths::PropagationConfig;

use crate::error::CliError;

/// Settings for `gridfinder run`.
///
/// Every field may be omitted from the file; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Distance at or below which a cell counts as part of the network.
    pub tolerance: f64,
    /// Costs at or above this value are impassable.
    pub barrier: f64,
    /// Directory for per-percent distance snapshots.
    pub snapshot_dir: Option<PathBuf>,
    /// Suppress progress logging.
    pub silent: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            barrier: f64::INFINITY,
            snapshot_dir: None,
            silent: false,
        }
    }
}

/// CLI-level overrides; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub tolerance: Option<f64>,
    pub barrier: Option<f64>,
    pub snapshot_dir: Option<PathBuf>,
    pub silent: bool,
}

impl RunConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, CliError> {
        let config: Self = toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.propagation().validate()?;
        Ok(config)
    }

    /// Load the file at `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Apply CLI overrides on top of this configuration. Fails if the
    /// merged barrier is NaN.
    pub fn merge(mut self, overrides: RunOverrides) -> Result<Self, CliError> {
        if let Some(t) = overrides.tolerance {
            self.tolerance = t;
        }
        if let Some(b) = overrides.barrier {
            self.barrier = b;
        }
        if overrides.snapshot_dir.is_some() {
            self.snapshot_dir = overrides.snapshot_dir;
        }
        self.silent |= overrides.silent;
        self.propagation().validate()?;
        Ok(self)
    }

    /// The propagation settings carried by this configuration.
    pub fn propagation(&self) -> PropagationConfig {
        PropagationConfig {
            barrier: self.barrier,
        }
    }
}
