//! Configuration System
//!
//! Layered configuration: an optional TOML file merged with `ARBOR__*`
//! environment overrides. CLI flags are applied on top by the binary.

use crate::error::FsError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default persisted-state filename, matching the historical on-disk name.
pub const DEFAULT_STATE_FILE: &str = "directory_structure.txt";

/// Default configuration filename (searched in the working directory).
const CONFIG_BASENAME: &str = "arbor";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArborConfig {
    /// Persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the persisted tree description
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATE_FILE)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

/// Loads configuration from file and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. An explicit path must exist and parse; without
    /// one, `arbor.toml` in the working directory is merged when present.
    /// `ARBOR__SECTION__KEY` environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<ArborConfig, FsError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(explicit) => {
                builder.add_source(config::File::from(explicit.to_path_buf()))
            }
            None => builder.add_source(
                config::File::with_name(CONFIG_BASENAME).required(false),
            ),
        };
        let settings = builder
            .add_source(config::Environment::with_prefix("ARBOR").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
