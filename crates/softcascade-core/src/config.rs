//! TOML configuration for the cascade behavior.
//!
//! ```toml
//! debug = false
//!
//! [restore]
//! window_secs = 60
//! mode = "truncate" # or "distance"
//! ```
//!
//! Every key is optional; an empty document yields the defaults.

use crate::cascade::{CascadePolicy, RestoreMatch, RestoreWindow};
use serde::Deserialize;
use std::{fs, io, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read cascade config '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("invalid cascade config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// CascadeConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CascadeConfig {
    /// Emit `[debug]` lines while cascading.
    pub debug: bool,
    pub restore: RestoreConfig,
}

impl CascadeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn policy(&self) -> CascadePolicy {
        CascadePolicy {
            window: self.restore.window(),
            debug: self.debug,
        }
    }
}

///
/// RestoreConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RestoreConfig {
    pub window_secs: u64,
    pub mode: RestoreMatch,
}

impl RestoreConfig {
    #[must_use]
    pub const fn window(&self) -> RestoreWindow {
        RestoreWindow {
            secs: self.window_secs,
            mode: self.mode,
        }
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            window_secs: RestoreWindow::DEFAULT_SECS,
            mode: RestoreMatch::default(),
        }
    }
}

///
/// TESTS
///
