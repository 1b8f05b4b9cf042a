//! Persisted application preferences.
//!
//! Remembers where the user last saved or exported so prompts can suggest the
//! same place next time. Stored as pretty JSON under the platform config
//! directory; `FINANCE_CORE_HOME` overrides the base directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{FormatError, TrackerError};
use crate::storage;

const APP_DIR: &str = "finance_core";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_snapshot_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_csv_path: Option<PathBuf>,
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TrackerError> {
        Self::from_base(resolve_base())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        Self::from_base(base.into())
    }

    fn from_base(base: PathBuf) -> Result<Self, TrackerError> {
        storage::ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored config, or the default when none has been saved yet.
    pub fn load(&self) -> Result<Config, TrackerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data).map_err(FormatError::from)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        let json = serde_json::to_string_pretty(config).map_err(FormatError::from)?;
        storage::write_atomic(&self.path, &json)?;
        Ok(())
    }
}

fn resolve_base() -> PathBuf {
    if let Some(home) = std::env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(home);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
