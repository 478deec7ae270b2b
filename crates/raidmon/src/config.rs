//! Sensor configuration
//!
//! Optional TOML file, every field defaulted:
//!
//! ```toml
//! mdstat = "/proc/mdstat"
//! mdadm = "mdadm"
//! sensor_data = "/var/lib/dashd/sensors"
//! ```
//!
//! Search order: `/etc/raidmon/config.toml`, then
//! `~/.config/raidmon/config.toml`. A missing file falls back to defaults; a
//! file named on the command line must parse.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Sensor configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Kernel RAID status table.
    #[serde(default = "default_mdstat")]
    pub mdstat: PathBuf,

    /// Program used for the per-array detail query.
    #[serde(default = "default_mdadm")]
    pub mdadm: String,

    /// Sensor data directory used when `--sensor-data` is not given.
    #[serde(default)]
    pub sensor_data: Option<PathBuf>,
}

fn default_mdstat() -> PathBuf {
    PathBuf::from("/proc/mdstat")
}

fn default_mdadm() -> String {
    "mdadm".to_string()
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            mdstat: default_mdstat(),
            mdadm: default_mdadm(),
            sensor_data: None,
        }
    }
}

impl SensorConfig {
    /// Load configuration, preferring `explicit` when given.
    ///
    /// An explicit file that is missing or malformed is an error; files on
    /// the default search path are best-effort.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            return toml::from_str(&content)
                .with_context(|| format!("failed to parse config file '{}'", path.display()));
        }

        for path in Self::search_paths() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(err) => {
                        warn!("ignoring malformed config '{}': {}", path.display(), err);
                    }
                },
                Err(_) => continue,
            }
        }

        Ok(SensorConfig::default())
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/raidmon/config.toml")];
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/raidmon/config.toml"));
        }
        paths
    }
}
