//! Sensor fault taxonomy
//!
//! Every condition that ends a classification pass is an explicit variant
//! here. In particular, an array whose personality has no health policy is a
//! hard fault, never a silent "healthy".

use std::path::PathBuf;

/// Errors from a classification pass.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    /// The kernel status table could not be read.
    #[error("failed to read RAID status table '{}': {source}", path.display())]
    Mdstat {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The detail query program could not be started.
    #[error("failed to run '{program}' for array '{device}': {source}")]
    DetailSpawn {
        device: String,
        program: String,
        source: std::io::Error,
    },

    /// The detail query ran but reported failure.
    #[error("detail query for array '{device}' exited with {status}")]
    DetailQuery {
        device: String,
        status: std::process::ExitStatus,
    },

    /// A mandatory fact was absent from the detail query output.
    #[error("failed to locate '{fact}' in detail output for array '{device}'")]
    MissingFact {
        fact: &'static str,
        device: String,
    },

    /// An array reached the classifier without a health policy.
    #[error("RAID personality '{personality}' of array '{device}' has no health policy")]
    UnsupportedTopology {
        device: String,
        personality: String,
    },

    /// Discovery yielded no supported, active arrays.
    #[error("there appear to be no active RAID arrays on this system")]
    NoArraysFound,

    /// No sensor data directory was given outside test mode.
    #[error("a valid sensor data directory must be specified")]
    DestinationUnspecified,

    /// The sensor data directory does not exist.
    #[error(
        "sensor data directory '{}' does not exist (is the collector running on this system?)",
        path.display()
    )]
    DestinationMissing { path: PathBuf },

    /// A sensor report could not be written.
    #[error("failed to write sensor report '{}': {source}", path.display())]
    Emit {
        path: PathBuf,
        source: std::io::Error,
    },
}
