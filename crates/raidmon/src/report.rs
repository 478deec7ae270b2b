//! Sensor report emission
//!
//! Serializes health reports into the collector's status-file contract:
//! one `<device>.json` per array, fully overwritten on every pass. Test mode
//! prints the same payload to stdout instead of touching the filesystem.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::HealthReport;
use crate::error::SensorError;
use crate::policy::Severity;

/// On-disk sensor event payload consumed by the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReport {
    pub sensor_name: String,
    pub sensor_state: Severity,
    pub sensor_message: String,
}

impl SensorReport {
    pub fn new(report: &HealthReport) -> Self {
        SensorReport {
            sensor_name: format!("raid_monitor_{}", report.device),
            sensor_state: report.severity,
            sensor_message: report.message.clone(),
        }
    }
}

/// Status file name for one array.
pub fn report_filename(device: &str) -> String {
    format!("{}.json", device)
}

/// Write the report into the sensor data directory, replacing any previous
/// report for the same array.
pub fn write_report(dir: &Path, report: &HealthReport) -> Result<(), SensorError> {
    let path = dir.join(report_filename(&report.device));
    let json = render(report);

    fs::write(&path, &json).map_err(|source| SensorError::Emit {
        path: path.clone(),
        source,
    })?;

    info!("wrote {} ({})", path.display(), report.severity);
    Ok(())
}

/// Print the report to stdout in test mode.
pub fn echo_report(report: &HealthReport) {
    println!("{}: {}", report_filename(&report.device), render(report));
}

fn render(report: &HealthReport) -> String {
    // SensorReport contains only strings; serialization cannot fail
    serde_json::to_string(&SensorReport::new(report)).expect("sensor report serialization")
}
