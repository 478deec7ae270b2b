//! Health classification
//!
//! Pure function from one array's facts to a severity and a human-readable
//! message. Same inputs always yield the same report.

use crate::detail::ArrayDetail;
use crate::error::SensorError;
use crate::mdstat::ArrayRecord;
use crate::policy::Severity;

/// Health verdict for one array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Kernel device name, e.g. `md0`.
    pub device: String,
    pub severity: Severity,
    pub message: String,
}

/// Classify one array from its discovery record and detail counts.
pub fn classify(record: &ArrayRecord, detail: &ArrayDetail) -> Result<HealthReport, SensorError> {
    let policy = record
        .level
        .policy()
        .ok_or_else(|| SensorError::UnsupportedTopology {
            device: record.device.clone(),
            personality: record.level.personality().to_string(),
        })?;

    let severity = policy.severity(detail.raid_devices, detail.failed_devices);
    let level = record.level.personality().to_uppercase();

    let message = if detail.failed_devices > 0 {
        format!(
            "{} '{}' is reporting {}/{} failing RAID members.",
            level, record.device, detail.failed_devices, detail.raid_devices
        )
    } else {
        format!(
            "{} '{}' reports {}/{} members operating normally.",
            level, record.device, detail.raid_devices, detail.total_devices
        )
    };

    Ok(HealthReport {
        device: record.device.clone(),
        severity,
        message,
    })
}
