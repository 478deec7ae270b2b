//! Per-array detail query
//!
//! Invokes `mdadm --detail` for one array and extracts the member counts the
//! classifier needs. `Raid Devices` and `Total Devices` are treated as
//! invariants of the tool's output; `Failed Devices` is only consulted when
//! the two disagree.

use std::path::Path;
use std::process::Command;

use regex::Regex;
use tracing::debug;

use crate::error::SensorError;

/// Member counts reported for one array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDetail {
    /// Members the array is configured for.
    pub raid_devices: u64,
    /// Members currently present.
    pub total_devices: u64,
    /// Members marked failed; 0 whenever the counts above agree.
    pub failed_devices: u64,
}

/// Run the detail query for `device` and extract its member counts.
///
/// The child process is run to completion before returning. A spawn failure
/// or nonzero exit status is fatal for the pass.
pub fn fetch_detail(mdadm: &str, device: &str) -> Result<ArrayDetail, SensorError> {
    let device_path = Path::new("/dev").join(device);
    debug!("querying {} for '{}'", mdadm, device_path.display());

    let output = Command::new(mdadm)
        .arg("--detail")
        .arg(&device_path)
        .output()
        .map_err(|source| SensorError::DetailSpawn {
            device: device.to_string(),
            program: mdadm.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SensorError::DetailQuery {
            device: device.to_string(),
            status: output.status,
        });
    }

    parse_detail(device, &String::from_utf8_lossy(&output.stdout))
}

/// Extract the member counts from detail query output.
pub fn parse_detail(device: &str, output: &str) -> Result<ArrayDetail, SensorError> {
    let raid_devices = extract_fact(output, "Raid Devices", device)?;
    let total_devices = extract_fact(output, "Total Devices", device)?;

    let failed_devices = if raid_devices != total_devices {
        extract_fact(output, "Failed Devices", device)?
    } else {
        0
    };

    Ok(ArrayDetail {
        raid_devices,
        total_devices,
        failed_devices,
    })
}

fn extract_fact(output: &str, fact: &'static str, device: &str) -> Result<u64, SensorError> {
    let pattern = Regex::new(&format!(r"{} : (\d+)", fact)).unwrap();
    pattern
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| SensorError::MissingFact {
            fact,
            device: device.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEALTHY_OUTPUT: &str = "\
/dev/md0:
           Version : 1.2
     Creation Time : Sat Mar  2 10:14:12 2024
        Raid Level : raid1
        Array Size : 1953382400 (1862.89 GiB 2000.26 GB)
      Raid Devices : 4
     Total Devices : 4
       Persistence : Superblock is persistent
             State : clean
    Active Devices : 4
   Working Devices : 4
";

    const DEGRADED_OUTPUT: &str = "\
/dev/md0:
        Raid Level : raid1
      Raid Devices : 4
     Total Devices : 3
             State : clean, degraded
    Active Devices : 3
   Working Devices : 3
    Failed Devices : 1
";

    #[test]
    fn extracts_counts_from_healthy_output() {
        let detail = parse_detail("md0", HEALTHY_OUTPUT).unwrap();
        assert_eq!(
            detail,
            ArrayDetail {
                raid_devices: 4,
                total_devices: 4,
                failed_devices: 0,
            }
        );
    }

    #[test]
    fn equal_counts_never_consult_the_failed_fact() {
        // No "Failed Devices" line at all; must still succeed with 0
        let detail = parse_detail("md0", HEALTHY_OUTPUT).unwrap();
        assert_eq!(detail.failed_devices, 0);
    }

    #[test]
    fn extracts_failed_count_when_counts_differ() {
        let detail = parse_detail("md0", DEGRADED_OUTPUT).unwrap();
        assert_eq!(detail.raid_devices, 4);
        assert_eq!(detail.total_devices, 3);
        assert_eq!(detail.failed_devices, 1);
    }

    #[test]
    fn missing_raid_devices_is_fatal() {
        let err = parse_detail("md0", "Total Devices : 4\n").unwrap_err();
        match err {
            SensorError::MissingFact { fact, device } => {
                assert_eq!(fact, "Raid Devices");
                assert_eq!(device, "md0");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_total_devices_is_fatal() {
        let err = parse_detail("md0", "Raid Devices : 4\n").unwrap_err();
        assert!(matches!(
            err,
            SensorError::MissingFact {
                fact: "Total Devices",
                ..
            }
        ));
    }

    #[test]
    fn missing_failed_fact_is_fatal_when_counts_differ() {
        let output = "Raid Devices : 4\nTotal Devices : 3\n";
        let err = parse_detail("md0", output).unwrap_err();
        assert!(matches!(
            err,
            SensorError::MissingFact {
                fact: "Failed Devices",
                ..
            }
        ));
    }
}
