//! Array discovery from the kernel RAID status table
//!
//! Parses `/proc/mdstat` and yields every active array with a supported
//! personality. The table's first line lists the loaded personalities and is
//! skipped; each array entry looks like:
//!
//! ```text
//! md0 : active raid1 sdb1[1] sda1[0]
//! ```
//!
//! Lines that do not have that shape are skipped rather than failing the
//! whole scan.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::SensorError;
use crate::policy::RaidLevel;

/// One active array from the status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRecord {
    /// Kernel device name, e.g. `md0`.
    pub device: String,
    /// RAID personality of the array.
    pub level: RaidLevel,
    /// Member device names with their role suffix stripped.
    pub members: Vec<String>,
}

/// Read the status table from `path`.
pub fn read_mdstat(path: &Path) -> Result<String, SensorError> {
    fs::read_to_string(path).map_err(|source| SensorError::Mdstat {
        path: PathBuf::from(path),
        source,
    })
}

/// Parse the status table into array records, in table order.
///
/// Re-parsing an unchanged table yields an identical sequence.
pub fn parse_mdstat(content: &str) -> Vec<ArrayRecord> {
    let device_re = Regex::new(r"^(md\d+) : (.+)$").unwrap();
    let member_re = Regex::new(r"(\w+)\[.+?\]").unwrap();

    let mut records = Vec::new();
    for line in content.lines().skip(1) {
        let line = line.trim();
        let caps = match device_re.captures(line) {
            Some(caps) => caps,
            None => continue,
        };

        let device = &caps[1];
        let fields: Vec<&str> = caps[2].split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }

        if fields[0] != "active" {
            debug!("skipping '{}': run state is '{}'", device, fields[0]);
            continue;
        }

        let level = match RaidLevel::from_personality(fields[1]) {
            Some(level) if level.is_supported() => level,
            _ => {
                debug!("skipping '{}': unsupported personality '{}'", device, fields[1]);
                continue;
            }
        };

        let members = fields[2..]
            .iter()
            .filter_map(|field| member_re.captures(field))
            .map(|caps| caps[1].to_string())
            .collect();

        records.push(ArrayRecord {
            device: device.to_string(),
            level,
            members,
        });
    }

    records
}
