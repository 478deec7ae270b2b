//! RAID topology health policies
//!
//! Maps each kernel RAID personality to a failure policy:
//! - striped/concatenated layouts die with any member
//! - mirrored layouts degrade gradually
//! - parity layouts tolerate a fixed number of failures
//!
//! Adding a personality means adding one `policy()` table entry, not a new
//! branch in the classifier.

use serde::{Deserialize, Serialize};

/// Ordered health severity assigned to an array.
///
/// `Offline` is reserved for external liveness detection; the classifier
/// never produces it, but the report contract accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Healthy,
    Poor,
    Critical,
    Deceased,
    Offline,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Poor => "poor",
            Severity::Critical => "critical",
            Severity::Deceased => "deceased",
            Severity::Offline => "offline",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kernel RAID personality, as reported in the status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaidLevel {
    Linear,
    Raid0,
    Raid1,
    Raid4,
    Raid5,
    Raid6,
    Raid10,
    Multipath,
    Faulty,
    Container,
}

impl RaidLevel {
    /// Parse a personality token from the kernel status table.
    pub fn from_personality(token: &str) -> Option<Self> {
        match token {
            "linear" => Some(RaidLevel::Linear),
            "raid0" => Some(RaidLevel::Raid0),
            "raid1" => Some(RaidLevel::Raid1),
            "raid4" => Some(RaidLevel::Raid4),
            "raid5" => Some(RaidLevel::Raid5),
            "raid6" => Some(RaidLevel::Raid6),
            "raid10" => Some(RaidLevel::Raid10),
            "multipath" => Some(RaidLevel::Multipath),
            "faulty" => Some(RaidLevel::Faulty),
            "container" => Some(RaidLevel::Container),
            _ => None,
        }
    }

    pub fn personality(self) -> &'static str {
        match self {
            RaidLevel::Linear => "linear",
            RaidLevel::Raid0 => "raid0",
            RaidLevel::Raid1 => "raid1",
            RaidLevel::Raid4 => "raid4",
            RaidLevel::Raid5 => "raid5",
            RaidLevel::Raid6 => "raid6",
            RaidLevel::Raid10 => "raid10",
            RaidLevel::Multipath => "multipath",
            RaidLevel::Faulty => "faulty",
            RaidLevel::Container => "container",
        }
    }

    /// Failure policy for this personality, or `None` when member-failure
    /// counts carry no health meaning (multipath, faulty, container).
    pub fn policy(self) -> Option<FailurePolicy> {
        match self {
            // No redundancy: the array does not survive any member
            RaidLevel::Linear | RaidLevel::Raid0 => Some(FailurePolicy::FatalOnAnyLoss),
            RaidLevel::Raid1 => Some(FailurePolicy::Mirrored),
            // Single parity
            RaidLevel::Raid4 | RaidLevel::Raid5 => {
                Some(FailurePolicy::ParityTolerant { tolerance: 1 })
            }
            // Double parity
            RaidLevel::Raid6 => Some(FailurePolicy::ParityTolerant { tolerance: 2 }),
            // Mirror+stripe nest; only one failure is guaranteed survivable
            RaidLevel::Raid10 => Some(FailurePolicy::ParityTolerant { tolerance: 1 }),
            RaidLevel::Multipath | RaidLevel::Faulty | RaidLevel::Container => None,
        }
    }

    /// Whether this sensor monitors arrays of this personality.
    pub fn is_supported(self) -> bool {
        self.policy().is_some()
    }
}

/// How a topology reacts to member failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Data is striped or concatenated with no redundancy.
    FatalOnAnyLoss,
    /// Every member carries a full copy of the data.
    Mirrored,
    /// The layout survives up to `tolerance` simultaneous failures.
    ParityTolerant { tolerance: u64 },
}

impl FailurePolicy {
    /// Severity of `failed_devices` failures out of `raid_devices` members.
    pub fn severity(self, raid_devices: u64, failed_devices: u64) -> Severity {
        if failed_devices == 0 {
            return Severity::Healthy;
        }

        match self {
            FailurePolicy::FatalOnAnyLoss => Severity::Deceased,
            FailurePolicy::Mirrored => {
                if failed_devices >= raid_devices {
                    // Array is unusable
                    Severity::Deceased
                } else if raid_devices - failed_devices >= 2 {
                    // Data is safe, mirroring can continue to occur
                    Severity::Poor
                } else {
                    // Data is safe, but no mirroring is occurring
                    Severity::Critical
                }
            }
            FailurePolicy::ParityTolerant { tolerance } => {
                if failed_devices > tolerance {
                    Severity::Deceased
                } else {
                    Severity::Critical
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Healthy < Severity::Poor);
        assert!(Severity::Poor < Severity::Critical);
        assert!(Severity::Critical < Severity::Deceased);
    }

    #[test]
    fn severity_serializes_lowercase() {
        for (severity, name) in [
            (Severity::Healthy, "\"healthy\""),
            (Severity::Poor, "\"poor\""),
            (Severity::Critical, "\"critical\""),
            (Severity::Deceased, "\"deceased\""),
            (Severity::Offline, "\"offline\""),
        ] {
            assert_eq!(serde_json::to_string(&severity).unwrap(), name);
        }
    }

    #[test]
    fn zero_failures_is_healthy_for_every_supported_level() {
        for level in [
            RaidLevel::Linear,
            RaidLevel::Raid0,
            RaidLevel::Raid1,
            RaidLevel::Raid4,
            RaidLevel::Raid5,
            RaidLevel::Raid6,
            RaidLevel::Raid10,
        ] {
            let policy = level.policy().unwrap();
            assert_eq!(policy.severity(4, 0), Severity::Healthy, "{:?}", level);
        }
    }

    #[test]
    fn striped_dies_with_any_member() {
        let policy = RaidLevel::Raid0.policy().unwrap();
        for raid_devices in 1..=8 {
            assert_eq!(policy.severity(raid_devices, 1), Severity::Deceased);
        }
    }

    #[test]
    fn mirrored_degrades_gradually() {
        let policy = RaidLevel::Raid1.policy().unwrap();
        assert_eq!(policy.severity(4, 0), Severity::Healthy);
        assert_eq!(policy.severity(4, 1), Severity::Poor);
        assert_eq!(policy.severity(4, 2), Severity::Poor);
        assert_eq!(policy.severity(4, 3), Severity::Critical);
        assert_eq!(policy.severity(4, 4), Severity::Deceased);
    }

    #[test]
    fn single_parity_tolerates_one_failure() {
        let policy = RaidLevel::Raid5.policy().unwrap();
        assert_eq!(policy.severity(5, 0), Severity::Healthy);
        assert_eq!(policy.severity(5, 1), Severity::Critical);
        assert_eq!(policy.severity(5, 2), Severity::Deceased);
        assert_eq!(policy.severity(5, 3), Severity::Deceased);
    }

    #[test]
    fn double_parity_tolerates_two_failures() {
        let policy = RaidLevel::Raid6.policy().unwrap();
        assert_eq!(policy.severity(6, 1), Severity::Critical);
        assert_eq!(policy.severity(6, 2), Severity::Critical);
        assert_eq!(policy.severity(6, 3), Severity::Deceased);
    }

    #[test]
    fn nested_mirror_stripe_guarantees_one_failure() {
        let policy = RaidLevel::Raid10.policy().unwrap();
        assert_eq!(policy.severity(4, 1), Severity::Critical);
        assert_eq!(policy.severity(4, 2), Severity::Deceased);
    }

    #[test]
    fn passthrough_personalities_have_no_policy() {
        assert!(RaidLevel::Multipath.policy().is_none());
        assert!(RaidLevel::Faulty.policy().is_none());
        assert!(RaidLevel::Container.policy().is_none());
        assert!(!RaidLevel::Container.is_supported());
    }

    #[test]
    fn personality_round_trip() {
        for token in [
            "linear",
            "raid0",
            "raid1",
            "raid4",
            "raid5",
            "raid6",
            "raid10",
            "multipath",
            "faulty",
            "container",
        ] {
            let level = RaidLevel::from_personality(token).unwrap();
            assert_eq!(level.personality(), token);
        }
        assert!(RaidLevel::from_personality("raid7").is_none());
    }
}
