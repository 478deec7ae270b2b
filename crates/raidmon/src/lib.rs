//! raidmon - RAID array health sensor
//!
//! Inspects the kernel RAID status table, queries each active array for its
//! member counts, classifies the result into an ordered health severity, and
//! emits one JSON status file per array for the monitoring collector.
//!
//! Pipeline: discovery ([`mdstat`]) → detail query ([`detail`]) →
//! classification ([`classify`] over [`policy`]) → emission ([`report`]).

pub mod classify;
pub mod config;
pub mod detail;
pub mod error;
pub mod mdstat;
pub mod policy;
pub mod report;
pub mod sensor;

pub use classify::HealthReport;
pub use config::SensorConfig;
pub use detail::ArrayDetail;
pub use error::SensorError;
pub use mdstat::ArrayRecord;
pub use policy::{FailurePolicy, RaidLevel, Severity};
pub use sensor::{run_pass, PassOptions, ReportSink};
