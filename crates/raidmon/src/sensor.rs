//! The classification pass
//!
//! Discover, query, classify, emit; one array at a time, run to completion.
//! A fatal fault aborts the remaining queue rather than skipping the array.

use std::path::PathBuf;

use tracing::info;

use crate::classify::classify;
use crate::detail::fetch_detail;
use crate::error::SensorError;
use crate::mdstat::{parse_mdstat, read_mdstat};
use crate::report::{echo_report, write_report};

/// Where reports go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    /// Write one `<device>.json` per array into this directory.
    Directory(PathBuf),
    /// Print each report to stdout (test mode).
    Console,
}

/// Inputs for one classification pass.
#[derive(Debug, Clone)]
pub struct PassOptions {
    /// Kernel RAID status table.
    pub mdstat: PathBuf,
    /// Detail query program.
    pub mdadm: String,
    pub sink: ReportSink,
}

/// Run one pass over the local arrays.
///
/// Returns the number of arrays classified; zero arrays is the
/// [`SensorError::NoArraysFound`] fault. The destination is validated before
/// any classification work begins.
pub fn run_pass(opts: &PassOptions) -> Result<usize, SensorError> {
    if let ReportSink::Directory(dir) = &opts.sink {
        if !dir.is_dir() {
            return Err(SensorError::DestinationMissing { path: dir.clone() });
        }
    }

    let table = read_mdstat(&opts.mdstat)?;
    let records = parse_mdstat(&table);
    info!("discovered {} active array(s)", records.len());

    for record in &records {
        let detail = fetch_detail(&opts.mdadm, &record.device)?;
        let report = classify(record, &detail)?;

        match &opts.sink {
            ReportSink::Directory(dir) => write_report(dir, &report)?,
            ReportSink::Console => echo_report(&report),
        }
    }

    if records.is_empty() {
        return Err(SensorError::NoArraysFound);
    }

    Ok(records.len())
}
