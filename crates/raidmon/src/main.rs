//! raidmon - software RAID health sensor
//!
//! One-shot pass intended to run from cron: discover the active arrays, query
//! each for its member counts, classify the result, and drop one JSON status
//! file per array where the monitoring collector picks it up.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use raidmon::{run_pass, PassOptions, ReportSink, SensorConfig, SensorError};

#[derive(Parser)]
#[command(name = "raidmon", version, about = "Software RAID health sensor")]
struct Cli {
    /// Directory the collector reads sensor reports from
    #[arg(long, value_name = "DIR")]
    sensor_data: Option<PathBuf>,

    /// Print reports to stdout instead of writing files
    #[arg(long)]
    test: bool,

    /// Kernel RAID status table to read
    #[arg(long, value_name = "PATH")]
    mdstat: Option<PathBuf>,

    /// Detail query program
    #[arg(long, value_name = "PROG")]
    mdadm: Option<String>,

    /// Configuration file to use instead of the default search path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();
    let config = SensorConfig::load(cli.config.as_deref())?;

    let sink = if cli.test {
        ReportSink::Console
    } else {
        let dir = cli
            .sensor_data
            .or(config.sensor_data)
            .ok_or(SensorError::DestinationUnspecified)?;
        ReportSink::Directory(dir)
    };

    let opts = PassOptions {
        mdstat: cli.mdstat.unwrap_or(config.mdstat),
        mdadm: cli.mdadm.unwrap_or(config.mdadm),
        sink,
    };

    run_pass(&opts)?;
    Ok(())
}
