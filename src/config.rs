//! Configuration types for dirsize-exporter
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Default IOPS budget (operations per second)
pub const DEFAULT_IOPS_BUDGET: u32 = 100;

/// Export disk usage of each subdirectory as Prometheus gauges
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirsize-exporter",
    version,
    about = "Export per-directory disk usage as Prometheus metrics",
    long_about = "Periodically walks every immediate subdirectory of PARENT_DIR and exports\n\
                  its total size, newest and oldest modification time and entry count.\n\n\
                  Filesystem operations are throttled to --iops-budget per second so the\n\
                  scan can run against busy (including network) filesystems.",
    after_help = "EXAMPLES:\n    \
        dirsize-exporter /home\n    \
        dirsize-exporter /mnt/nfs/home --iops-budget 50 --wait-time-minutes 30\n    \
        dirsize-exporter /data --port 9100 --enable-detailed-processing-time-metric"
)]
pub struct CliArgs {
    /// Directory whose immediate subdirectories are measured
    #[arg(value_name = "PARENT_DIR")]
    pub parent_dir: PathBuf,

    /// Maximum filesystem operations per second
    #[arg(
        short = 'i',
        long,
        env = "DIRSIZE_IOPS_BUDGET",
        default_value_t = DEFAULT_IOPS_BUDGET,
        value_name = "NUM"
    )]
    pub iops_budget: u32,

    /// Minutes to wait between scans
    #[arg(short = 'w', long, default_value = "60", value_name = "MINUTES")]
    pub wait_time_minutes: u64,

    /// Also export how long each directory took to scan
    #[arg(long)]
    pub enable_detailed_processing_time_metric: bool,

    /// Port for the metrics endpoint
    #[arg(short = 'p', long, default_value = "8000", value_name = "PORT")]
    pub port: u16,

    /// Address for the metrics endpoint
    #[arg(long, default_value = "0.0.0.0", value_name = "ADDR")]
    pub bind: String,

    /// Verbose output (show skipped directories and throttling)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Absolute path of the parent directory
    pub parent_dir: PathBuf,

    /// Filesystem operations per second
    pub iops_budget: u32,

    /// Pause between scan cycles
    pub wait_time: Duration,

    /// Export the processing-time gauge
    pub detailed_processing_time: bool,

    /// Metrics endpoint address
    pub listen_addr: SocketAddr,

    /// Verbose logging
    pub verbose: bool,
}

impl ExporterConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.iops_budget == 0 {
            return Err(ConfigError::InvalidIopsBudget {
                budget: args.iops_budget,
            });
        }

        if args.wait_time_minutes == 0 {
            return Err(ConfigError::InvalidWaitTime {
                minutes: args.wait_time_minutes,
            });
        }

        let parent_dir = args
            .parent_dir
            .canonicalize()
            .map_err(|e| ConfigError::InvalidParentDir {
                path: args.parent_dir.clone(),
                reason: e.to_string(),
            })?;
        if !parent_dir.is_dir() {
            return Err(ConfigError::InvalidParentDir {
                path: args.parent_dir,
                reason: "Not a directory".to_string(),
            });
        }

        let ip: IpAddr = args
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddress {
                addr: args.bind.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            parent_dir,
            iops_budget: args.iops_budget,
            wait_time: Duration::from_secs(args.wait_time_minutes * 60),
            detailed_processing_time: args.enable_detailed_processing_time_metric,
            listen_addr: SocketAddr::new(ip, args.port),
            verbose: args.verbose,
        })
    }
}
