//! dirsize-exporter - Budgeted Directory Size Exporter
//!
//! Periodically measures every immediate subdirectory of a parent directory
//! (total size, newest and oldest modification time, entry count) and
//! exports the results as Prometheus gauges.
//!
//! # Features
//!
//! - **IOPS Budget**: Every filesystem call goes through one fixed-window
//!   rate limiter, so a scan never issues more than the configured number
//!   of operations per second.
//!
//! - **Race Tolerant**: Entries that vanish, go stale (NFS) or deny access
//!   while the scan is running are left out of the aggregate instead of
//!   failing it.
//!
//! - **Single Threaded Walk**: Subtrees are scanned one at a time, depth
//!   first, and published as soon as each one finishes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Scan loop (main thread)                       │
//! │   run_cycle ─► SubtreeScan ─► DirectoryAggregator ─► RateLimiter│
//! │                     │                                    │      │
//! │                     │ one record per child               ▼      │
//! │                     ▼                               Filesystem  │
//! │            ┌──────────────────┐                                 │
//! │            │  DirsizeMetrics  │  (latest record per directory)  │
//! │            └────────┬─────────┘                                 │
//! └─────────────────────┼───────────────────────────────────────────┘
//!                       │
//!                       ▼
//!            ┌──────────────────────┐
//!            │ axum: GET /metrics   │  (tokio runtime)
//!            └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Scan /home every hour, at most 100 filesystem operations per second
//! dirsize-exporter /home
//!
//! # Scrape
//! curl http://localhost:8000/metrics
//! ```

pub mod config;
pub mod error;
pub mod exporter;
pub mod fs;
pub mod metrics;
pub mod summary;
pub mod walker;

pub use config::{CliArgs, ExporterConfig};
pub use error::{ExporterError, FsErrorKind, Result, ScanError};
pub use exporter::run_cycle;
pub use metrics::DirsizeMetrics;
pub use walker::{DirectoryAggregator, DirectoryStats, RateLimiter};
