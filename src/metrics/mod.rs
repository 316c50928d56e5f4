//! Gauges published for each scanned directory
//!
//! [`DirsizeMetrics`] keeps the latest record per directory name. Each
//! publish overwrites the previous values for that name. The HTTP server
//! renders a snapshot in Prometheus text exposition format on every scrape.

mod format;
pub mod server;

pub use format::render_metrics;

use crate::walker::{unix_seconds, DirectoryStats};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Metric name prefix
pub const NAMESPACE: &str = "dirsize";

/// Label carrying the directory name
pub const DIRECTORY_LABEL: &str = "directory";

/// Gauge families: (suffix, help)
const TOTAL_SIZE: (&str, &str) = ("total_size_bytes", "Total Size of the Directory (in bytes)");
const LATEST_MTIME: (&str, &str) = (
    "latest_mtime",
    "Newest modified file in the directory (as unix timestamp)",
);
const OLDEST_MTIME: (&str, &str) = (
    "oldest_mtime",
    "Oldest modified file in the directory (as unix timestamp)",
);
const ENTRIES_COUNT: (&str, &str) = (
    "entries_count",
    "Total number of entries (files, directories & links) in the directory",
);
const PROCESSING_TIME: (&str, &str) = (
    "processing_time",
    "Time it took to process the directory (in seconds)",
);
const LAST_UPDATED: (&str, &str) = (
    "last_updated_ns",
    "Last time this directory was processed (as unix timestamp in nanoseconds)",
);

/// A single gauge sample with labels and value
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub name: String,
    pub help: &'static str,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl Gauge {
    fn new(family: (&str, &'static str), directory: &str, value: f64) -> Self {
        Self {
            name: format!("{}_{}", NAMESPACE, family.0),
            help: family.1,
            labels: vec![(DIRECTORY_LABEL, directory.to_string())],
            value,
        }
    }
}

/// Last published values for one directory
#[derive(Debug, Clone)]
struct Published {
    stats: DirectoryStats,
    at: SystemTime,
}

/// Registry of the latest record per directory
#[derive(Debug, Clone)]
pub struct DirsizeMetrics {
    records: Arc<RwLock<BTreeMap<String, Published>>>,
    detailed_processing_time: bool,
}

impl DirsizeMetrics {
    /// `detailed_processing_time` toggles the processing-time gauge
    pub fn new(detailed_processing_time: bool) -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            detailed_processing_time,
        }
    }

    /// Overwrite the gauges for `stats.name()`, stamping the current time
    pub fn publish(&self, stats: DirectoryStats) {
        self.publish_at(stats, SystemTime::now());
    }

    fn publish_at(&self, stats: DirectoryStats, at: SystemTime) {
        let name = stats.name();
        let mut records = self.records.write();
        records.insert(name, Published { stats, at });
    }

    /// Number of directories with published values
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current gauge samples, grouped by family
    pub fn gauges(&self) -> Vec<Gauge> {
        let records = self.records.read();
        let mut gauges = Vec::new();

        push_family(&mut gauges, &records, TOTAL_SIZE, |p| {
            p.stats.total_size() as f64
        });
        push_family(&mut gauges, &records, LATEST_MTIME, |p| {
            unix_seconds(p.stats.latest_modified())
        });
        push_family(&mut gauges, &records, OLDEST_MTIME, |p| {
            unix_seconds(p.stats.oldest_modified())
        });
        push_family(&mut gauges, &records, ENTRIES_COUNT, |p| {
            p.stats.entry_count() as f64
        });
        if self.detailed_processing_time {
            push_family(&mut gauges, &records, PROCESSING_TIME, |p| {
                p.stats.processing_time().as_secs_f64()
            });
        }
        push_family(&mut gauges, &records, LAST_UPDATED, |p| {
            p.at.duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as f64)
                .unwrap_or(0.0)
        });

        gauges
    }

    /// Snapshot rendered in Prometheus text format
    pub fn render(&self) -> String {
        render_metrics(&self.gauges())
    }
}

fn push_family(
    gauges: &mut Vec<Gauge>,
    records: &BTreeMap<String, Published>,
    family: (&str, &'static str),
    value: impl Fn(&Published) -> f64,
) {
    for (directory, published) in records {
        gauges.push(Gauge::new(family, directory, value(published)));
    }
}
