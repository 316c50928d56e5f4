//! Per-cycle scan summary for the logs

use crate::walker::DirectoryStats;
use humansize::{format_size, BINARY};
use std::time::Duration;
use tracing::info;

/// Totals for one scan cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub directories: u64,
    pub bytes: u64,
    pub entries: u64,
    pub fs_ops: u64,
    pub throttled: u64,
    pub duration: Duration,
}

impl CycleSummary {
    /// Fold one published record in
    pub fn record(&mut self, stats: &DirectoryStats) {
        self.directories += 1;
        self.bytes += stats.total_size();
        self.entries += stats.entry_count();
    }

    /// Filesystem operations per second over the cycle
    pub fn ops_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.fs_ops as f64 / secs
        } else {
            0.0
        }
    }

    pub fn log(&self) {
        info!(
            directories = self.directories,
            throttled = self.throttled,
            "Scan complete: {} entries, {} in {:.1}s ({} fs ops, {:.0}/s)",
            format_number(self.entries),
            format_size(self.bytes, BINARY),
            self.duration.as_secs_f64(),
            format_number(self.fs_ops),
            self.ops_per_second(),
        );
    }
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}
