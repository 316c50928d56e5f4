//! Aggregated statistics for one subtree

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Result of one full traversal of a subtree
///
/// Built once by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStats {
    path: PathBuf,
    total_size: u64,
    latest_modified: SystemTime,
    oldest_modified: SystemTime,
    entry_count: u64,
    processing_time: Duration,
}

impl DirectoryStats {
    pub fn new(
        path: impl Into<PathBuf>,
        total_size: u64,
        latest_modified: SystemTime,
        oldest_modified: SystemTime,
        entry_count: u64,
        processing_time: Duration,
    ) -> Self {
        debug_assert!(oldest_modified <= latest_modified);
        debug_assert!(entry_count >= 1);
        Self {
            path: path.into(),
            total_size,
            latest_modified,
            oldest_modified,
            entry_count,
            processing_time,
        }
    }

    /// Same record, identified by `name` instead of its full path
    pub(crate) fn renamed(self, name: impl Into<PathBuf>) -> Self {
        Self {
            path: name.into(),
            ..self
        }
    }

    /// Full path while scanning, base name once reported at the top level
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Label used when publishing
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Bytes used by the subtree root and every file/symlink below it
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn latest_modified(&self) -> SystemTime {
        self.latest_modified
    }

    pub fn oldest_modified(&self) -> SystemTime {
        self.oldest_modified
    }

    /// Entries in the subtree, the root included
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    /// Wall-clock time spent aggregating this subtree
    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }
}

/// Seconds since the Unix epoch, negative for earlier times
pub fn unix_seconds(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_base_name() {
        let now = SystemTime::now();
        let stats = DirectoryStats::new("/srv/home/alice", 10, now, now, 1, Duration::ZERO);
        assert_eq!(stats.name(), "alice");
        assert_eq!(stats.clone().renamed("alice").path(), Path::new("alice"));
        assert_eq!(stats.renamed("alice").name(), "alice");
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(unix_seconds(UNIX_EPOCH), 0.0);
        assert_eq!(unix_seconds(UNIX_EPOCH + Duration::from_millis(1500)), 1.5);
        assert_eq!(unix_seconds(UNIX_EPOCH - Duration::from_secs(2)), -2.0);
    }
}
