//! Recursive subtree aggregation
//!
//! [`DirectoryAggregator::scan_subtree`] walks a directory depth-first and
//! folds every entry into one [`DirectoryStats`]. Every filesystem call is
//! issued through the aggregator's [`RateLimiter`].
//!
//! Per directory the walk is:
//!
//! ```text
//! stat(self) ─► list_dir ─► entry_type(child) for each child
//!                              │
//!               ┌──────────────┴───────────────┐
//!               ▼                              ▼
//!       file / symlink: lstat          directory: recurse
//! ```
//!
//! Entries that vanish, go stale or deny access mid-scan are excluded from
//! the aggregate; any other error aborts the scan.

use crate::error::{FsErrorKind, ScanError, ScanResult};
use crate::fs::{EntryStat, EntryType, Filesystem, LocalFs};
use crate::walker::budget::{Clock, RateLimiter, SystemClock};
use crate::walker::stats::DirectoryStats;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};
use tracing::{debug, trace};

/// Running totals for one directory while its children are folded in
#[derive(Debug, Clone)]
struct Totals {
    size: u64,
    latest: SystemTime,
    oldest: SystemTime,
    entries: u64,
}

impl Totals {
    /// Start from the directory's own attributes; it counts as one entry
    fn new(root: &EntryStat) -> Self {
        Self {
            size: root.size,
            latest: root.modified,
            oldest: root.modified,
            entries: 1,
        }
    }

    fn add_entry(&mut self, stat: &EntryStat) {
        self.size += stat.size;
        self.latest = self.latest.max(stat.modified);
        self.oldest = self.oldest.min(stat.modified);
        self.entries += 1;
    }

    fn add_subtree(&mut self, sub: &DirectoryStats) {
        self.size += sub.total_size();
        self.latest = self.latest.max(sub.latest_modified());
        self.oldest = self.oldest.min(sub.oldest_modified());
        self.entries += sub.entry_count();
    }

    fn finish(self, path: &Path, started: Instant) -> DirectoryStats {
        DirectoryStats::new(
            path,
            self.size,
            self.latest,
            self.oldest,
            self.entries,
            started.elapsed(),
        )
    }
}

/// Budgeted depth-first directory walker
pub struct DirectoryAggregator<F: Filesystem = LocalFs, C: Clock = SystemClock> {
    fs: F,
    limiter: RateLimiter<C>,
}

impl DirectoryAggregator<LocalFs, SystemClock> {
    /// Walker over the local filesystem with `iops_budget` operations per second
    pub fn new(iops_budget: u32) -> Self {
        Self::with_parts(LocalFs, RateLimiter::new(iops_budget))
    }
}

impl<F: Filesystem, C: Clock> DirectoryAggregator<F, C> {
    /// Walker over a custom filesystem and limiter
    pub fn with_parts(fs: F, limiter: RateLimiter<C>) -> Self {
        Self { fs, limiter }
    }

    /// The limiter every call goes through
    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Aggregate the subtree rooted at `path`
    ///
    /// Returns `Ok(None)` when the subtree disappeared, went stale or could
    /// not be read; the caller leaves it out of its own aggregate.
    pub fn scan_subtree(&mut self, path: &Path) -> ScanResult<Option<DirectoryStats>> {
        let started = Instant::now();

        let Some(root) = excluded_if_recoverable(self.stat(path))? else {
            return Ok(None);
        };
        let Some(children) = excluded_if_recoverable(self.list_dir(path))? else {
            return Ok(None);
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for child in children {
            match excluded_if_recoverable(self.entry_type(&child))? {
                Some(t) if t.is_file_like() => files.push(child),
                Some(EntryType::Directory) => dirs.push(child),
                Some(_) => trace!(path = %child.display(), "Ignoring special file"),
                None => {}
            }
        }

        let mut totals = Totals::new(&root);

        for file in &files {
            if let Some(stat) = excluded_if_recoverable(self.lstat(file))? {
                totals.add_entry(&stat);
            }
        }

        for dir in &dirs {
            if let Some(sub) = self.scan_subtree(dir)? {
                totals.add_subtree(&sub);
            }
        }

        let stats = totals.finish(path, started);
        trace!(
            path = %path.display(),
            size = stats.total_size(),
            entries = stats.entry_count(),
            "Subtree aggregated"
        );
        Ok(Some(stats))
    }

    pub(crate) fn stat(&mut self, path: &Path) -> ScanResult<EntryStat> {
        let fs = &self.fs;
        self.limiter
            .execute(|| fs.stat(path))
            .map_err(|e| ScanError::io("stat", path, e))
    }

    pub(crate) fn lstat(&mut self, path: &Path) -> ScanResult<EntryStat> {
        let fs = &self.fs;
        self.limiter
            .execute(|| fs.lstat(path))
            .map_err(|e| ScanError::io("lstat", path, e))
    }

    pub(crate) fn entry_type(&mut self, path: &Path) -> ScanResult<EntryType> {
        let fs = &self.fs;
        self.limiter
            .execute(|| fs.entry_type(path))
            .map_err(|e| ScanError::io("check type of", path, e))
    }

    pub(crate) fn list_dir(&mut self, path: &Path) -> ScanResult<Vec<PathBuf>> {
        let fs = &self.fs;
        self.limiter
            .execute(|| fs.list_dir(path))
            .map_err(|e| ScanError::io("list", path, e))
    }
}

/// Turn a recoverable failure into `None`, keep unexpected ones as errors
pub(crate) fn excluded_if_recoverable<T>(result: ScanResult<T>) -> ScanResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.kind() {
            FsErrorKind::Vanished => {
                trace!(path = %e.path().display(), "Entry vanished during scan");
                Ok(None)
            }
            FsErrorKind::StaleHandle | FsErrorKind::PermissionDenied => {
                debug!(path = %e.path().display(), error = %e, "Excluding entry");
                Ok(None)
            }
            FsErrorKind::Unexpected => Err(e),
        },
    }
}
