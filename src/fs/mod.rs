//! Filesystem access module
//!
//! Every filesystem call the walker makes goes through the [`Filesystem`]
//! trait, which keeps the set of operations small enough that each one can
//! be counted against the IOPS budget.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               DirectoryAggregator                   │
//! │  - one RateLimiter::execute per call below          │
//! └──────────────────────────┬──────────────────────────┘
//!                            │ stat / lstat / entry_type / list_dir
//!                            ▼
//! ┌─────────────────────────────────────────────────────┐
//! │              Filesystem (trait)                     │
//! │  - LocalFs: std::fs, kernel client (local or NFS)   │
//! └─────────────────────────────────────────────────────┘
//! ```

mod local;
pub mod types;

pub use local::LocalFs;
pub use types::{EntryStat, EntryType};

use std::io;
use std::path::{Path, PathBuf};

/// The filesystem operations the walker issues
///
/// Implementations must not retry or swallow errors; classification is the
/// walker's job.
pub trait Filesystem {
    /// Stat a path, following symlinks
    fn stat(&self, path: &Path) -> io::Result<EntryStat>;

    /// Stat a path without following symlinks
    fn lstat(&self, path: &Path) -> io::Result<EntryStat>;

    /// Determine the type of a path without following symlinks
    fn entry_type(&self, path: &Path) -> io::Result<EntryType>;

    /// List the immediate entries of a directory as absolute paths, in
    /// lexicographic order
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn stat(&self, path: &Path) -> io::Result<EntryStat> {
        (**self).stat(path)
    }

    fn lstat(&self, path: &Path) -> io::Result<EntryStat> {
        (**self).lstat(path)
    }

    fn entry_type(&self, path: &Path) -> io::Result<EntryType> {
        (**self).entry_type(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_dir(path)
    }
}
