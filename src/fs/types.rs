//! Filesystem entry types
//!
//! These are the only shapes the walker sees from the filesystem: the type
//! of an entry and the handful of attributes it aggregates.

use std::fs::{FileType, Metadata};
use std::io;
use std::time::SystemTime;

/// Type of filesystem entry, as reported without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link (never followed)
    Symlink,
    /// Fifo, socket, device or anything else
    Other,
}

impl EntryType {
    /// Convert from a std file type
    pub fn from_file_type(ft: FileType) -> Self {
        if ft.is_symlink() {
            EntryType::Symlink
        } else if ft.is_dir() {
            EntryType::Directory
        } else if ft.is_file() {
            EntryType::File
        } else {
            EntryType::Other
        }
    }

    /// Regular files and symlinks are both counted by their own size
    pub fn is_file_like(&self) -> bool {
        matches!(self, EntryType::File | EntryType::Symlink)
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryType::Directory
    }
}

/// Attributes of a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryStat {
    /// Size in bytes (a symlink's own size, not its target's)
    pub size: u64,

    /// Last modification time
    pub modified: SystemTime,

    /// Entry type
    pub entry_type: EntryType,
}

impl EntryStat {
    /// Build from std metadata
    pub fn from_metadata(meta: &Metadata) -> io::Result<Self> {
        Ok(Self {
            size: meta.len(),
            modified: meta.modified()?,
            entry_type: EntryType::from_file_type(meta.file_type()),
        })
    }
}
