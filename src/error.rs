//! Error types for dirsize-exporter
//!
//! This module defines the error hierarchy for:
//! - Filesystem operations issued by the walker
//! - Configuration validation
//! - The metrics HTTP server
//!
//! Filesystem failures are classified into a small taxonomy. Vanished
//! entries, stale remote handles and permission-denied directories are
//! routine on live trees and are excluded from aggregates. Everything else
//! propagates and aborts the current scan cycle.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for the exporter
#[derive(Error, Debug)]
pub enum ExporterError {
    /// Filesystem scan errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metrics server errors
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// I/O errors outside of a scan
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// How a failed filesystem operation should be treated by the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsErrorKind {
    /// Entry disappeared between listing and visiting it
    Vanished,

    /// Remote filesystem handle went stale (ESTALE)
    StaleHandle,

    /// Entry exists but cannot be read
    PermissionDenied,

    /// Anything else
    Unexpected,
}

impl FsErrorKind {
    /// Classify an I/O error
    pub fn classify(err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ESTALE) => return FsErrorKind::StaleHandle,
            // A path component was swapped for a file mid-scan
            Some(libc::ENOTDIR) => return FsErrorKind::Vanished,
            _ => {}
        }

        match err.kind() {
            io::ErrorKind::NotFound => FsErrorKind::Vanished,
            io::ErrorKind::PermissionDenied => FsErrorKind::PermissionDenied,
            _ => FsErrorKind::Unexpected,
        }
    }

    /// Check if the failing entry can be excluded without aborting the scan
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FsErrorKind::Unexpected)
    }
}

/// A filesystem operation failed during a scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// An operation on `path` failed
    #[error("Failed to {op} '{path}': {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScanError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Classification of the underlying OS error
    pub fn kind(&self) -> FsErrorKind {
        match self {
            ScanError::Io { source, .. } => FsErrorKind::classify(source),
        }
    }

    /// Path of the failing operation
    pub fn path(&self) -> &Path {
        match self {
            ScanError::Io { path, .. } => path,
        }
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IOPS budget must allow at least one operation per second
    #[error("Invalid IOPS budget {budget}: must be at least 1")]
    InvalidIopsBudget { budget: u32 },

    /// Wait interval must be positive
    #[error("Invalid wait time {minutes} minutes: must be at least 1")]
    InvalidWaitTime { minutes: u64 },

    /// Parent directory is missing or not a directory
    #[error("Invalid parent directory '{path}': {reason}")]
    InvalidParentDir { path: PathBuf, reason: String },

    /// Bind address could not be parsed
    #[error("Invalid bind address '{addr}': {reason}")]
    InvalidBindAddress { addr: String, reason: String },
}

/// Metrics server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Could not bind the listening socket
    #[error("Failed to bind metrics endpoint on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Serving failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for ExporterError
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(FsErrorKind::classify(&err), FsErrorKind::Vanished);
        assert!(FsErrorKind::classify(&err).is_recoverable());
    }

    #[test]
    fn test_classify_raw_os_errors() {
        let stale = io::Error::from_raw_os_error(libc::ESTALE);
        assert_eq!(FsErrorKind::classify(&stale), FsErrorKind::StaleHandle);

        let not_dir = io::Error::from_raw_os_error(libc::ENOTDIR);
        assert_eq!(FsErrorKind::classify(&not_dir), FsErrorKind::Vanished);

        let denied = io::Error::from_raw_os_error(libc::EACCES);
        assert_eq!(FsErrorKind::classify(&denied), FsErrorKind::PermissionDenied);

        let eio = io::Error::from_raw_os_error(libc::EIO);
        assert_eq!(FsErrorKind::classify(&eio), FsErrorKind::Unexpected);
        assert!(!FsErrorKind::Unexpected.is_recoverable());
    }

    #[test]
    fn test_scan_error_kind() {
        let err = ScanError::io(
            "stat",
            "/data/gone",
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert_eq!(err.kind(), FsErrorKind::Vanished);
        assert_eq!(err.path(), Path::new("/data/gone"));
        assert!(err.to_string().contains("/data/gone"));
    }

    #[test]
    fn test_error_conversion() {
        let err = ConfigError::InvalidIopsBudget { budget: 0 };
        let top: ExporterError = err.into();
        assert!(matches!(top, ExporterError::Config(_)));
    }
}
