//! One record per immediate subdirectory of a parent directory
//!
//! [`SubtreeScan`] is lazy: each child is scanned to completion only when
//! the iterator is advanced, so siblings never share the budget
//! concurrently and the caller can publish (or stop) between children.

use crate::error::ScanResult;
use crate::fs::{EntryType, Filesystem};
use crate::walker::aggregate::{excluded_if_recoverable, DirectoryAggregator};
use crate::walker::budget::Clock;
use crate::walker::stats::DirectoryStats;
use std::path::{Path, PathBuf};
use std::vec;
use tracing::debug;

impl<F: Filesystem, C: Clock> DirectoryAggregator<F, C> {
    /// List `parent` and return an iterator scanning each child directory
    ///
    /// Failing to list the parent itself is an error for the whole cycle.
    pub fn scan_children(&mut self, parent: &Path) -> ScanResult<SubtreeScan<'_, F, C>> {
        let children = self.list_dir(parent)?;
        debug!(parent = %parent.display(), children = children.len(), "Listed parent directory");
        Ok(SubtreeScan {
            aggregator: self,
            children: children.into_iter(),
            failed: false,
        })
    }
}

/// Lazy sequence of per-child [`DirectoryStats`], named by base name
pub struct SubtreeScan<'a, F: Filesystem, C: Clock> {
    aggregator: &'a mut DirectoryAggregator<F, C>,
    children: vec::IntoIter<PathBuf>,
    failed: bool,
}

impl<F: Filesystem, C: Clock> SubtreeScan<'_, F, C> {
    fn scan_child(&mut self, child: &Path) -> ScanResult<Option<DirectoryStats>> {
        match excluded_if_recoverable(self.aggregator.entry_type(child))? {
            Some(EntryType::Directory) => {}
            _ => return Ok(None),
        }

        let Some(stats) = self.aggregator.scan_subtree(child)? else {
            debug!(path = %child.display(), "Skipping unreadable or vanished directory");
            return Ok(None);
        };

        let name = stats.name();
        Ok(Some(stats.renamed(name)))
    }
}

impl<F: Filesystem, C: Clock> Iterator for SubtreeScan<'_, F, C> {
    type Item = ScanResult<DirectoryStats>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(child) = self.children.next() {
            match self.scan_child(&child) {
                Ok(Some(stats)) => return Some(Ok(stats)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }

        None
    }
}

impl<F: Filesystem, C: Clock> std::iter::FusedIterator for SubtreeScan<'_, F, C> {}
