//! One scan cycle: walk every child of the parent and publish as we go

use crate::error::ScanResult;
use crate::fs::Filesystem;
use crate::metrics::DirsizeMetrics;
use crate::summary::CycleSummary;
use crate::walker::{Clock, DirectoryAggregator};
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// Scan each child of `parent` and publish its record as soon as it is
/// produced
///
/// `should_stop` is checked between children; a stop leaves already
/// published records in place. Unexpected filesystem errors abort the
/// cycle and are returned to the caller.
pub fn run_cycle<F: Filesystem, C: Clock>(
    aggregator: &mut DirectoryAggregator<F, C>,
    parent: &Path,
    metrics: &DirsizeMetrics,
    should_stop: impl Fn() -> bool,
) -> ScanResult<CycleSummary> {
    let started = Instant::now();
    let mut summary = CycleSummary::default();

    for stats in aggregator.scan_children(parent)? {
        let stats = stats?;
        debug!(
            directory = %stats.name(),
            size = stats.total_size(),
            entries = stats.entry_count(),
            elapsed_ms = stats.processing_time().as_millis() as u64,
            "Directory scanned"
        );
        summary.record(&stats);
        metrics.publish(stats);

        if should_stop() {
            debug!("Stop requested, ending scan cycle early");
            break;
        }
    }

    summary.fs_ops = aggregator.limiter().ops_executed();
    summary.throttled = aggregator.limiter().throttle_count();
    summary.duration = started.elapsed();
    Ok(summary)
}
