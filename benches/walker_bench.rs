//! Benchmarks for dirsize-exporter
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use std::path::Path;

fn build_tree(root: &Path, fanout: usize, depth: usize) {
    for i in 0..fanout {
        fs::write(root.join(format!("file-{}", i)), vec![0u8; i * 16]).unwrap();
    }
    if depth > 0 {
        for i in 0..fanout {
            let sub = root.join(format!("dir-{}", i));
            fs::create_dir(&sub).unwrap();
            build_tree(&sub, fanout, depth - 1);
        }
    }
}

fn benchmark_scan_subtree(c: &mut Criterion) {
    use dirsize_exporter::DirectoryAggregator;

    let dir = tempfile::tempdir().unwrap();
    build_tree(dir.path(), 6, 3);

    c.bench_function("scan_subtree_unthrottled", |b| {
        b.iter(|| {
            let mut aggregator = DirectoryAggregator::new(u32::MAX);
            let stats = aggregator.scan_subtree(dir.path()).unwrap();
            black_box(stats);
        })
    });
}

fn benchmark_render_metrics(c: &mut Criterion) {
    use dirsize_exporter::{DirectoryStats, DirsizeMetrics};
    use std::time::{Duration, SystemTime};

    let metrics = DirsizeMetrics::new(true);
    let now = SystemTime::now();
    for i in 0..1000 {
        metrics.publish(DirectoryStats::new(
            format!("user-{}", i),
            i * 4096,
            now,
            now,
            i + 1,
            Duration::from_millis(i),
        ));
    }

    c.bench_function("render_1000_directories", |b| {
        b.iter(|| black_box(metrics.render()))
    });
}

criterion_group!(benches, benchmark_scan_subtree, benchmark_render_metrics);
criterion_main!(benches);
