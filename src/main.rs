//! dirsize-exporter - Budgeted Directory Size Exporter
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use dirsize_exporter::config::{CliArgs, ExporterConfig};
use dirsize_exporter::metrics::{server, DirsizeMetrics};
use dirsize_exporter::{run_cycle, DirectoryAggregator};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = ExporterConfig::from_args(args).context("Invalid configuration")?;

    info!(
        parent = %config.parent_dir.display(),
        iops_budget = config.iops_budget,
        wait_secs = config.wait_time.as_secs(),
        "Starting dirsize-exporter"
    );

    let metrics = DirsizeMetrics::new(config.detailed_processing_time);

    // Metrics endpoint runs on its own runtime; the scan loop stays on this thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    let listener = runtime
        .block_on(server::bind(config.listen_addr))
        .context("Failed to start metrics endpoint")?;
    let (stop_server, server_stopped) = tokio::sync::oneshot::channel::<()>();
    let server = runtime.spawn(server::serve(listener, metrics.clone(), async move {
        let _ = server_stopped.await;
    }));

    // Setup signal handler for graceful shutdown
    let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        let _ = shutdown_tx.try_send(());
    })
    .context("Failed to set signal handler")?;

    scan_loop(&config, &metrics, &shutdown_rx);

    let _ = stop_server.send(());
    runtime
        .block_on(server)
        .context("Metrics endpoint task failed")?
        .context("Metrics endpoint failed")?;

    Ok(())
}

/// Scan, publish, sleep; until a shutdown is received
fn scan_loop(config: &ExporterConfig, metrics: &DirsizeMetrics, shutdown: &Receiver<()>) {
    loop {
        // Fresh limiter per cycle
        let mut aggregator = DirectoryAggregator::new(config.iops_budget);
        let stop_requested = || !shutdown.is_empty();

        match run_cycle(&mut aggregator, &config.parent_dir, metrics, stop_requested) {
            Ok(summary) => summary.log(),
            Err(e) => error!(error = %e, "Scan cycle aborted, retrying next interval"),
        }

        match shutdown.recv_timeout(config.wait_time) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                info!("Shutting down");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dirsize_exporter=debug,warn")
    } else {
        EnvFilter::new("dirsize_exporter=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
