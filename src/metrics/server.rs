//! Axum HTTP endpoint exposing the gauges for scraping

use crate::error::ServerError;
use crate::metrics::DirsizeMetrics;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Content type of the Prometheus text format
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

// ─── Route builder ───────────────────────────────────────────────

pub fn build_router(metrics: DirsizeMetrics) -> Router {
    Router::new()
        .route("/metrics", get(render))
        .route("/health", get(health))
        .with_state(metrics)
}

// ─── Handlers ────────────────────────────────────────────────────

async fn render(State(metrics): State<DirsizeMetrics>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], metrics.render())
}

async fn health(State(metrics): State<DirsizeMetrics>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "dirsize-exporter",
        "directories": metrics.len(),
    }))
}

// ─── Server startup ──────────────────────────────────────────────

/// Bind the metrics listener
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve `/metrics` and `/health` until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    metrics: DirsizeMetrics,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Metrics endpoint listening on http://{}/metrics", addr);
    }

    axum::serve(listener, build_router(metrics))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Metrics endpoint shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::DirectoryStats;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::time::{Duration, SystemTime};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let metrics = DirsizeMetrics::new(false);
        let now = SystemTime::now();
        metrics.publish(DirectoryStats::new("alice", 123, now, now, 2, Duration::ZERO));

        let response = build_router(metrics)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROMETHEUS_CONTENT_TYPE
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("dirsize_total_size_bytes{directory=\"alice\"} 123"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = build_router(DirsizeMetrics::new(false))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["directories"], 0);
    }
}
