//! HTTP service exposing the risk engine.
//!
//! Endpoints:
//! - `POST /scan` - scan a URL, body `{"url": "..."}`
//! - `GET /health` - liveness probe
//! - `GET /` - static frontend page

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::scan::ScanContext;
use handlers::{health_handler, index_handler, scan_handler};
pub use types::{ErrorResponse, ScanBody, ScanResponse};

/// Builds the application router.
pub fn router(ctx: ScanContext) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/scan", post(scan_handler))
        .with_state(ctx)
}

/// Serves the router on an already-bound listener until the server stops.
pub async fn serve(listener: TcpListener, ctx: ScanContext) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(ctx))
        .await
        .map_err(|e| anyhow::anyhow!("Scan server error: {}", e))
}

/// Binds `addr` and serves the scan API.
pub async fn start_server(addr: &str, ctx: ScanContext) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind scan server to {}: {}", addr, e))?;

    log::info!("Scan server listening on http://{}/", addr);
    log::info!("  - Scan: POST http://{}/scan", addr);
    log::info!("  - Health: http://{}/health", addr);

    serve(listener, ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let ctx = ScanContext::new(&Config::default()).unwrap();
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let err = start_server(&addr, ctx).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind scan server"));
    }
}
