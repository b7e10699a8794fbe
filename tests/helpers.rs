// Shared test helpers for spinning up local servers.
//
// Every server binds 127.0.0.1:0 so tests can run in parallel.

use std::time::Duration;

use axum::{
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use phish_scan::{serve, Config, ScanContext};

/// Config with short network timeouts so tests touching the network finish fast.
#[allow(dead_code)] // Used by other test files
pub fn fast_config() -> Config {
    Config {
        redirect_timeout_secs: 2,
        whois_timeout_secs: 1,
        connect_timeout_secs: 1,
        tls_timeout_secs: 1,
        scan_budget_secs: 4,
        ..Default::default()
    }
}

/// Starts the scan API on an ephemeral port and returns its base URL.
#[allow(dead_code)]
pub async fn spawn_scan_server(config: &Config) -> String {
    let ctx = ScanContext::new(config).expect("Failed to build scan context");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        let _ = serve(listener, ctx).await;
    });
    format!("http://{}", addr)
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    "finally"
}

/// Starts a server with a few redirect shapes and returns its base URL.
///
/// - `/start` -> 303 `/middle` -> 308 `/final/login` (200)
/// - `/absolute` -> 307 to the absolute `/final/login` URL
/// - `/loop` -> 303 `/loop`
/// - `/no-location` -> 302 without a `Location` header
/// - `/slow` -> 200 after 3 seconds
#[allow(dead_code)]
pub async fn spawn_redirect_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    let base = format!("http://{}", addr);
    let absolute_target = format!("{}/final/login", base);

    let app = Router::new()
        .route("/start", get(|| async { Redirect::to("/middle") }))
        .route("/middle", get(|| async { Redirect::permanent("/final/login") }))
        .route("/final/login", get(|| async { "login page" }))
        .route(
            "/absolute",
            get(move || {
                let target = absolute_target.clone();
                async move { Redirect::temporary(&target) }
            }),
        )
        .route("/loop", get(|| async { Redirect::to("/loop") }))
        .route(
            "/no-location",
            get(|| async { axum::http::StatusCode::FOUND }),
        )
        .route("/slow", get(slow));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base
}
