//! Static page and health handlers.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Serves the bundled frontend page
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Liveness probe
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}
