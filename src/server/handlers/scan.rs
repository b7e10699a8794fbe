//! `POST /scan` handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{ErrorResponse, ScanBody, ScanResponse};
use crate::error_handling::ScanError;
use crate::scan::{scan_url_isolated, ScanContext};

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Scans the submitted URL.
///
/// Any body problem (malformed JSON, wrong content type, missing `url`) is a
/// 400, as is a URL that fails validation. Unexpected failures are a 500.
pub async fn scan_handler(
    State(ctx): State<ScanContext>,
    body: Result<Json<ScanBody>, JsonRejection>,
) -> Response {
    let url = match body {
        Ok(Json(ScanBody { url: Some(url) })) => url,
        Ok(Json(ScanBody { url: None })) => {
            return error_response(StatusCode::BAD_REQUEST, "URL is required".to_string());
        }
        Err(rejection) => {
            log::debug!("Rejected scan body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match scan_url_isolated(ctx, url).await {
        Ok(assessment) => (StatusCode::OK, Json(ScanResponse::from(&assessment))).into_response(),
        Err(e @ ScanError::InvalidUrl(_)) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ ScanError::Internal(_)) => {
            log::error!("Scan failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
