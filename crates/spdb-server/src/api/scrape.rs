use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use spdb_core::{Platform, ProfileRecord};
use spdb_extract::ExtractError;

use crate::middleware::RequestId;

use super::{ApiError, AppState, ResponseMeta};

pub(super) const INVALID_REQUEST: &str = "Invalid request";
const SCRAPED: &str = "Profile scraped successfully";

/// Body submitted by the capture extension.
///
/// Both fields are kept as raw JSON so a non-string value is reported as a
/// validation problem instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    #[serde(default)]
    url: Option<Value>,
    #[serde(default)]
    html: Option<Value>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeResponse {
    success: bool,
    platform: Platform,
    message: &'static str,
    data: ProfileRecord,
    saved: bool,
    meta: ResponseMeta,
}

pub(super) async fn scrape_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| reject_body(req_id.0.clone(), &rejection))?;

    let url = body.url.as_ref().and_then(Value::as_str);
    let html = body.html.as_ref().and_then(Value::as_str);
    tracing::info!(
        request_id = %req_id.0,
        url = url.unwrap_or_default(),
        html_len = html.map_or(0, str::len),
        "scrape request received"
    );

    if let Err(e) = spdb_extract::validate_request(url, html, state.min_html_len) {
        tracing::debug!(request_id = %req_id.0, error = %e, "scrape request rejected");
        return Err(invalid_request(req_id.0, &e));
    }
    let url = url.unwrap_or_default().to_string();
    let html = html.unwrap_or_default().to_string();

    let record = tokio::task::spawn_blocking(move || spdb_extract::extract_profile(&url, &html))
        .await
        .map_err(|e| {
            tracing::error!(request_id = %req_id.0, error = %e, "extraction task failed");
            ApiError::new(req_id.0.clone(), "internal_error", "Failed to scrape profile")
        })?
        .map_err(|e| invalid_request(req_id.0.clone(), &e))?;

    let saved = match spdb_db::save_profile(&state.pool, &record).await {
        Ok(outcome) => {
            tracing::info!(
                request_id = %req_id.0,
                platform = %record.platform(),
                profile = record.label(),
                id = outcome.id,
                created = outcome.created,
                "profile saved"
            );
            true
        }
        Err(e) => {
            tracing::warn!(
                request_id = %req_id.0,
                platform = %record.platform(),
                error = %e,
                "profile not saved; returning extraction result"
            );
            false
        }
    };

    Ok(Json(ScrapeResponse {
        success: true,
        platform: record.platform(),
        message: SCRAPED,
        data: record,
        saved,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn invalid_request(request_id: String, error: &ExtractError) -> ApiError {
    ApiError::new(request_id, "validation_error", INVALID_REQUEST).with_errors(error.messages())
}

fn reject_body(request_id: String, rejection: &JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(request_id, "payload_too_large", "Request body too large");
    }
    ApiError::new(request_id, "validation_error", INVALID_REQUEST)
        .with_errors(vec![rejection.body_text()])
}
