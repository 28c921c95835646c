mod health;
mod lookup;
mod practice;
mod stats;
mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;

use crate::response::{json_error, AppError};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).fallback(fallback_handler))
        .route("/lookup", post(lookup::lookup).fallback(fallback_handler))
        .route("/add", post(words::add_word).fallback(fallback_handler))
        .route(
            "/words/practice",
            get(words::random_word).fallback(fallback_handler),
        )
        .route(
            "/getrandom",
            get(words::random_batch).fallback(fallback_handler),
        )
        .route(
            "/practice",
            post(practice::log_practice).fallback(fallback_handler),
        )
        .route("/stats", get(stats::stats).fallback(fallback_handler))
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn home() -> &'static str {
    "Vocab lookup"
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}

/// Bodies are decoded by hand so malformed JSON maps to our 400 body instead
/// of the extractor's default rejection.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed request body");
        AppError::validation("Invalid request body")
    })
}

/// Trimmed, lowercased word, or `None` when blank.
fn normalize_word(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
