use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::parse_body;
use crate::db::operations::record_attempt;
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct PracticeRequest {
    word_id: Option<i64>,
    correct: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PracticeResponse {
    status: &'static str,
}

pub async fn log_practice(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PracticeResponse>, AppError> {
    let payload: PracticeRequest = parse_body(&body)?;
    let (Some(word_id), Some(correct)) = (payload.word_id, payload.correct) else {
        return Err(AppError::validation("Missing word_id or correct"));
    };

    let mut tx = state.db().begin().await?;
    if !record_attempt(&mut *tx, word_id, correct, Utc::now()).await? {
        return Err(AppError::not_found("Word not found"));
    }
    tx.commit().await?;

    tracing::debug!(word_id, correct, "practice attempt logged");
    Ok(Json(PracticeResponse { status: "logged" }))
}
