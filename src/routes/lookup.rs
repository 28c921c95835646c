use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{normalize_word, parse_body};
use crate::db::operations::{words as words_ops, Definition};
use crate::response::AppError;
use crate::services::dictionary::DictionaryError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LookupRequest {
    word: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    word: String,
    definitions: Vec<Definition>,
    saved_definitions: Vec<String>,
}

pub async fn lookup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LookupResponse>, AppError> {
    let payload: LookupRequest = parse_body(&body)?;
    let word = normalize_word(payload.word.as_deref())
        .ok_or_else(|| AppError::validation("No word provided"))?;

    let definitions = match state.dictionary().lookup(&word).await {
        Ok(definitions) => definitions,
        Err(DictionaryError::NotFound) => {
            tracing::info!(%word, "word not in dictionary");
            return Err(DictionaryError::NotFound.into());
        }
        Err(err) => {
            tracing::warn!(%word, error = %err, "dictionary lookup failed");
            return Err(err.into());
        }
    };

    let mut tx = state.db().begin().await?;
    let saved_definitions = words_ops::saved_definitions(&mut *tx, &word).await?;
    tx.commit().await?;

    Ok(Json(LookupResponse {
        word,
        definitions,
        saved_definitions,
    }))
}
