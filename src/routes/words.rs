use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{normalize_word, parse_body};
use crate::db::operations::{words as words_ops, Definition, WordEntry, PRACTICE_BATCH_SIZE};
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct AddWordRequest {
    word: Option<String>,
    definitions: Option<Vec<DefinitionInput>>,
}

#[derive(Debug, Deserialize)]
struct DefinitionInput {
    definition: Option<String>,
    example: Option<String>,
}

impl DefinitionInput {
    fn into_definition(self) -> Option<Definition> {
        let definition = self.definition?.trim().to_string();
        if definition.is_empty() {
            return None;
        }
        let example = self
            .example
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Some(Definition {
            definition,
            example,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AddWordResponse {
    status: &'static str,
    definitions_added: u64,
}

pub async fn add_word(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddWordResponse>, AppError> {
    let payload: AddWordRequest = parse_body(&body)?;
    let definitions: Vec<Definition> = payload
        .definitions
        .unwrap_or_default()
        .into_iter()
        .filter_map(DefinitionInput::into_definition)
        .collect();
    let Some(word) = normalize_word(payload.word.as_deref()).filter(|_| !definitions.is_empty())
    else {
        return Err(AppError::validation("Missing word or definitions"));
    };

    let now = Utc::now();
    let mut tx = state.db().begin().await?;

    let mut added = 0_u64;
    for definition in &definitions {
        match words_ops::insert_definition(&mut *tx, &word, definition, now).await {
            Ok(true) => added += 1,
            Ok(false) => tracing::debug!(%word, "definition already saved"),
            Err(err) => {
                tracing::warn!(%word, error = %err, "definition insert failed, skipping");
            }
        }
    }

    tx.commit().await?;
    tracing::info!(%word, added, "definitions saved");

    Ok(Json(AddWordResponse {
        status: "success",
        definitions_added: added,
    }))
}

pub async fn random_word(State(state): State<AppState>) -> Result<Json<WordEntry>, AppError> {
    let mut tx = state.db().begin().await?;
    let entry = words_ops::random_entry(&mut *tx).await?;
    tx.commit().await?;

    entry
        .map(Json)
        .ok_or_else(|| AppError::not_found("No words available"))
}

pub async fn random_batch(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordEntry>>, AppError> {
    let mut tx = state.db().begin().await?;
    let batch = words_ops::random_practice_batch(&mut *tx, PRACTICE_BATCH_SIZE).await?;
    tx.commit().await?;

    if batch.is_empty() {
        return Err(AppError::not_found("No words available"));
    }
    Ok(Json(batch))
}
