use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::response::AppError;
use crate::services::stats::{build_report, StatsReport};
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsReport>, AppError> {
    let mut tx = state.db().begin().await?;
    let report = build_report(&mut *tx, Utc::now()).await?;
    tx.commit().await?;
    Ok(Json(report))
}
