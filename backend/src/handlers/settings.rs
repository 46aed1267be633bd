//! HTTP handlers for operator settings

use axum::{extract::State, http::StatusCode, Json};
use shared::{FeeSettings, FeeSettingsPatch};

use crate::error::AppResult;
use crate::AppState;

pub async fn get_pos_fee(State(state): State<AppState>) -> Json<FeeSettings> {
    Json(state.ledger.fee_settings().await)
}

/// Update the global POS fee (percentage, manual amount or mode)
pub async fn update_pos_fee(
    State(state): State<AppState>,
    Json(patch): Json<FeeSettingsPatch>,
) -> AppResult<Json<FeeSettings>> {
    let settings = state.ledger.update_fee_settings(patch).await?;
    Ok(Json(settings))
}

/// Reset the in-memory ledger to the seeded defaults
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.ledger.reset().await;
    StatusCode::NO_CONTENT
}
