//! HTTP handlers for fixed costs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{FixedCost, FixedCostInput, FixedCostPatch};

use crate::error::AppResult;
use crate::AppState;

pub async fn list_fixed_costs(State(state): State<AppState>) -> Json<Vec<FixedCost>> {
    Json(state.ledger.fixed_costs().await)
}

pub async fn create_fixed_cost(
    State(state): State<AppState>,
    Json(input): Json<FixedCostInput>,
) -> AppResult<(StatusCode, Json<FixedCost>)> {
    let cost = state.ledger.add_fixed_cost(input).await?;
    Ok((StatusCode::CREATED, Json(cost)))
}

pub async fn update_fixed_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<FixedCostPatch>,
) -> AppResult<Json<FixedCost>> {
    let cost = state.ledger.update_fixed_cost(&id, patch).await?;
    Ok(Json(cost))
}

pub async fn delete_fixed_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_fixed_cost(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
