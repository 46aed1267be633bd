//! HTTP handlers for ingredients, purchase batches, strawberry batches and waste

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    Ingredient, IngredientBatch, IngredientBatchInput, IngredientInput, IngredientPatch,
    StrawberryBatch, StrawberryBatchInput, StrawberryBatchPatch, WasteEntry, WasteInput,
};

use crate::error::AppResult;
use crate::handlers::products::{AsOfQuery, CostResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AdjustmentRequest {
    /// Counted stock; `null` clears the adjustment
    pub remaining: Option<Decimal>,
}

// ============================================================================
// Ingredients
// ============================================================================

pub async fn list_ingredients(State(state): State<AppState>) -> Json<Vec<Ingredient>> {
    Json(state.ledger.ingredients().await)
}

pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let ingredient = state.ledger.add_ingredient(input).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<IngredientPatch>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = state.ledger.update_ingredient(&id, patch).await?;
    Ok(Json(ingredient))
}

pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_ingredient(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unit cost as of a date
pub async fn get_ingredient_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> AppResult<Json<CostResponse>> {
    let cost_per_unit = state.ledger.ingredient_cost(&id, query.date).await?;
    Ok(Json(CostResponse {
        id,
        date: query.date,
        cost_per_unit,
    }))
}

/// Set or clear the counted stock of an ingredient
pub async fn set_adjustment(
    State(state): State<AppState>,
    Path(ingredient_id): Path<String>,
    Json(request): Json<AdjustmentRequest>,
) -> AppResult<Json<BTreeMap<String, Decimal>>> {
    let adjustments = state
        .ledger
        .set_manual_adjustment(&ingredient_id, request.remaining)
        .await?;
    Ok(Json(adjustments))
}

// ============================================================================
// Ingredient batches
// ============================================================================

pub async fn list_ingredient_batches(State(state): State<AppState>) -> Json<Vec<IngredientBatch>> {
    Json(state.ledger.ingredient_batches().await)
}

pub async fn create_ingredient_batch(
    State(state): State<AppState>,
    Json(input): Json<IngredientBatchInput>,
) -> AppResult<(StatusCode, Json<IngredientBatch>)> {
    let batch = state.ledger.add_ingredient_batch(input).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

pub async fn delete_ingredient_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_ingredient_batch(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Strawberry batches
// ============================================================================

pub async fn list_strawberry_batches(State(state): State<AppState>) -> Json<Vec<StrawberryBatch>> {
    Json(state.ledger.strawberry_batches().await)
}

pub async fn create_strawberry_batch(
    State(state): State<AppState>,
    Json(input): Json<StrawberryBatchInput>,
) -> AppResult<(StatusCode, Json<StrawberryBatch>)> {
    let batch = state.ledger.add_strawberry_batch(input).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

pub async fn update_strawberry_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<StrawberryBatchPatch>,
) -> AppResult<Json<StrawberryBatch>> {
    let batch = state.ledger.update_strawberry_batch(&id, patch).await?;
    Ok(Json(batch))
}

pub async fn delete_strawberry_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_strawberry_batch(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Most recently added batch, `null` when none exist
pub async fn get_active_strawberry_batch(
    State(state): State<AppState>,
) -> Json<Option<StrawberryBatch>> {
    Json(state.ledger.active_strawberry_batch().await)
}

pub async fn get_strawberry_batch_for_date(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Json<Option<StrawberryBatch>> {
    Json(state.ledger.strawberry_batch_for_date(query.date).await)
}

// ============================================================================
// Waste
// ============================================================================

pub async fn list_waste(State(state): State<AppState>) -> Json<Vec<WasteEntry>> {
    Json(state.ledger.waste_entries().await)
}

pub async fn create_waste(
    State(state): State<AppState>,
    Json(input): Json<WasteInput>,
) -> AppResult<(StatusCode, Json<WasteEntry>)> {
    let entry = state.ledger.add_waste(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn delete_waste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_waste(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
