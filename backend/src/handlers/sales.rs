//! HTTP handlers for sales and the card-total classifier

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{ProductCombo, Sale, SaleInput};

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CombinationsRequest {
    /// Whole-currency card total
    pub amount: u32,
}

#[derive(Debug, Deserialize)]
pub struct CommitRequest {
    pub date: NaiveDate,
    pub combos: Vec<ProductCombo>,
}

/// List sales in entry order
pub async fn list_sales(State(state): State<AppState>) -> Json<Vec<Sale>> {
    Json(state.ledger.sales().await)
}

/// Record a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(input): Json<SaleInput>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let sale = state.ledger.add_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn delete_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_sale(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every product split matching a card total
pub async fn find_combinations(
    State(state): State<AppState>,
    Json(request): Json<CombinationsRequest>,
) -> AppResult<Json<Vec<ProductCombo>>> {
    let classifier = &state.config.classifier;
    let combos = state
        .ledger
        .classify(request.amount, &classifier.product_ids, classifier.max_amount)
        .await?;
    Ok(Json(combos))
}

/// Record confirmed splits as manual sales
pub async fn commit_combinations(
    State(state): State<AppState>,
    Json(request): Json<CommitRequest>,
) -> AppResult<(StatusCode, Json<Vec<Sale>>)> {
    let sales = state
        .ledger
        .commit_combinations(request.date, &request.combos)
        .await?;
    Ok((StatusCode::CREATED, Json(sales)))
}
