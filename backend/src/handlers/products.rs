//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Product, ProductInput, ProductPatch};

use crate::error::AppResult;
use crate::AppState;

/// `?date=YYYY-MM-DD`; current prices when absent
#[derive(Debug, Deserialize)]
pub struct AsOfQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct CostResponse {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub cost_per_unit: Decimal,
}

/// List products
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.ledger.products().await)
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.ledger.add_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update product fields
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> AppResult<Json<Product>> {
    let product = state.ledger.update_product(&id, patch).await?;
    Ok(Json(product))
}

/// Delete a product (its sales are kept)
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.ledger.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cost per unit sold, as of a date
pub async fn get_product_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> AppResult<Json<CostResponse>> {
    let cost_per_unit = state.ledger.product_cost(&id, query.date).await?;
    Ok(Json(CostResponse {
        id,
        date: query.date,
        cost_per_unit,
    }))
}
