//! Reporting handlers: dashboard figures, stock, fees and CSV exports

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{
    DashboardStats, DateRange, IngredientInventory, IngredientUsage, LedgerRow, TransactionFees,
};

use crate::error::{AppError, AppResult};
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExportQuery {
    fn range(&self) -> AppResult<Option<DateRange>> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(AppError::invalid_field(
                "end_date",
                "End date must not be before start date",
            )),
            (Some(start), Some(end)) => Ok(Some(DateRange { start, end })),
            (Some(start), None) => Ok(Some(DateRange {
                start,
                end: NaiveDate::MAX,
            })),
            (None, Some(end)) => Ok(Some(DateRange {
                start: NaiveDate::MIN,
                end,
            })),
            (None, None) => Ok(None),
        }
    }
}

fn csv_response(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

/// Get dashboard figures
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    Json(state.ledger.dashboard().await)
}

/// Stock position per ingredient
pub async fn get_inventory(State(state): State<AppState>) -> Json<Vec<IngredientInventory>> {
    Json(state.ledger.inventory().await)
}

pub async fn get_usage(State(state): State<AppState>) -> Json<IngredientUsage> {
    Json(state.ledger.usage().await)
}

/// Sales ledger with running totals
pub async fn get_ledger(State(state): State<AppState>) -> Json<Vec<LedgerRow>> {
    Json(state.ledger.sales_ledger().await)
}

/// Automatic POS fees per checkout
pub async fn get_transaction_fees(State(state): State<AppState>) -> Json<TransactionFees> {
    Json(state.ledger.transaction_fees().await)
}

pub async fn export_sales(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.ledger.clone());
    let csv = service.sales_csv(query.range()?).await?;
    Ok(csv_response("sales.csv", csv))
}

pub async fn export_inventory(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.ledger.clone());
    let csv = service.inventory_csv().await?;
    Ok(csv_response("inventory.csv", csv))
}

pub async fn export_waste(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.ledger.clone());
    let csv = service.waste_csv(query.range()?).await?;
    Ok(csv_response("waste.csv", csv))
}
