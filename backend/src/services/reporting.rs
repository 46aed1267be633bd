//! CSV exports of sales, inventory and waste

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    round_money, round_unit_cost, DateRange, Ingredient, IngredientInventory, LedgerRow, WasteEntry,
};

use crate::error::{AppError, AppResult};
use crate::services::LedgerService;

#[derive(Debug, Serialize)]
pub struct SalesCsvRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Unit Price")]
    pub unit_price: Decimal,
    #[serde(rename = "Revenue")]
    pub revenue: Decimal,
    #[serde(rename = "Cost/Unit")]
    pub cost_per_unit: Decimal,
    #[serde(rename = "Profit")]
    pub profit: Decimal,
}

impl From<&LedgerRow> for SalesCsvRow {
    fn from(row: &LedgerRow) -> Self {
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            product: row.product_name.clone(),
            quantity: row.qty,
            unit_price: round_money(row.unit_price),
            revenue: round_money(row.revenue),
            cost_per_unit: round_unit_cost(row.cost_per_unit),
            profit: round_money(row.profit_before_fixed),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryCsvRow {
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    #[serde(rename = "Purchased")]
    pub purchased: Decimal,
    #[serde(rename = "Used")]
    pub used: Decimal,
    #[serde(rename = "Wasted")]
    pub wasted: Decimal,
    #[serde(rename = "Remaining")]
    pub remaining: Decimal,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Total Cost")]
    pub total_cost: Decimal,
    #[serde(rename = "Cost/Unit")]
    pub cost_per_unit: Decimal,
}

impl From<&IngredientInventory> for InventoryCsvRow {
    fn from(record: &IngredientInventory) -> Self {
        Self {
            ingredient: record.name.clone(),
            purchased: round_money(record.total_purchased),
            used: round_money(record.total_used),
            wasted: round_money(record.total_wasted),
            remaining: round_money(record.remaining),
            unit: record.unit.clone(),
            total_cost: round_money(record.total_cost),
            cost_per_unit: round_unit_cost(record.cost_per_unit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WasteCsvRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    #[serde(rename = "Quantity")]
    pub quantity: Decimal,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Estimated Cost")]
    pub estimated_cost: Decimal,
}

/// Reporting service for CSV exports
pub struct ReportingService {
    ledger: LedgerService,
}

impl ReportingService {
    pub fn new(ledger: LedgerService) -> Self {
        Self { ledger }
    }

    /// Sales in ledger (date) order, optionally narrowed to a date range
    pub async fn sales_csv(&self, range: Option<DateRange>) -> AppResult<String> {
        let rows: Vec<SalesCsvRow> = self
            .ledger
            .sales_ledger()
            .await
            .iter()
            .filter(|row| range.map_or(true, |r| r.contains(row.date)))
            .map(SalesCsvRow::from)
            .collect();
        Self::export_to_csv(&rows)
    }

    pub async fn inventory_csv(&self) -> AppResult<String> {
        let rows: Vec<InventoryCsvRow> = self
            .ledger
            .inventory()
            .await
            .iter()
            .map(InventoryCsvRow::from)
            .collect();
        Self::export_to_csv(&rows)
    }

    pub async fn waste_csv(&self, range: Option<DateRange>) -> AppResult<String> {
        let state = self.ledger.snapshot().await;
        let rows: Vec<WasteCsvRow> = state
            .waste_entries
            .iter()
            .filter(|w| range.map_or(true, |r| r.contains(w.date)))
            .map(|w| waste_row(w, &state.ingredients))
            .collect();
        Self::export_to_csv(&rows)
    }

    /// Export data to CSV format
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

fn waste_row(entry: &WasteEntry, ingredients: &BTreeMap<String, Ingredient>) -> WasteCsvRow {
    let ingredient = ingredients.get(&entry.ingredient_id);
    WasteCsvRow {
        date: entry.date.format("%Y-%m-%d").to_string(),
        ingredient: ingredient
            .map(|i| i.name.clone())
            .unwrap_or_else(|| entry.ingredient_id.clone()),
        quantity: entry.qty,
        unit: ingredient
            .map(|i| i.unit.symbol().to_string())
            .unwrap_or_default(),
        reason: entry.reason.clone(),
        estimated_cost: round_money(entry.estimated_cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_headers_and_rounding() {
        let rows = vec![InventoryCsvRow {
            ingredient: "Cup".to_string(),
            purchased: round_money(dec!(50)),
            used: round_money(dec!(2)),
            wasted: Decimal::ZERO,
            remaining: round_money(dec!(48)),
            unit: "units".to_string(),
            total_cost: round_money(dec!(61.5)),
            cost_per_unit: round_unit_cost(dec!(1.23)),
        }];

        let csv = ReportingService::export_to_csv(&rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Ingredient,Purchased,Used,Wasted,Remaining,Unit,Total Cost,Cost/Unit")
        );
        assert_eq!(lines.next(), Some("Cup,50,2,0,48,units,61.5,1.23"));
    }

    #[test]
    fn test_empty_export_has_no_rows() {
        let rows: Vec<WasteCsvRow> = Vec::new();
        assert_eq!(ReportingService::export_to_csv(&rows).unwrap(), "");
    }
}
