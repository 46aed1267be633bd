//! Waste tracking

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::positive_amount;

/// Spoiled or discarded stock. `estimated_cost` is fixed when the entry is made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WasteEntry {
    pub id: String,
    pub date: NaiveDate,
    pub ingredient_id: String,
    pub qty: Decimal,
    #[serde(default)]
    pub reason: String,
    pub estimated_cost: Decimal,
}

impl WasteEntry {
    pub fn from_input(id: String, input: WasteInput, unit_cost: Decimal) -> Self {
        Self {
            id,
            date: input.date,
            estimated_cost: input.qty * unit_cost,
            ingredient_id: input.ingredient_id,
            qty: input.qty,
            reason: input.reason,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WasteInput {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Ingredient is required"))]
    pub ingredient_id: String,
    #[validate(custom = "positive_amount")]
    pub qty: Decimal,
    #[serde(default)]
    pub reason: String,
}
