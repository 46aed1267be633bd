//! Ingredient and purchase batch models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::safe_div;
use crate::validation::non_negative_amount;

/// Identifiers of the ingredients every recipe refers to
pub mod ingredient_ids {
    pub const STRAWBERRY: &str = "strawberry";
    pub const CHOCOLATE: &str = "chocolate";
    pub const KUNAFA: &str = "kunafa";
    pub const CUP: &str = "cup";
    pub const STICKS: &str = "sticks";
}

/// Unit of measure for an ingredient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Unit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "pcs")]
    Pieces,
    #[serde(rename = "units")]
    Units,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Pieces => "pcs",
            Unit::Units => "units",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An ingredient with a default bulk price used until the first batch is bought
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub default_bulk_qty: Decimal,
    pub default_bulk_cost: Decimal,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: Unit,
        default_bulk_qty: Decimal,
        default_bulk_cost: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit,
            default_bulk_qty,
            default_bulk_cost,
        }
    }

    pub fn from_input(id: String, input: IngredientInput) -> Self {
        Self::new(
            id,
            input.name,
            input.unit,
            input.default_bulk_qty,
            input.default_bulk_cost,
        )
    }

    pub fn default_cost_per_unit(&self) -> Decimal {
        safe_div(self.default_bulk_cost, self.default_bulk_qty)
    }

    pub fn apply(&mut self, patch: IngredientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(qty) = patch.default_bulk_qty {
            self.default_bulk_qty = qty;
        }
        if let Some(cost) = patch.default_bulk_cost {
            self.default_bulk_cost = cost;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, message = "Ingredient name is required"))]
    pub name: String,
    pub unit: Unit,
    #[validate(custom = "non_negative_amount")]
    pub default_bulk_qty: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub default_bulk_cost: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub default_bulk_qty: Option<Decimal>,
    pub default_bulk_cost: Option<Decimal>,
}

/// A dated purchase of an ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientBatch {
    pub id: String,
    pub ingredient_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub bulk_qty: Decimal,
    pub bulk_cost: Decimal,
}

impl IngredientBatch {
    pub fn from_input(id: String, input: IngredientBatchInput) -> Self {
        Self {
            id,
            ingredient_id: input.ingredient_id,
            name: input.name,
            date: input.date,
            bulk_qty: input.bulk_qty,
            bulk_cost: input.bulk_cost,
        }
    }

    pub fn cost_per_unit(&self) -> Decimal {
        safe_div(self.bulk_cost, self.bulk_qty)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientBatchInput {
    #[validate(length(min = 1, message = "Ingredient is required"))]
    pub ingredient_id: String,
    #[validate(length(min = 1, message = "Batch name is required"))]
    pub name: String,
    pub date: NaiveDate,
    #[validate(custom = "non_negative_amount")]
    pub bulk_qty: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub bulk_cost: Decimal,
}
