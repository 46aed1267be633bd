//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::non_negative_amount;

/// Ingredient quantities consumed by one unit sold
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Strawberry pieces
    pub strawberries_per_unit: Decimal,
    pub chocolate_g_per_unit: Decimal,
    pub kunafa_g_per_unit: Decimal,
    /// Packaging cups
    pub cups_per_unit: Decimal,
    pub sticks_per_unit: Decimal,
}

impl Recipe {
    pub fn new(
        strawberries: Decimal,
        chocolate_g: Decimal,
        kunafa_g: Decimal,
        cups: Decimal,
        sticks: Decimal,
    ) -> Self {
        Self {
            strawberries_per_unit: strawberries,
            chocolate_g_per_unit: chocolate_g,
            kunafa_g_per_unit: kunafa_g,
            cups_per_unit: cups,
            sticks_per_unit: sticks,
        }
    }

    pub fn quantities(&self) -> [Decimal; 5] {
        [
            self.strawberries_per_unit,
            self.chocolate_g_per_unit,
            self.kunafa_g_per_unit,
            self.cups_per_unit,
            self.sticks_per_unit,
        ]
    }
}

/// A product sold at the kiosk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// When set, `manual_cost_per_unit` is the cost and the recipe is ignored
    #[serde(default)]
    pub use_manual_cost: bool,
    #[serde(default)]
    pub manual_cost_per_unit: Option<Decimal>,
    #[serde(default)]
    pub recipe: Recipe,
}

impl Product {
    pub fn from_input(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            use_manual_cost: input.use_manual_cost,
            manual_cost_per_unit: input.manual_cost_per_unit,
            recipe: input.recipe,
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(use_manual_cost) = patch.use_manual_cost {
            self.use_manual_cost = use_manual_cost;
        }
        if let Some(manual_cost) = patch.manual_cost_per_unit {
            self.manual_cost_per_unit = Some(manual_cost);
        }
        if let Some(recipe) = patch.recipe {
            self.recipe = recipe;
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(custom = "non_negative_amount")]
    pub price: Decimal,
    #[serde(default)]
    pub use_manual_cost: bool,
    #[serde(default)]
    pub manual_cost_per_unit: Option<Decimal>,
    #[serde(default)]
    pub recipe: Recipe,
}

/// Field-by-field product update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub use_manual_cost: Option<bool>,
    pub manual_cost_per_unit: Option<Decimal>,
    pub recipe: Option<Recipe>,
}
