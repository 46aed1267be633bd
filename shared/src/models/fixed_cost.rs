//! Fixed cost models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::non_negative_amount;

/// A flat expense covering the whole reporting window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedCost {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

impl FixedCost {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }

    pub fn apply(&mut self, patch: FixedCostPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FixedCostInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom = "non_negative_amount")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixedCostPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
}
