//! Sales records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where a sale line was entered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaleOrigin {
    /// Rung up on the point-of-sale terminal; incurs the per-transaction fee
    Pos,
    #[default]
    Manual,
}

impl SaleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleOrigin::Pos => "pos",
            SaleOrigin::Manual => "manual",
        }
    }
}

/// One sale line. `unit_price` is frozen at the time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: String,
    pub date: NaiveDate,
    pub product_id: String,
    pub qty: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub origin: SaleOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Sale {
    pub fn revenue(&self) -> Decimal {
        Decimal::from(self.qty) * self.unit_price
    }

    /// Fee grouping key: the checkout id, or the line itself when there is none
    pub fn transaction_key(&self) -> &str {
        match self.transaction_id.as_deref() {
            Some(tx) if !tx.is_empty() => tx,
            _ => &self.id,
        }
    }

    pub fn is_pos(&self) -> bool {
        self.origin == SaleOrigin::Pos
    }
}

/// Input for recording a sale
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaleInput {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    #[validate(range(min = 1, max = 100000, message = "Quantity must be between 1 and 100000"))]
    pub qty: u32,
    /// Defaults to the product's current price
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub origin: SaleOrigin,
    pub transaction_id: Option<String>,
}
