//! Business constants the calculators take as input rather than hard-code

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Automatic card-terminal fee charged once per POS checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutoPosFee {
    pub fixed_charge: Decimal,
    /// Fraction of the checkout revenue (0.026 = 2.6%)
    pub rate: Decimal,
}

impl AutoPosFee {
    pub fn fee_for(&self, transaction_revenue: Decimal) -> Decimal {
        self.fixed_charge + self.rate * transaction_revenue
    }
}

impl Default for AutoPosFee {
    fn default() -> Self {
        Self {
            fixed_charge: Decimal::ONE,
            rate: dec!(0.026),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalcPolicy {
    pub auto_pos_fee: AutoPosFee,
    /// Product whose revenue is reported separately as tips
    pub tips_product_id: String,
    /// Product carrying a flat per-unit deduction from revenue
    pub specialty_product_id: String,
    pub specialty_deduction_per_unit: Decimal,
    /// Strawberry piece weight assumed before any batch is bought
    pub default_piece_weight_g: Decimal,
}

impl Default for CalcPolicy {
    fn default() -> Self {
        Self {
            auto_pos_fee: AutoPosFee::default(),
            tips_product_id: "tips".to_string(),
            specialty_product_id: "rocky".to_string(),
            specialty_deduction_per_unit: dec!(50),
            default_piece_weight_g: dec!(20),
        }
    }
}
