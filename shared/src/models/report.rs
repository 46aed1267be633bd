//! Plain-data results produced by the calculators

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SaleOrigin;

/// Ingredient quantities consumed by all recorded sales
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IngredientUsage {
    pub strawberries_g: Decimal,
    pub strawberries_pcs: Decimal,
    pub chocolate_g: Decimal,
    pub kunafa_g: Decimal,
    pub cups_used: Decimal,
    pub sticks_used: Decimal,
}

/// Stock position of one ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientInventory {
    pub ingredient_id: String,
    pub name: String,
    pub total_purchased: Decimal,
    pub total_used: Decimal,
    pub total_wasted: Decimal,
    /// May be negative; a manual adjustment replaces the calculated value
    pub remaining: Decimal,
    /// True when `remaining` comes from a manual adjustment
    pub manually_adjusted: bool,
    pub unit: String,
    pub total_cost: Decimal,
    pub cost_per_unit: Decimal,
}

/// Automatic fee for one POS checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionFee {
    /// Transaction id, or the sale id for a standalone line
    pub key: String,
    pub revenue: Decimal,
    pub fee: Decimal,
    pub line_count: usize,
    /// Sale that displays the fee
    pub first_sale_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionFees {
    /// In order of first appearance
    pub transactions: Vec<TransactionFee>,
    pub total: Decimal,
}

impl TransactionFees {
    /// Fee to show on a sale line; only the first line of a group carries it
    pub fn fee_for_line(&self, sale_id: &str) -> Option<Decimal> {
        self.transactions
            .iter()
            .find(|t| t.first_sale_id == sale_id)
            .map(|t| t.fee)
    }
}

/// One row of the sales ledger, in date order with running totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRow {
    pub index: usize,
    pub sale_id: String,
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub qty: u32,
    pub unit_price: Decimal,
    pub origin: SaleOrigin,
    pub revenue: Decimal,
    pub cost_per_unit: Decimal,
    pub var_cost: Decimal,
    pub profit_before_fixed: Decimal,
    pub cumulative_revenue: Decimal,
    pub cumulative_profit: Decimal,
    pub net_after_fixed: Decimal,
    pub is_break_even: bool,
    pub remaining_to_break_even: Decimal,
    pub strawberry_g: Decimal,
    pub chocolate_g: Decimal,
    pub kunafa_g: Decimal,
    pub batch_used: String,
    pub pos_fee: Option<Decimal>,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub gross_revenue: Decimal,
    /// Gross minus global fee, automatic POS fees and the specialty deduction
    pub net_revenue: Decimal,
    pub revenue_excluding_specialty: Decimal,
    pub tips_revenue: Decimal,
    pub specialty_deduction: Decimal,
    pub pos_fees: Decimal,
    pub auto_pos_fees: Decimal,
    /// Money spent on ingredient purchases
    pub total_var_cost: Decimal,
    /// Recipe cost of what was sold
    pub cost_of_goods_sold: Decimal,
    pub profit_before_fixed: Decimal,
    pub fixed_total: Decimal,
    pub net_after_fixed: Decimal,
    pub remaining_to_break_even: Decimal,
    pub is_break_even: bool,
    pub total_units: u64,
    pub usage: IngredientUsage,
    pub strawberry_remaining_g: Decimal,
    pub chocolate_remaining_g: Decimal,
    pub kunafa_remaining_g: Decimal,
    pub cups_remaining: Decimal,
    pub sticks_remaining: Decimal,
    pub total_waste_cost: Decimal,
}

/// A candidate split of a checkout amount into product counts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductCombo {
    /// `(product_id, count)` in price-list order, zero counts omitted
    pub items: Vec<(String, u32)>,
}

