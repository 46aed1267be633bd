//! Validation utilities for the Kiosk Ledger
//!
//! Everything here runs at the form boundary. The calculators assume numeric
//! fields are already valid numbers and never re-check them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::{
    FeeSettingsPatch, FixedCostPatch, IngredientPatch, ProductInput, ProductPatch, Recipe,
    StrawberryBatchPatch,
};

// ============================================================================
// Amount bounds
// ============================================================================

/// Largest sale quantity accepted for one line
pub const MAX_SALE_QTY: u32 = 100_000;

/// Largest money amount or ingredient quantity accepted at the boundary.
///
/// Keeps every `qty x price` product and ledger-wide sum far inside the
/// range `Decimal` arithmetic can represent.
pub fn max_amount() -> Decimal {
    Decimal::from(1_000_000_000_000u64)
}

/// A non-negative amount no larger than [`max_amount`]
pub fn check_amount(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    if value > max_amount() {
        return Err("Amount is too large");
    }
    Ok(())
}

// ============================================================================
// Field validators used by `#[derive(Validate)]`
// ============================================================================

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    check_amount(*value).map_err(|message| amount_error("amount_range", message))
}

pub fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_zero() {
        return Err(amount_error("positive", "Amount must be greater than zero"));
    }
    non_negative_amount(value)
}

// ============================================================================
// Form field parsing
// ============================================================================

/// Parse a money or quantity field typed by the operator
pub fn parse_amount(raw: &str) -> Result<Decimal, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Amount is required");
    }
    let amount = trimmed
        .parse::<Decimal>()
        .map_err(|_| "Amount must be a number")?;
    if amount.abs() > max_amount() {
        return Err("Amount is too large");
    }
    Ok(amount)
}

/// Parse a sale quantity (positive whole number)
pub fn parse_quantity(raw: &str) -> Result<u32, &'static str> {
    let qty: u32 = raw
        .trim()
        .parse()
        .map_err(|_| "Quantity must be a whole number")?;
    if qty == 0 {
        return Err("Quantity must be at least 1");
    }
    if qty > MAX_SALE_QTY {
        return Err("Quantity is too large");
    }
    Ok(qty)
}

/// Parse a `YYYY-MM-DD` date field
pub fn parse_date(raw: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| "Date must be YYYY-MM-DD")
}

// ============================================================================
// Record-level checks
// ============================================================================

/// Validate a POS fee percentage (0-100)
pub fn validate_fee_percent(percent: Decimal) -> Result<(), &'static str> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err("POS fee percentage must be between 0 and 100");
    }
    Ok(())
}

pub fn validate_fee_settings(patch: &FeeSettingsPatch) -> Result<(), &'static str> {
    if let Some(percent) = patch.pos_fee_percent {
        validate_fee_percent(percent)?;
    }
    if let Some(manual) = patch.pos_fee_manual {
        check_amount(manual).map_err(|_| "Manual POS fee must be a non-negative amount")?;
    }
    Ok(())
}

pub fn validate_recipe(recipe: &Recipe) -> Result<(), &'static str> {
    recipe
        .quantities()
        .into_iter()
        .try_for_each(check_amount)
        .map_err(|_| "Recipe quantities must be non-negative amounts")
}

fn validate_manual_cost(manual_cost: Option<Decimal>) -> Result<(), &'static str> {
    match manual_cost {
        Some(cost) => check_amount(cost).map_err(|_| "Manual cost must be a non-negative amount"),
        None => Ok(()),
    }
}

/// Checks a product input beyond what the derive covers
pub fn validate_product_input(input: &ProductInput) -> Result<(), &'static str> {
    validate_manual_cost(input.manual_cost_per_unit)?;
    validate_recipe(&input.recipe)
}

pub fn validate_product_patch(patch: &ProductPatch) -> Result<(), &'static str> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err("Product name is required");
        }
    }
    if let Some(price) = patch.price {
        check_amount(price).map_err(|_| "Price must be a non-negative amount")?;
    }
    validate_manual_cost(patch.manual_cost_per_unit)?;
    if let Some(recipe) = &patch.recipe {
        validate_recipe(recipe)?;
    }
    Ok(())
}

fn blank(name: &Option<String>) -> bool {
    name.as_deref().is_some_and(|n| n.trim().is_empty())
}

fn out_of_range(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| check_amount(v).is_err())
}

pub fn validate_ingredient_patch(patch: &IngredientPatch) -> Result<(), &'static str> {
    if blank(&patch.name) {
        return Err("Ingredient name is required");
    }
    if out_of_range(patch.default_bulk_qty) || out_of_range(patch.default_bulk_cost) {
        return Err("Bulk quantity and cost must be non-negative amounts");
    }
    Ok(())
}

pub fn validate_fixed_cost_patch(patch: &FixedCostPatch) -> Result<(), &'static str> {
    if blank(&patch.name) {
        return Err("Name is required");
    }
    if out_of_range(patch.amount) {
        return Err("Amount must be a non-negative amount");
    }
    Ok(())
}

pub fn validate_strawberry_batch_patch(patch: &StrawberryBatchPatch) -> Result<(), &'static str> {
    if blank(&patch.name) {
        return Err("Batch name is required");
    }
    if out_of_range(patch.bulk_weight_kg) || out_of_range(patch.bulk_cost) {
        return Err("Weight and cost must be non-negative amounts");
    }
    if patch
        .avg_weight_per_piece
        .is_some_and(|w| w.is_zero() || check_amount(w).is_err())
    {
        return Err("Average piece weight must be greater than zero");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SaleInput, SaleOrigin, StrawberryBatchInput};
    use rust_decimal_macros::dec;
    use validator::Validate;

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("30"), Ok(dec!(30)));
        assert_eq!(parse_amount(" 61.5 "), Ok(dec!(61.5)));
    }

    #[test]
    fn test_parse_amount_rejects_non_numeric() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("1.5").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-14"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
        );
        assert!(parse_date("14/03/2025").is_err());
    }

    // ========================================================================
    // Record checks
    // ========================================================================

    #[test]
    fn test_fee_percent_bounds() {
        assert!(validate_fee_percent(dec!(0)).is_ok());
        assert!(validate_fee_percent(dec!(100)).is_ok());
        assert!(validate_fee_percent(dec!(-0.1)).is_err());
        assert!(validate_fee_percent(dec!(100.5)).is_err());
    }

    #[test]
    fn test_fee_settings_patch() {
        let ok = FeeSettingsPatch {
            pos_fee_percent: Some(dec!(2.6)),
            ..Default::default()
        };
        assert!(validate_fee_settings(&ok).is_ok());

        let negative_manual = FeeSettingsPatch {
            pos_fee_manual: Some(dec!(-1)),
            ..Default::default()
        };
        assert!(validate_fee_settings(&negative_manual).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(check_amount(Decimal::ZERO).is_ok());
        assert!(check_amount(max_amount()).is_ok());
        assert!(check_amount(max_amount() + Decimal::ONE).is_err());
        assert!(check_amount(Decimal::MAX).is_err());
        assert!(non_negative_amount(&Decimal::MAX).is_err());
        assert!(positive_amount(&Decimal::MAX).is_err());
        assert!(parse_amount("79228162514264337593543950335").is_err());
        assert!(parse_quantity("100001").is_err());
    }

    #[test]
    fn test_oversized_patch_values_rejected() {
        let product = ProductPatch {
            price: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(validate_product_patch(&product).is_err());

        let fee = FeeSettingsPatch {
            pos_fee_manual: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(validate_fee_settings(&fee).is_err());

        let mut recipe = Recipe::default();
        recipe.chocolate_g_per_unit = Decimal::MAX;
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_recipe_rejects_negative() {
        let mut recipe = Recipe::default();
        assert!(validate_recipe(&recipe).is_ok());
        recipe.kunafa_g_per_unit = dec!(-1);
        assert!(validate_recipe(&recipe).is_err());
    }

    #[test]
    fn test_product_patch_rejects_blank_name() {
        let patch = ProductPatch {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_product_patch(&patch).is_err());
    }

    #[test]
    fn test_patch_checks() {
        let ingredient = IngredientPatch {
            default_bulk_cost: Some(dec!(-5)),
            ..Default::default()
        };
        assert!(validate_ingredient_patch(&ingredient).is_err());

        let fixed = FixedCostPatch {
            amount: Some(dec!(450)),
            ..Default::default()
        };
        assert!(validate_fixed_cost_patch(&fixed).is_ok());

        let batch = StrawberryBatchPatch {
            avg_weight_per_piece: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(validate_strawberry_batch_patch(&batch).is_err());
    }

    #[test]
    fn test_sale_input_derive() {
        let mut input = SaleInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            product_id: "normal".to_string(),
            qty: 2,
            unit_price: None,
            origin: SaleOrigin::Pos,
            transaction_id: None,
        };
        assert!(input.validate().is_ok());

        input.qty = 0;
        assert!(input.validate().is_err());

        input.qty = MAX_SALE_QTY + 1;
        assert!(input.validate().is_err());

        input.qty = 1;
        input.product_id.clear();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_strawberry_batch_needs_piece_weight() {
        let input = StrawberryBatchInput {
            name: "Week 1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            bulk_weight_kg: dec!(20),
            bulk_cost: dec!(1600),
            avg_weight_per_piece: Decimal::ZERO,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("avg_weight_per_piece"));
    }
}
