//! Stock positions per ingredient
//!
//! Remaining stock is purchases minus recipe usage minus waste, and is allowed
//! to go negative: that is the signal an operator uses to spot missing
//! purchases. An operator can replace the calculated figure with a counted
//! one through a manual adjustment.

use rust_decimal::Decimal;

use crate::models::{
    ingredient_ids, IngredientInventory, IngredientUsage, LedgerState, StrawberryBatch, Unit,
};
use crate::types::safe_div;

/// One record for strawberries followed by one per other known ingredient
pub fn project_inventory(state: &LedgerState, usage: &IngredientUsage) -> Vec<IngredientInventory> {
    let mut records = Vec::with_capacity(state.ingredients.len() + 1);
    records.push(strawberry_inventory(state, usage));

    for ingredient in state.ingredients.values() {
        if ingredient.id == ingredient_ids::STRAWBERRY {
            continue;
        }
        let (purchased, total_cost) = state
            .ingredient_batches
            .iter()
            .filter(|b| b.ingredient_id == ingredient.id)
            .fold((Decimal::ZERO, Decimal::ZERO), |(qty, cost), b| {
                (qty + b.bulk_qty, cost + b.bulk_cost)
            });
        let cost_per_unit = if purchased.is_zero() {
            ingredient.default_cost_per_unit()
        } else {
            safe_div(total_cost, purchased)
        };

        records.push(position(
            state,
            &ingredient.id,
            ingredient.name.clone(),
            ingredient.unit.symbol(),
            purchased,
            used_from(usage, &ingredient.id),
            total_cost,
            cost_per_unit,
        ));
    }

    records
}

fn strawberry_inventory(state: &LedgerState, usage: &IngredientUsage) -> IngredientInventory {
    let id = ingredient_ids::STRAWBERRY;
    let purchased: Decimal = state
        .strawberry_batches
        .iter()
        .map(StrawberryBatch::bulk_weight_g)
        .sum();
    let total_cost: Decimal = state
        .strawberry_batches
        .iter()
        .map(StrawberryBatch::bulk_cost)
        .sum();

    let ingredient = state.ingredients.get(id);
    let cost_per_unit = if purchased.is_zero() {
        ingredient
            .map(|i| i.default_cost_per_unit())
            .unwrap_or(Decimal::ZERO)
    } else {
        safe_div(total_cost, purchased)
    };
    let name = ingredient
        .map(|i| i.name.clone())
        .unwrap_or_else(|| "Strawberry".to_string());

    position(
        state,
        id,
        name,
        Unit::Grams.symbol(),
        purchased,
        usage.strawberries_g,
        total_cost,
        cost_per_unit,
    )
}

#[allow(clippy::too_many_arguments)]
fn position(
    state: &LedgerState,
    id: &str,
    name: String,
    unit: &str,
    purchased: Decimal,
    used: Decimal,
    total_cost: Decimal,
    cost_per_unit: Decimal,
) -> IngredientInventory {
    let wasted: Decimal = state
        .waste_entries
        .iter()
        .filter(|w| w.ingredient_id == id)
        .map(|w| w.qty)
        .sum();
    let calculated = purchased - used - wasted;
    let adjustment = state.manual_inventory_adjustments.get(id).copied();

    IngredientInventory {
        ingredient_id: id.to_string(),
        name,
        total_purchased: purchased,
        total_used: used,
        total_wasted: wasted,
        remaining: adjustment.unwrap_or(calculated),
        manually_adjusted: adjustment.is_some(),
        unit: unit.to_string(),
        total_cost,
        cost_per_unit,
    }
}

fn used_from(usage: &IngredientUsage, ingredient_id: &str) -> Decimal {
    match ingredient_id {
        ingredient_ids::CHOCOLATE => usage.chocolate_g,
        ingredient_ids::KUNAFA => usage.kunafa_g,
        ingredient_ids::CUP => usage.cups_used,
        ingredient_ids::STICKS => usage.sticks_used,
        _ => Decimal::ZERO,
    }
}

/// Remaining quantity for one ingredient in a projection, zero if absent
pub fn remaining_of(records: &[IngredientInventory], ingredient_id: &str) -> Decimal {
    records
        .iter()
        .find(|r| r.ingredient_id == ingredient_id)
        .map(|r| r.remaining)
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::fixtures::{date, ingredient_batch, strawberry_batch, waste};
    use crate::models::Ingredient;
    use rust_decimal_macros::dec;

    fn find<'a>(records: &'a [IngredientInventory], id: &str) -> &'a IngredientInventory {
        records.iter().find(|r| r.ingredient_id == id).unwrap()
    }

    #[test]
    fn test_strawberry_first_then_other_ingredients() {
        let state = LedgerState::default();
        let records = project_inventory(&state, &IngredientUsage::default());

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].ingredient_id, "strawberry");
        assert_eq!(records[0].unit, "g");
        assert!(records[1..].iter().all(|r| r.ingredient_id != "strawberry"));
    }

    #[test]
    fn test_purchased_used_wasted_and_cost() {
        let mut state = LedgerState::default();
        state.ingredient_batches = vec![
            ingredient_batch("c1", "chocolate", date(2025, 3, 1), dec!(1000), dec!(80)),
            ingredient_batch("c2", "chocolate", date(2025, 3, 8), dec!(1000), dec!(100)),
        ];
        state.waste_entries.push(waste("w1", "chocolate", dec!(50), dec!(4)));
        let usage = IngredientUsage {
            chocolate_g: dec!(600),
            ..Default::default()
        };

        let records = project_inventory(&state, &usage);
        let chocolate = find(&records, "chocolate");
        assert_eq!(chocolate.total_purchased, dec!(2000));
        assert_eq!(chocolate.total_used, dec!(600));
        assert_eq!(chocolate.total_wasted, dec!(50));
        assert_eq!(chocolate.remaining, dec!(1350));
        assert_eq!(chocolate.total_cost, dec!(180));
        assert_eq!(chocolate.cost_per_unit, dec!(0.09));
        assert!(!chocolate.manually_adjusted);
    }

    #[test]
    fn test_nothing_purchased_uses_default_ratio() {
        let state = LedgerState::default();
        let records = project_inventory(&state, &IngredientUsage::default());
        let cup = find(&records, "cup");
        assert_eq!(cup.total_purchased, Decimal::ZERO);
        assert_eq!(cup.total_cost, Decimal::ZERO);
        assert_eq!(cup.cost_per_unit, dec!(1.23));
    }

    #[test]
    fn test_strawberries_in_grams() {
        let mut state = LedgerState::default();
        state.strawberry_batches.push(strawberry_batch(
            "s1",
            date(2025, 3, 1),
            dec!(20),
            dec!(1600),
            dec!(20),
        ));
        let usage = IngredientUsage {
            strawberries_g: dec!(1600),
            strawberries_pcs: dec!(80),
            ..Default::default()
        };

        let records = project_inventory(&state, &usage);
        let berries = &records[0];
        assert_eq!(berries.total_purchased, dec!(20000));
        assert_eq!(berries.remaining, dec!(18400));
        assert_eq!(berries.cost_per_unit, dec!(0.08));
        assert_eq!(berries.total_cost, dec!(1600));
    }

    #[test]
    fn test_negative_remaining_is_kept() {
        let state = LedgerState::default();
        let usage = IngredientUsage {
            cups_used: dec!(120),
            ..Default::default()
        };
        let records = project_inventory(&state, &usage);
        assert_eq!(find(&records, "cup").remaining, dec!(-120));
    }

    #[test]
    fn test_manual_adjustment_overrides_until_cleared() {
        let mut state = LedgerState::default();
        let usage = IngredientUsage {
            cups_used: dec!(120),
            ..Default::default()
        };

        state.set_manual_adjustment("cup", Some(dec!(500)));
        let adjusted = project_inventory(&state, &usage);
        assert_eq!(find(&adjusted, "cup").remaining, dec!(500));
        assert!(find(&adjusted, "cup").manually_adjusted);

        state.set_manual_adjustment("cup", None);
        let cleared = project_inventory(&state, &usage);
        assert_eq!(find(&cleared, "cup").remaining, dec!(-120));
    }

    #[test]
    fn test_custom_ingredient_has_no_usage() {
        let mut state = LedgerState::default();
        state.ingredients.insert(
            "napkins".to_string(),
            Ingredient::new("napkins", "Napkins", Unit::Units, dec!(200), dec!(10)),
        );
        let records = project_inventory(&state, &IngredientUsage::default());
        let napkins = find(&records, "napkins");
        assert_eq!(napkins.total_used, Decimal::ZERO);
        assert_eq!(napkins.unit, "units");
    }

    #[test]
    fn test_remaining_of() {
        let state = LedgerState::default();
        let records = project_inventory(&state, &IngredientUsage::default());
        assert_eq!(remaining_of(&records, "kunafa"), Decimal::ZERO);
        assert_eq!(remaining_of(&records, "missing"), Decimal::ZERO);
    }
}
