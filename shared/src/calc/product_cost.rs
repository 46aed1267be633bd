//! Per-unit product cost from the recipe, or the manual override

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::cost::{ingredient_cost_per_unit, strawberry_batch_for_date};
use crate::models::{ingredient_ids, LedgerState, Product, StrawberryBatch};

/// Variable cost of one unit of `product`, priced as of `as_of` (or at current
/// prices without a date).
///
/// Manual-cost products return their entered cost. Recipe products add up
/// each recipe quantity times its ingredient's unit cost; strawberries are
/// priced per piece and count as zero until a strawberry batch exists.
pub fn product_cost_per_unit(
    state: &LedgerState,
    product: &Product,
    as_of: Option<NaiveDate>,
) -> Decimal {
    if product.use_manual_cost {
        return product.manual_cost_per_unit.unwrap_or(Decimal::ZERO);
    }

    let recipe = &product.recipe;
    let strawberry = strawberry_batch_for_date(&state.strawberry_batches, as_of)
        .map(StrawberryBatch::cost_per_piece)
        .unwrap_or(Decimal::ZERO);
    let unit = |id| ingredient_cost_per_unit(state, id, as_of);

    recipe.strawberries_per_unit * strawberry
        + recipe.cups_per_unit * unit(ingredient_ids::CUP)
        + recipe.chocolate_g_per_unit * unit(ingredient_ids::CHOCOLATE)
        + recipe.kunafa_g_per_unit * unit(ingredient_ids::KUNAFA)
        + recipe.sticks_per_unit * unit(ingredient_ids::STICKS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::fixtures::{date, ingredient_batch, strawberry_batch};
    use crate::models::Recipe;
    use rust_decimal_macros::dec;

    fn strawberry_only(pieces: Decimal) -> Product {
        Product {
            id: "berries".to_string(),
            name: "Berries".to_string(),
            price: dec!(20),
            use_manual_cost: false,
            manual_cost_per_unit: None,
            recipe: Recipe::new(pieces, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        }
    }

    #[test]
    fn test_piece_component_is_zero_without_batches() {
        let state = LedgerState::default();
        assert_eq!(
            product_cost_per_unit(&state, &strawberry_only(dec!(8)), Some(date(2025, 3, 1))),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_seeded_recipe_at_default_prices() {
        let mut state = LedgerState::default();
        state.strawberry_batches.push(strawberry_batch(
            "s1",
            date(2025, 3, 1),
            dec!(20),
            dec!(1600),
            dec!(20),
        ));
        let normal = state.products["normal"].clone();

        // 8 x 1.6 + 60 x 0.0785 + 1 x 1.23 + 1 x 0.21
        assert_eq!(
            product_cost_per_unit(&state, &normal, Some(date(2025, 3, 2))),
            dec!(18.95)
        );
    }

    #[test]
    fn test_manual_cost_product() {
        let state = LedgerState::default();
        let rocky = state.products["rocky"].clone();
        assert_eq!(product_cost_per_unit(&state, &rocky, None), dec!(50));

        let mut unset = rocky;
        unset.manual_cost_per_unit = None;
        assert_eq!(product_cost_per_unit(&state, &unset, None), Decimal::ZERO);
    }

    #[test]
    fn test_cost_follows_sale_date() {
        let mut state = LedgerState::default();
        state.strawberry_batches = vec![
            strawberry_batch("s1", date(2025, 3, 1), dec!(20), dec!(1600), dec!(20)),
            strawberry_batch("s2", date(2025, 3, 10), dec!(20), dec!(2000), dec!(20)),
        ];
        state.ingredient_batches.push(ingredient_batch(
            "k1",
            "kunafa",
            date(2025, 3, 1),
            dec!(1000),
            dec!(100),
        ));
        let product = Product {
            recipe: Recipe::new(dec!(2), Decimal::ZERO, dec!(10), Decimal::ZERO, Decimal::ZERO),
            ..strawberry_only(dec!(2))
        };

        // 2 x 1.6 + 10 x 0.1
        assert_eq!(
            product_cost_per_unit(&state, &product, Some(date(2025, 3, 5))),
            dec!(4.2)
        );
        // 2 x 2.0 + 10 x 0.1
        assert_eq!(
            product_cost_per_unit(&state, &product, Some(date(2025, 3, 11))),
            dec!(5.0)
        );
    }
}
