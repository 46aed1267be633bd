//! Ingredient quantities consumed by recorded sales

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::cost::strawberry_batch_for_date;
use super::policy::CalcPolicy;
use crate::models::{IngredientUsage, LedgerState, Product, Sale, StrawberryBatch};

/// Total ingredient consumption implied by `sales`.
///
/// Skips sales whose product is gone and sales of manual-cost products, which
/// have no recipe. Strawberry pieces are converted to grams with the average
/// piece weight of the batch current on each sale's date.
pub fn ingredient_usage(
    sales: &[Sale],
    products: &BTreeMap<String, Product>,
    strawberry_batches: &[StrawberryBatch],
    policy: &CalcPolicy,
) -> IngredientUsage {
    let mut usage = IngredientUsage::default();

    for sale in sales {
        let Some(product) = products.get(&sale.product_id) else {
            continue;
        };
        if product.use_manual_cost {
            continue;
        }

        let qty = Decimal::from(sale.qty);
        let recipe = &product.recipe;
        let piece_weight = strawberry_batch_for_date(strawberry_batches, Some(sale.date))
            .map(StrawberryBatch::avg_weight_per_piece)
            .unwrap_or(policy.default_piece_weight_g);

        let pieces = recipe.strawberries_per_unit * qty;
        usage.strawberries_pcs += pieces;
        usage.strawberries_g += pieces * piece_weight;
        usage.chocolate_g += recipe.chocolate_g_per_unit * qty;
        usage.kunafa_g += recipe.kunafa_g_per_unit * qty;
        usage.cups_used += recipe.cups_per_unit * qty;
        usage.sticks_used += recipe.sticks_per_unit * qty;
    }

    usage
}

/// [`ingredient_usage`] over every sale in the state
pub fn state_usage(state: &LedgerState, policy: &CalcPolicy) -> IngredientUsage {
    ingredient_usage(
        &state.sales,
        &state.products,
        &state.strawberry_batches,
        policy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::fixtures::{date, sale, strawberry_batch};
    use rust_decimal_macros::dec;

    #[test]
    fn test_usage_for_recipe_sales() {
        let mut state = LedgerState::default();
        state.sales = vec![
            sale("s1", date(2025, 3, 1), "normal", 2, dec!(30)),
            sale("s2", date(2025, 3, 1), "kunafa", 1, dec!(35)),
        ];

        let usage = state_usage(&state, &CalcPolicy::default());
        assert_eq!(usage.strawberries_pcs, dec!(24));
        // no batch yet: 20 g per piece
        assert_eq!(usage.strawberries_g, dec!(480));
        assert_eq!(usage.chocolate_g, dec!(180));
        assert_eq!(usage.kunafa_g, dec!(30));
        assert_eq!(usage.cups_used, dec!(3));
        assert_eq!(usage.sticks_used, dec!(3));
    }

    #[test]
    fn test_piece_weight_follows_sale_date() {
        let mut state = LedgerState::default();
        state.strawberry_batches = vec![
            strawberry_batch("b1", date(2025, 3, 1), dec!(10), dec!(800), dec!(20)),
            strawberry_batch("b2", date(2025, 3, 10), dec!(10), dec!(800), dec!(25)),
        ];
        state.sales = vec![
            sale("s1", date(2025, 3, 5), "normal", 1, dec!(30)),
            sale("s2", date(2025, 3, 12), "normal", 1, dec!(30)),
        ];

        let usage = state_usage(&state, &CalcPolicy::default());
        assert_eq!(usage.strawberries_g, dec!(8) * dec!(20) + dec!(8) * dec!(25));
    }

    #[test]
    fn test_skips_manual_cost_and_orphaned_sales() {
        let mut state = LedgerState::default();
        state.sales = vec![
            sale("s1", date(2025, 3, 1), "rocky", 3, dec!(55)),
            sale("s2", date(2025, 3, 1), "deleted-product", 5, dec!(10)),
        ];
        assert_eq!(
            state_usage(&state, &CalcPolicy::default()),
            IngredientUsage::default()
        );
    }
}
