//! Unit-cost resolvers

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::as_of::resolve_as_of;
use crate::models::{ingredient_ids, IngredientBatch, LedgerState, StrawberryBatch};

/// Cost of one unit of an ingredient.
///
/// With a date, the batch current on that date prices it. Without one, the
/// most recently added batch does. An ingredient with no batches falls back to
/// its default bulk ratio; an unknown ingredient costs nothing.
pub fn ingredient_cost_per_unit(
    state: &LedgerState,
    ingredient_id: &str,
    as_of: Option<NaiveDate>,
) -> Decimal {
    let batches: Vec<&IngredientBatch> = state
        .ingredient_batches
        .iter()
        .filter(|b| b.ingredient_id == ingredient_id)
        .collect();

    if batches.is_empty() {
        return state
            .ingredients
            .get(ingredient_id)
            .map(|i| i.default_cost_per_unit())
            .unwrap_or(Decimal::ZERO);
    }

    let batch = match as_of {
        Some(date) => resolve_as_of(batches.iter().copied(), date),
        None => batches.last().copied(),
    };
    batch.map(IngredientBatch::cost_per_unit).unwrap_or(Decimal::ZERO)
}

/// The most recently added strawberry batch
pub fn active_strawberry_batch(batches: &[StrawberryBatch]) -> Option<&StrawberryBatch> {
    batches.last()
}

/// Strawberry batch current on `date`, or the active one without a date
pub fn strawberry_batch_for_date(
    batches: &[StrawberryBatch],
    date: Option<NaiveDate>,
) -> Option<&StrawberryBatch> {
    match date {
        Some(date) => resolve_as_of(batches, date),
        None => active_strawberry_batch(batches),
    }
}

/// Unit cost used to value a waste entry at the time it is recorded.
///
/// Strawberries are valued per gram of the active batch (zero with no batch);
/// everything else at the undated ingredient cost.
pub fn waste_unit_cost(state: &LedgerState, ingredient_id: &str) -> Decimal {
    if ingredient_id == ingredient_ids::STRAWBERRY {
        return active_strawberry_batch(&state.strawberry_batches)
            .map(StrawberryBatch::cost_per_gram)
            .unwrap_or(Decimal::ZERO);
    }
    ingredient_cost_per_unit(state, ingredient_id, None)
}
