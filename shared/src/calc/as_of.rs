//! "Price as of date" batch lookup

use chrono::NaiveDate;

use crate::models::{IngredientBatch, StrawberryBatch};

/// A record with a purchase date
pub trait Dated {
    fn purchase_date(&self) -> NaiveDate;
}

impl Dated for IngredientBatch {
    fn purchase_date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for StrawberryBatch {
    fn purchase_date(&self) -> NaiveDate {
        self.date()
    }
}

/// Pick the batch that was current on `date`: the last one (by purchase date,
/// then insertion order) bought on or before it. A date before every purchase
/// resolves to the earliest batch. `None` only when there are no batches.
///
/// This is not FIFO consumption; how much of the batch is left plays no part.
pub fn resolve_as_of<'a, T: Dated + 'a>(
    batches: impl IntoIterator<Item = &'a T>,
    date: NaiveDate,
) -> Option<&'a T> {
    let mut sorted: Vec<&T> = batches.into_iter().collect();
    // stable: equal dates keep insertion order
    sorted.sort_by_key(|b| b.purchase_date());

    let mut applicable = None;
    for batch in &sorted {
        if batch.purchase_date() <= date {
            applicable = Some(*batch);
        } else {
            break;
        }
    }
    applicable.or_else(|| sorted.first().copied())
}
