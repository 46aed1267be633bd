//! Strawberry purchase batches
//!
//! Strawberries are bought by weight but consumed by the piece, so each batch
//! carries an average piece weight and two derived prices. The derived prices
//! are stored for display, but every constructor and mutator recomputes them:
//!
//! - `cost_per_gram = bulk_cost / bulk_weight_g` (0 when the weight is 0)
//! - `cost_per_piece = cost_per_gram * avg_weight_per_piece`
//!
//! Fields are private so the derived values cannot drift from their inputs.
//! Deserialized records are recomputed too, so a stale stored price is never
//! trusted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::safe_div;
use crate::validation::{non_negative_amount, positive_amount};

const GRAMS_PER_KG: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StoredStrawberryBatch")]
pub struct StrawberryBatch {
    id: String,
    name: String,
    date: NaiveDate,
    bulk_weight_kg: Decimal,
    bulk_weight_g: Decimal,
    bulk_cost: Decimal,
    avg_weight_per_piece: Decimal,
    cost_per_gram: Decimal,
    cost_per_piece: Decimal,
}

impl StrawberryBatch {
    pub fn new(id: String, input: StrawberryBatchInput) -> Self {
        let mut batch = Self {
            id,
            name: input.name,
            date: input.date,
            bulk_weight_kg: input.bulk_weight_kg,
            bulk_weight_g: input.bulk_weight_kg * GRAMS_PER_KG,
            bulk_cost: input.bulk_cost,
            avg_weight_per_piece: input.avg_weight_per_piece,
            cost_per_gram: Decimal::ZERO,
            cost_per_piece: Decimal::ZERO,
        };
        batch.recompute();
        batch
    }

    pub fn update(&mut self, patch: StrawberryBatchPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kg) = patch.bulk_weight_kg {
            self.bulk_weight_kg = kg;
            self.bulk_weight_g = kg * GRAMS_PER_KG;
        }
        if let Some(cost) = patch.bulk_cost {
            self.bulk_cost = cost;
        }
        if let Some(weight) = patch.avg_weight_per_piece {
            self.avg_weight_per_piece = weight;
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.cost_per_gram = safe_div(self.bulk_cost, self.bulk_weight_g);
        self.cost_per_piece = self.cost_per_gram * self.avg_weight_per_piece;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn bulk_weight_kg(&self) -> Decimal {
        self.bulk_weight_kg
    }

    pub fn bulk_weight_g(&self) -> Decimal {
        self.bulk_weight_g
    }

    pub fn bulk_cost(&self) -> Decimal {
        self.bulk_cost
    }

    pub fn avg_weight_per_piece(&self) -> Decimal {
        self.avg_weight_per_piece
    }

    pub fn cost_per_gram(&self) -> Decimal {
        self.cost_per_gram
    }

    pub fn cost_per_piece(&self) -> Decimal {
        self.cost_per_piece
    }
}

/// Wire shape of a stored batch; derived prices are ignored on the way in
#[derive(Deserialize)]
struct StoredStrawberryBatch {
    id: String,
    name: String,
    date: NaiveDate,
    #[serde(default)]
    bulk_weight_kg: Decimal,
    #[serde(default)]
    bulk_weight_g: Decimal,
    bulk_cost: Decimal,
    avg_weight_per_piece: Decimal,
}

impl From<StoredStrawberryBatch> for StrawberryBatch {
    fn from(stored: StoredStrawberryBatch) -> Self {
        let grams = if stored.bulk_weight_g.is_zero() {
            stored.bulk_weight_kg * GRAMS_PER_KG
        } else {
            stored.bulk_weight_g
        };
        let mut batch = Self {
            id: stored.id,
            name: stored.name,
            date: stored.date,
            bulk_weight_kg: grams / GRAMS_PER_KG,
            bulk_weight_g: grams,
            bulk_cost: stored.bulk_cost,
            avg_weight_per_piece: stored.avg_weight_per_piece,
            cost_per_gram: Decimal::ZERO,
            cost_per_piece: Decimal::ZERO,
        };
        batch.recompute();
        batch
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StrawberryBatchInput {
    #[validate(length(min = 1, message = "Batch name is required"))]
    pub name: String,
    pub date: NaiveDate,
    #[validate(custom = "non_negative_amount")]
    pub bulk_weight_kg: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub bulk_cost: Decimal,
    #[validate(custom = "positive_amount")]
    pub avg_weight_per_piece: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrawberryBatchPatch {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub bulk_weight_kg: Option<Decimal>,
    pub bulk_cost: Option<Decimal>,
    pub avg_weight_per_piece: Option<Decimal>,
}
