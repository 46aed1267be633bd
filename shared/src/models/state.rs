//! The ledger state snapshot handed to every calculator

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ingredient::ingredient_ids;
use super::{
    FeeSettings, FixedCost, Ingredient, IngredientBatch, Product, Recipe, Sale, StrawberryBatch,
    Unit, WasteEntry,
};

/// Everything the kiosk knows. Calculators borrow it and never mutate it.
///
/// Batch vectors keep insertion order: the last element is the most recently
/// added batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    #[serde(default)]
    pub settings: FeeSettings,
    #[serde(default)]
    pub products: BTreeMap<String, Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub fixed_costs: Vec<FixedCost>,
    #[serde(default)]
    pub ingredients: BTreeMap<String, Ingredient>,
    #[serde(default)]
    pub ingredient_batches: Vec<IngredientBatch>,
    #[serde(default)]
    pub strawberry_batches: Vec<StrawberryBatch>,
    #[serde(default)]
    pub waste_entries: Vec<WasteEntry>,
    /// Operator-entered "true remaining" per ingredient
    #[serde(default)]
    pub manual_inventory_adjustments: BTreeMap<String, Decimal>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            settings: FeeSettings::default(),
            products: default_products(),
            sales: Vec::new(),
            fixed_costs: default_fixed_costs(),
            ingredients: default_ingredients(),
            ingredient_batches: Vec::new(),
            strawberry_batches: Vec::new(),
            waste_entries: Vec::new(),
            manual_inventory_adjustments: BTreeMap::new(),
        }
    }
}

impl LedgerState {
    /// A state with no catalog, costs or activity at all
    pub fn empty() -> Self {
        Self {
            settings: FeeSettings::default(),
            products: BTreeMap::new(),
            sales: Vec::new(),
            fixed_costs: Vec::new(),
            ingredients: BTreeMap::new(),
            ingredient_batches: Vec::new(),
            strawberry_batches: Vec::new(),
            waste_entries: Vec::new(),
            manual_inventory_adjustments: BTreeMap::new(),
        }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn fixed_total(&self) -> Decimal {
        self.fixed_costs.iter().map(|c| c.amount).sum()
    }

    /// Overlay stored catalog records on the seeded ones; stored records win
    pub fn merge_catalog(
        &mut self,
        products: impl IntoIterator<Item = Product>,
        ingredients: impl IntoIterator<Item = Ingredient>,
    ) {
        for product in products {
            self.products.insert(product.id.clone(), product);
        }
        for ingredient in ingredients {
            self.ingredients.insert(ingredient.id.clone(), ingredient);
        }
    }

    /// Set (`Some`) or clear (`None`) the manual remaining quantity
    pub fn set_manual_adjustment(&mut self, ingredient_id: &str, remaining: Option<Decimal>) {
        match remaining {
            Some(value) => {
                self.manual_inventory_adjustments
                    .insert(ingredient_id.to_string(), value);
            }
            None => {
                self.manual_inventory_adjustments.remove(ingredient_id);
            }
        }
    }
}

pub fn default_ingredients() -> BTreeMap<String, Ingredient> {
    [
        Ingredient::new(ingredient_ids::CUP, "Cup", Unit::Units, dec!(50), dec!(61.5)),
        Ingredient::new(ingredient_ids::CHOCOLATE, "Chocolate", Unit::Grams, dec!(1000), dec!(78.5)),
        Ingredient::new(ingredient_ids::KUNAFA, "Pistachio Kunafa", Unit::Grams, dec!(2000), dec!(130)),
        Ingredient::new(ingredient_ids::STICKS, "Sticks", Unit::Units, dec!(100), dec!(21)),
        Ingredient::new(ingredient_ids::STRAWBERRY, "Strawberry", Unit::Grams, dec!(1000), dec!(40)),
    ]
    .into_iter()
    .map(|i| (i.id.clone(), i))
    .collect()
}

pub fn default_products() -> BTreeMap<String, Product> {
    let recipe_product = |id: &str, name: &str, price, recipe| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        use_manual_cost: false,
        manual_cost_per_unit: Some(Decimal::ZERO),
        recipe,
    };
    let manual_product = |id: &str, name: &str, price, cost| Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        use_manual_cost: true,
        manual_cost_per_unit: Some(cost),
        recipe: Recipe::default(),
    };

    [
        recipe_product(
            "normal",
            "Strawberry Chocolate",
            dec!(30),
            Recipe::new(dec!(8), dec!(60), Decimal::ZERO, dec!(1), dec!(1)),
        ),
        recipe_product(
            "kunafa",
            "Dubai Chocolate Strawberry",
            dec!(35),
            Recipe::new(dec!(8), dec!(60), dec!(30), dec!(1), dec!(1)),
        ),
        manual_product("rocky", "Rocky Road", dec!(55), dec!(50)),
        manual_product("tips", "Tips", dec!(1), Decimal::ZERO),
        manual_product("cookies", "Cookies", dec!(15), dec!(7.67)),
    ]
    .into_iter()
    .map(|p| (p.id.clone(), p))
    .collect()
}

pub fn default_fixed_costs() -> Vec<FixedCost> {
    vec![
        FixedCost::new("fc1", "Kiosk / Booth", dec!(5650)),
        FixedCost::new("fc2", "Fridge", dec!(1100)),
        FixedCost::new("fc3", "Machinery / Equipment", dec!(3150)),
        FixedCost::new("fc4", "Kiosk Delivery", dec!(450)),
    ]
}
