//! Split a card-terminal total back into product counts

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{LedgerState, ProductCombo};

/// Default ceiling on the card total handed to [`find_combinations`]
pub const DEFAULT_MAX_CLASSIFIER_AMOUNT: u32 = 2_000;

/// A product with a whole-currency price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricedProduct {
    pub product_id: String,
    pub price: u32,
}

/// Price list for the given products, in the given order. Unknown products and
/// prices that are zero, negative or fractional are left out.
pub fn priced_products(state: &LedgerState, product_ids: &[String]) -> Vec<PricedProduct> {
    product_ids
        .iter()
        .filter_map(|id| {
            let product = state.product(id)?;
            if !product.price.fract().is_zero() {
                return None;
            }
            let price = product.price.to_u32().filter(|p| *p > 0)?;
            Some(PricedProduct {
                product_id: id.clone(),
                price,
            })
        })
        .collect()
}

/// Every non-empty combination of product counts summing to `amount`.
///
/// Counts of earlier products ascend in the outer loops; the last product
/// takes whatever remains when it divides evenly.
pub fn find_combinations(amount: u32, products: &[PricedProduct]) -> Vec<ProductCombo> {
    let mut combos = Vec::new();
    if products.iter().any(|p| p.price == 0) {
        return combos;
    }
    let mut counts = Vec::with_capacity(products.len());
    search(amount, products, &mut counts, &mut combos);
    combos
}

fn search(
    remaining: u32,
    products: &[PricedProduct],
    counts: &mut Vec<u32>,
    combos: &mut Vec<ProductCombo>,
) {
    let idx = counts.len();
    let Some(product) = products.get(idx) else {
        return;
    };

    if idx + 1 == products.len() {
        if remaining % product.price == 0 {
            counts.push(remaining / product.price);
            if counts.iter().any(|n| *n > 0) {
                combos.push(combo_from(products, counts));
            }
            counts.pop();
        }
        return;
    }

    for n in 0..=remaining / product.price {
        counts.push(n);
        search(remaining - n * product.price, products, counts, combos);
        counts.pop();
    }
}

fn combo_from(products: &[PricedProduct], counts: &[u32]) -> ProductCombo {
    ProductCombo {
        items: products
            .iter()
            .zip(counts)
            .filter(|(_, n)| **n > 0)
            .map(|(p, n)| (p.product_id.clone(), *n))
            .collect(),
    }
}

/// Units per product across confirmed combinations, `None` if a total
/// overflows `u32`
pub fn combo_totals<'a>(
    combos: impl IntoIterator<Item = &'a ProductCombo>,
) -> Option<BTreeMap<String, u32>> {
    let mut totals = BTreeMap::new();
    for combo in combos {
        for (product_id, n) in &combo.items {
            let total = totals.entry(product_id.clone()).or_insert(0u32);
            *total = total.checked_add(*n)?;
        }
    }
    Some(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kiosk_prices() -> Vec<PricedProduct> {
        [("rocky", 55), ("kunafa", 35), ("normal", 30), ("cookies", 15)]
            .into_iter()
            .map(|(id, price)| PricedProduct {
                product_id: id.to_string(),
                price,
            })
            .collect()
    }

    #[test]
    fn test_single_match() {
        let combos = find_combinations(55, &kiosk_prices());
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].items, vec![("rocky".to_string(), 1)]);
    }

    #[test]
    fn test_multiple_matches_in_enumeration_order() {
        let combos = find_combinations(30, &kiosk_prices());
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].items, vec![("cookies".to_string(), 2)]);
        assert_eq!(combos[1].items, vec![("normal".to_string(), 1)]);
    }

    #[test]
    fn test_no_match() {
        assert!(find_combinations(7, &kiosk_prices()).is_empty());
        assert!(find_combinations(0, &kiosk_prices()).is_empty());
        assert!(find_combinations(30, &[]).is_empty());
    }

    #[test]
    fn test_every_combo_sums_to_amount() {
        let prices = kiosk_prices();
        for combo in find_combinations(165, &prices) {
            let total: u32 = combo
                .items
                .iter()
                .map(|(id, n)| prices.iter().find(|p| &p.product_id == id).unwrap().price * n)
                .sum();
            assert_eq!(total, 165);
        }
    }

    #[test]
    fn test_priced_products_skips_unusable_prices() {
        let mut state = LedgerState::default();
        if let Some(cookies) = state.products.get_mut("cookies") {
            cookies.price = dec!(15.5);
        }
        let ids: Vec<String> = ["rocky", "cookies", "missing", "normal"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let prices = priced_products(&state, &ids);
        let kept: Vec<_> = prices.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(kept, vec!["rocky", "normal"]);
        assert_eq!(prices[0].price, 55);
    }

    #[test]
    fn test_combo_totals() {
        let combos = vec![
            ProductCombo {
                items: vec![("normal".to_string(), 1), ("cookies".to_string(), 1)],
            },
            ProductCombo {
                items: vec![("cookies".to_string(), 2)],
            },
        ];
        let totals = combo_totals(&combos).unwrap();
        assert_eq!(totals.get("normal"), Some(&1));
        assert_eq!(totals.get("cookies"), Some(&3));
    }

    #[test]
    fn test_combo_totals_overflow() {
        let combos = vec![
            ProductCombo {
                items: vec![("rocky".to_string(), u32::MAX)],
            },
            ProductCombo {
                items: vec![("rocky".to_string(), 1)],
            },
        ];
        assert_eq!(combo_totals(&combos), None);
    }
}
