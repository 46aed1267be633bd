//! WebAssembly module for the Kiosk Ledger
//!
//! Runs the calculators in the browser over a JSON snapshot of the ledger
//! state, so the kiosk screen keeps working while the server is unreachable.
//! Every export takes and returns JSON strings; amounts are decimal strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    dashboard_stats, find_combinations, format_currency, parse_amount, parse_date,
    parse_quantity, priced_products, product_cost_per_unit, project_inventory, sales_ledger,
    state_usage, CalcPolicy, LedgerState, StrawberryBatch, StrawberryBatchInput,
    DEFAULT_MAX_CLASSIFIER_AMOUNT,
};

fn to_js_error(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn parse_state(state_json: &str) -> Result<LedgerState, String> {
    serde_json::from_str(state_json).map_err(|e| format!("Invalid state JSON: {}", e))
}

/// Policy JSON is optional; missing fields take the defaults
fn parse_policy(policy_json: Option<&str>) -> Result<CalcPolicy, String> {
    match policy_json {
        Some(json) if !json.trim().is_empty() => {
            serde_json::from_str(json).map_err(|e| format!("Invalid policy JSON: {}", e))
        }
        _ => Ok(CalcPolicy::default()),
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, String> {
    parse_amount(raw).map_err(|e| format!("{}: {}", field, e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to encode result: {}", e))
}

fn dashboard_json(state_json: &str, policy_json: Option<&str>) -> Result<String, String> {
    let state = parse_state(state_json)?;
    let policy = parse_policy(policy_json)?;
    to_json(&dashboard_stats(&state, &policy))
}

fn inventory_json(state_json: &str, policy_json: Option<&str>) -> Result<String, String> {
    let state = parse_state(state_json)?;
    let policy = parse_policy(policy_json)?;
    let usage = state_usage(&state, &policy);
    to_json(&project_inventory(&state, &usage))
}

fn ledger_json(state_json: &str, policy_json: Option<&str>) -> Result<String, String> {
    let state = parse_state(state_json)?;
    let policy = parse_policy(policy_json)?;
    to_json(&sales_ledger(&state, &policy))
}

fn product_cost_string(
    state_json: &str,
    product_id: &str,
    date: Option<&str>,
) -> Result<String, String> {
    let state = parse_state(state_json)?;
    let product = state
        .product(product_id)
        .ok_or_else(|| format!("Unknown product '{}'", product_id))?;
    let as_of = date.map(parse_date).transpose().map_err(str::to_string)?;
    Ok(product_cost_per_unit(&state, product, as_of).to_string())
}

fn combinations_json(
    state_json: &str,
    amount: u32,
    product_ids_json: &str,
) -> Result<String, String> {
    if amount > DEFAULT_MAX_CLASSIFIER_AMOUNT {
        return Err(format!(
            "Amount must be at most {}",
            DEFAULT_MAX_CLASSIFIER_AMOUNT
        ));
    }
    let state = parse_state(state_json)?;
    let product_ids: Vec<String> = serde_json::from_str(product_ids_json)
        .map_err(|e| format!("Invalid product list JSON: {}", e))?;
    let prices = priced_products(&state, &product_ids);
    to_json(&find_combinations(amount, &prices))
}

#[derive(Serialize)]
struct StrawberryCosts {
    cost_per_gram: Decimal,
    cost_per_piece: Decimal,
}

fn strawberry_costs_json(
    bulk_weight_kg: &str,
    bulk_cost: &str,
    avg_weight_per_piece: &str,
) -> Result<String, String> {
    let input = StrawberryBatchInput {
        name: String::new(),
        date: NaiveDate::MIN,
        bulk_weight_kg: parse_decimal("Bulk weight", bulk_weight_kg)?,
        bulk_cost: parse_decimal("Bulk cost", bulk_cost)?,
        avg_weight_per_piece: parse_decimal("Piece weight", avg_weight_per_piece)?,
    };
    let batch = StrawberryBatch::new(String::new(), input);
    to_json(&StrawberryCosts {
        cost_per_gram: batch.cost_per_gram(),
        cost_per_piece: batch.cost_per_piece(),
    })
}

/// Dashboard figures for a state snapshot
#[wasm_bindgen]
pub fn dashboard(state_json: &str, policy_json: Option<String>) -> Result<String, JsValue> {
    dashboard_json(state_json, policy_json.as_deref()).map_err(to_js_error)
}

/// Stock position per ingredient
#[wasm_bindgen]
pub fn inventory(state_json: &str, policy_json: Option<String>) -> Result<String, JsValue> {
    inventory_json(state_json, policy_json.as_deref()).map_err(to_js_error)
}

/// Sales ledger rows with running totals
#[wasm_bindgen]
pub fn ledger(state_json: &str, policy_json: Option<String>) -> Result<String, JsValue> {
    ledger_json(state_json, policy_json.as_deref()).map_err(to_js_error)
}

/// Cost per unit of a product, at current prices or as of `YYYY-MM-DD`
#[wasm_bindgen]
pub fn product_cost(
    state_json: &str,
    product_id: &str,
    date: Option<String>,
) -> Result<String, JsValue> {
    product_cost_string(state_json, product_id, date.as_deref()).map_err(to_js_error)
}

/// Product splits of a card total
#[wasm_bindgen]
pub fn combinations(
    state_json: &str,
    amount: u32,
    product_ids_json: &str,
) -> Result<String, JsValue> {
    combinations_json(state_json, amount, product_ids_json).map_err(to_js_error)
}

/// Derived costs shown while a strawberry batch form is being filled in
#[wasm_bindgen]
pub fn strawberry_costs(
    bulk_weight_kg: &str,
    bulk_cost: &str,
    avg_weight_per_piece: &str,
) -> Result<String, JsValue> {
    strawberry_costs_json(bulk_weight_kg, bulk_cost, avg_weight_per_piece).map_err(to_js_error)
}

/// Check a typed sale quantity before the form is submitted
#[wasm_bindgen]
pub fn check_quantity(raw: &str) -> Result<u32, JsValue> {
    parse_quantity(raw).map_err(|e| to_js_error(e.to_string()))
}

/// Format an amount the way the dashboard shows it
#[wasm_bindgen]
pub fn format_amount(amount: &str, currency: &str) -> String {
    match parse_decimal("Amount", amount) {
        Ok(value) => format_currency(value, currency),
        Err(_) => format!("- {}", currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn seeded_state_json() -> String {
        serde_json::to_string(&LedgerState::default()).unwrap()
    }

    #[test]
    fn test_dashboard_on_seeded_state() {
        let json = dashboard_json(&seeded_state_json(), None).unwrap();
        let stats: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(stats["fixed_total"], "10350");
        assert_eq!(stats["is_break_even"], false);
    }

    #[test]
    fn test_empty_state_object() {
        let json = inventory_json("{}", Some("")).unwrap();
        let records: Value = serde_json::from_str(&json).unwrap();
        assert!(records.as_array().is_some());
    }

    #[test]
    fn test_invalid_state_is_an_error() {
        assert!(dashboard_json("not json", None).is_err());
        assert!(ledger_json("42", None).is_err());
    }

    #[test]
    fn test_policy_override() {
        let policy = r#"{ "specialty_deduction_per_unit": "0" }"#;
        let parsed = parse_policy(Some(policy)).unwrap();
        assert_eq!(parsed.specialty_deduction_per_unit, Decimal::ZERO);
        assert_eq!(parsed.tips_product_id, "tips");
    }

    #[test]
    fn test_product_cost_for_manual_product() {
        let cost = product_cost_string(&seeded_state_json(), "cookies", None).unwrap();
        assert_eq!(cost, "7.67");
        assert!(product_cost_string(&seeded_state_json(), "waffles", None).is_err());
        assert!(product_cost_string(&seeded_state_json(), "rocky", Some("14/03/2025")).is_err());
    }

    #[test]
    fn test_combinations_for_thirty() {
        let ids = r#"["rocky", "kunafa", "normal", "cookies"]"#;
        let json = combinations_json(&seeded_state_json(), 30, ids).unwrap();
        let combos: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(combos.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_combinations_above_ceiling_are_rejected() {
        let ids = r#"["rocky", "kunafa", "normal", "cookies"]"#;
        let err = combinations_json(&seeded_state_json(), u32::MAX, ids).unwrap_err();
        assert!(err.contains("at most"));
    }

    #[test]
    fn test_strawberry_costs() {
        let json = strawberry_costs_json("20", "1600", "20").unwrap();
        let costs: Value = serde_json::from_str(&json).unwrap();
        let amount = |key: &str| costs[key].as_str().unwrap().parse::<Decimal>().unwrap();
        assert_eq!(amount("cost_per_gram"), dec!(0.08));
        assert_eq!(amount("cost_per_piece"), dec!(1.6));
        assert!(strawberry_costs_json("twenty", "1600", "20").is_err());
    }

    #[test]
    fn test_check_quantity_accepts_whole_numbers() {
        assert_eq!(check_quantity("3").ok(), Some(3));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("1234.5", "AED"), "1,234.50 AED");
        assert_eq!(format_amount("abc", "AED"), "- AED");
    }
}
