//! Ledger service tests
//!
//! Tests for the state owner including:
//! - Mutations mirrored to the local JSON store and restored on reload
//! - Boundary validation and unknown ids
//! - Optimistic retention when the store is unreachable
//! - Waste valuation, adjustments and the classifier commit

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use kiosk_ledger_backend::error::AppError;
use kiosk_ledger_backend::store::{Collection, LocalStore, RecordStore};
use kiosk_ledger_backend::LedgerService;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use shared::{
    CalcPolicy, FeeSettingsPatch, FixedCostInput, ProductCombo, ProductInput, Recipe, SaleInput,
    SaleOrigin, StrawberryBatchInput, WasteInput, DEFAULT_MAX_CLASSIFIER_AMOUNT, MAX_SALE_QTY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("kiosk-ledger-{}.json", uuid::Uuid::new_v4()))
}

fn local_store(path: &PathBuf) -> Arc<dyn RecordStore> {
    Arc::new(LocalStore::new(path))
}

async fn local_service(path: &PathBuf) -> LedgerService {
    LedgerService::load(local_store(path), CalcPolicy::default()).await
}

fn sale_input(product_id: &str, qty: u32) -> SaleInput {
    SaleInput {
        date: date(2025, 3, 14),
        product_id: product_id.to_string(),
        qty,
        unit_price: None,
        origin: SaleOrigin::Manual,
        transaction_id: None,
    }
}

/// A store whose backend is never reachable
struct OfflineStore;

#[async_trait]
impl RecordStore for OfflineStore {
    fn backend_tag(&self) -> &'static str {
        "offline"
    }

    async fn load_collection(&self, _collection: Collection) -> Option<Vec<Value>> {
        None
    }

    async fn upsert_record(&self, _collection: Collection, _id: &str, _body: Value) -> bool {
        false
    }

    async fn delete_record(&self, _collection: Collection, _id: &str) -> bool {
        false
    }

    async fn load_settings(&self) -> Option<BTreeMap<String, Value>> {
        None
    }

    async fn put_setting(&self, _key: &str, _value: Value) -> bool {
        false
    }
}

// ============================================================================
// Persistence round trips
// ============================================================================

#[tokio::test]
async fn test_empty_store_loads_seeded_defaults() {
    let path = temp_path();
    let service = local_service(&path).await;
    let state = service.snapshot().await;

    assert_eq!(state.products.len(), 5);
    assert_eq!(state.ingredients.len(), 5);
    assert_eq!(state.fixed_total(), dec!(10350));
    assert!(state.sales.is_empty());
}

#[tokio::test]
async fn test_sale_defaults_to_product_price_and_survives_reload() {
    let path = temp_path();
    let service = local_service(&path).await;

    let sale = service.add_sale(sale_input("normal", 2)).await.unwrap();
    assert_eq!(sale.unit_price, dec!(30));
    assert!(sale.id.starts_with("s-"));

    let reloaded = local_service(&path).await;
    let sales = reloaded.sales().await;
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, sale.id);
    assert_eq!(reloaded.dashboard().await.gross_revenue, dec!(60));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_stored_product_overrides_seeded_catalog() {
    let path = temp_path();
    let service = local_service(&path).await;

    let patch = shared::ProductPatch {
        price: Some(dec!(32)),
        ..Default::default()
    };
    service.update_product("normal", patch).await.unwrap();

    let reloaded = local_service(&path).await;
    let products = reloaded.snapshot().await.products;
    assert_eq!(products["normal"].price, dec!(32));
    assert!(products.contains_key("cookies"));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_fee_settings_and_adjustments_persist() {
    let path = temp_path();
    let service = local_service(&path).await;

    service
        .update_fee_settings(FeeSettingsPatch {
            pos_fee_percent: Some(dec!(2.5)),
            ..Default::default()
        })
        .await
        .unwrap();
    service
        .set_manual_adjustment("cup", Some(dec!(40)))
        .await
        .unwrap();

    let reloaded = local_service(&path).await;
    let state = reloaded.snapshot().await;
    assert_eq!(state.settings.pos_fee_percent, dec!(2.5));
    assert_eq!(state.manual_inventory_adjustments.get("cup"), Some(&dec!(40)));

    let cup = reloaded
        .inventory()
        .await
        .into_iter()
        .find(|r| r.ingredient_id == "cup")
        .unwrap();
    assert!(cup.manually_adjusted);
    assert_eq!(cup.remaining, dec!(40));

    reloaded.set_manual_adjustment("cup", None).await.unwrap();
    let cleared = local_service(&path).await.snapshot().await;
    assert!(cleared.manual_inventory_adjustments.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_reset_is_in_memory_only() {
    let path = temp_path();
    let service = local_service(&path).await;
    service.add_sale(sale_input("cookies", 1)).await.unwrap();

    service.reset().await;
    assert!(service.sales().await.is_empty());

    let reloaded = local_service(&path).await;
    assert_eq!(reloaded.sales().await.len(), 1);

    let _ = std::fs::remove_file(&path);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_sale_for_unknown_product_is_rejected() {
    let service = local_service(&temp_path()).await;
    let err = service.add_sale(sale_input("waffles", 1)).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { field: Some(ref f), .. } if f == "product_id"));
    assert!(service.sales().await.is_empty());
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let service = local_service(&temp_path()).await;
    let err = service.add_sale(sale_input("normal", 0)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_negative_fee_percent_is_rejected() {
    let service = local_service(&temp_path()).await;
    let err = service
        .update_fee_settings(FeeSettingsPatch {
            pos_fee_percent: Some(dec!(-1)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(service.fee_settings().await.pos_fee_percent, Decimal::ZERO);
}

#[tokio::test]
async fn test_oversized_unit_price_is_rejected() {
    let service = local_service(&temp_path()).await;
    let mut input = sale_input("cookies", 2);
    input.unit_price = Some(Decimal::MAX);

    let err = service.add_sale(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { field: Some(ref f), .. } if f == "unit_price"));
    assert!(service.sales().await.is_empty());
    assert_eq!(service.dashboard().await.gross_revenue, Decimal::ZERO);
}

#[tokio::test]
async fn test_sale_quantity_above_limit_is_rejected() {
    let service = local_service(&temp_path()).await;
    let err = service
        .add_sale(sale_input("cookies", MAX_SALE_QTY + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected() {
    let service = local_service(&temp_path()).await;

    let err = service
        .add_fixed_cost(FixedCostInput {
            name: "Rent".to_string(),
            amount: Decimal::MAX,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = service
        .update_product(
            "normal",
            shared::ProductPatch {
                price: Some(Decimal::MAX),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = service
        .set_manual_adjustment("cup", Some(Decimal::MAX))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: Some(ref f), .. } if f == "remaining"));

    let stats = service.dashboard().await;
    assert_eq!(stats.fixed_total, dec!(10350));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let service = local_service(&temp_path()).await;
    assert!(matches!(
        service.delete_sale("s-missing").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.delete_fixed_cost("fc-missing").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.product_cost("missing", None).await,
        Err(AppError::NotFound(_))
    ));
}

// ============================================================================
// Offline store
// ============================================================================

#[tokio::test]
async fn test_offline_store_keeps_changes_in_memory() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    assert_eq!(service.backend_tag(), "offline");
    assert_eq!(service.snapshot().await.products.len(), 5);

    let product = service
        .add_product(ProductInput {
            name: "Mango Cup".to_string(),
            price: dec!(25),
            use_manual_cost: true,
            manual_cost_per_unit: Some(dec!(9)),
            recipe: Recipe::default(),
        })
        .await
        .unwrap();
    service.add_sale(sale_input(&product.id, 3)).await.unwrap();
    service
        .add_fixed_cost(FixedCostInput {
            name: "Permit".to_string(),
            amount: dec!(200),
        })
        .await
        .unwrap();

    let stats = service.dashboard().await;
    assert_eq!(stats.gross_revenue, dec!(75));
    assert_eq!(stats.fixed_total, dec!(10550));
    assert_eq!(service.product_cost(&product.id, None).await.unwrap(), dec!(9));
}

#[tokio::test]
async fn test_deleting_product_keeps_orphan_sales() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    service.add_sale(sale_input("kunafa", 1)).await.unwrap();
    service.delete_product("kunafa").await.unwrap();

    assert_eq!(service.sales().await.len(), 1);
    assert_eq!(service.dashboard().await.gross_revenue, Decimal::ZERO);

    let ledger = service.sales_ledger().await;
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].cost_per_unit, Decimal::ZERO);
}

// ============================================================================
// Waste and classifier
// ============================================================================

#[tokio::test]
async fn test_strawberry_waste_uses_active_batch() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    service
        .add_strawberry_batch(StrawberryBatchInput {
            name: "Week 1".to_string(),
            date: date(2025, 3, 1),
            bulk_weight_kg: dec!(20),
            bulk_cost: dec!(1600),
            avg_weight_per_piece: dec!(20),
        })
        .await
        .unwrap();

    let entry = service
        .add_waste(WasteInput {
            date: date(2025, 3, 2),
            ingredient_id: "strawberry".to_string(),
            qty: dec!(100),
            reason: "Bruised".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(entry.estimated_cost, dec!(8));

    let chocolate = service
        .add_waste(WasteInput {
            date: date(2025, 3, 2),
            ingredient_id: "chocolate".to_string(),
            qty: dec!(200),
            reason: String::new(),
        })
        .await
        .unwrap();
    assert_eq!(chocolate.estimated_cost, dec!(15.7));
    assert_eq!(service.dashboard().await.total_waste_cost, dec!(23.7));
}

#[tokio::test]
async fn test_classifier_commit_records_manual_sales() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    let product_ids: Vec<String> = ["rocky", "kunafa", "normal", "cookies"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let combos = service
        .classify(30, &product_ids, DEFAULT_MAX_CLASSIFIER_AMOUNT)
        .await
        .unwrap();
    assert_eq!(combos.len(), 2);

    let sales = service
        .commit_combinations(date(2025, 3, 14), &combos)
        .await
        .unwrap();
    assert_eq!(sales.len(), 2);
    assert!(sales.iter().all(|s| s.origin == SaleOrigin::Manual));

    let cookies = sales.iter().find(|s| s.product_id == "cookies").unwrap();
    assert_eq!(cookies.qty, 2);
    assert_eq!(cookies.unit_price, dec!(15));
}

#[tokio::test]
async fn test_commit_with_unknown_product_records_nothing() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    let combos = vec![ProductCombo {
        items: vec![("normal".to_string(), 1), ("waffles".to_string(), 1)],
    }];

    let err = service
        .commit_combinations(date(2025, 3, 14), &combos)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(service.sales().await.is_empty());
}

#[tokio::test]
async fn test_commit_with_overflowing_counts_records_nothing() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    let combos = vec![
        ProductCombo {
            items: vec![("rocky".to_string(), u32::MAX)],
        },
        ProductCombo {
            items: vec![("rocky".to_string(), 1)],
        },
    ];

    let err = service
        .commit_combinations(date(2025, 3, 14), &combos)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: Some(ref f), .. } if f == "combos"));
    assert!(service.sales().await.is_empty());
}

#[tokio::test]
async fn test_commit_above_sale_limit_records_nothing() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    let combos = vec![ProductCombo {
        items: vec![("normal".to_string(), 1), ("rocky".to_string(), MAX_SALE_QTY + 1)],
    }];

    let err = service
        .commit_combinations(date(2025, 3, 14), &combos)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(service.sales().await.is_empty());
    assert_eq!(service.dashboard().await.gross_revenue, Decimal::ZERO);
}

#[tokio::test]
async fn test_classify_above_ceiling_is_rejected() {
    let service = LedgerService::load(Arc::new(OfflineStore), CalcPolicy::default()).await;
    let product_ids = vec!["rocky".to_string(), "cookies".to_string()];

    let err = service
        .classify(u32::MAX, &product_ids, DEFAULT_MAX_CLASSIFIER_AMOUNT)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { field: Some(ref f), .. } if f == "amount"));

    let at_ceiling = service
        .classify(DEFAULT_MAX_CLASSIFIER_AMOUNT, &product_ids, DEFAULT_MAX_CLASSIFIER_AMOUNT)
        .await;
    assert!(at_ceiling.is_ok());
}
