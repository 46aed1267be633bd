//! Ledger service: owns the in-memory state and mirrors changes to storage
//!
//! Every mutation validates its input, applies it to the in-memory
//! [`LedgerState`], then writes it through the [`RecordStore`]. A failed write
//! is logged and otherwise ignored: the in-memory change stands. Reads take a
//! snapshot and hand it to the pure calculators in `shared`.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    active_strawberry_batch, check_amount, combo_totals, dashboard_stats, find_combinations,
    ingredient_cost_per_unit, ingredient_ids, new_record_id, priced_products,
    product_cost_per_unit, project_inventory, sales_ledger, setting_keys, state_usage,
    strawberry_batch_for_date, transaction_fees, validate_fee_settings,
    validate_fixed_cost_patch, validate_ingredient_patch, validate_product_input,
    validate_product_patch, validate_strawberry_batch_patch, waste_unit_cost, CalcPolicy,
    DashboardStats, FeeSettings, FeeSettingsPatch, FixedCost, FixedCostInput, FixedCostPatch,
    Ingredient, IngredientBatch, IngredientBatchInput, IngredientInput, IngredientInventory,
    IngredientPatch, IngredientUsage, LedgerRow, LedgerState, Product, ProductCombo,
    ProductInput, ProductPatch, Sale, SaleInput, SaleOrigin, StrawberryBatch,
    StrawberryBatchInput, StrawberryBatchPatch, TransactionFees, WasteEntry, WasteInput,
};
use tokio::sync::RwLock;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::RecordStore;

/// Ledger service for state mutation and reporting
#[derive(Clone)]
pub struct LedgerService {
    state: Arc<RwLock<LedgerState>>,
    store: Arc<dyn RecordStore>,
    policy: Arc<CalcPolicy>,
}

fn check(result: Result<(), &'static str>) -> AppResult<()> {
    result.map_err(AppError::invalid)
}

impl LedgerService {
    pub fn new(store: Arc<dyn RecordStore>, policy: CalcPolicy, state: LedgerState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            store,
            policy: Arc::new(policy),
        }
    }

    /// Build the service from whatever the store holds
    pub async fn load(store: Arc<dyn RecordStore>, policy: CalcPolicy) -> Self {
        let state = load_state(&store).await;
        Self::new(store, policy, state)
    }

    pub fn backend_tag(&self) -> &'static str {
        self.store.backend_tag()
    }

    pub fn policy(&self) -> &CalcPolicy {
        &self.policy
    }

    pub async fn snapshot(&self) -> LedgerState {
        self.state.read().await.clone()
    }

    fn synced(&self, ok: bool, action: &str) {
        if !ok {
            tracing::warn!(
                backend = self.store.backend_tag(),
                "{}: changes may not have synced",
                action
            );
        }
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub async fn fee_settings(&self) -> FeeSettings {
        self.state.read().await.settings.clone()
    }

    pub async fn update_fee_settings(&self, patch: FeeSettingsPatch) -> AppResult<FeeSettings> {
        check(validate_fee_settings(&patch))?;

        let settings = {
            let mut state = self.state.write().await;
            state.settings.apply(patch.clone());
            state.settings.clone()
        };
        tracing::debug!(?settings, "POS fee settings updated");

        let mut ok = true;
        if let Some(percent) = patch.pos_fee_percent {
            ok &= self
                .store
                .add_setting_value(setting_keys::POS_FEE_PERCENT, &percent)
                .await;
        }
        if let Some(manual) = patch.pos_fee_manual {
            ok &= self
                .store
                .add_setting_value(setting_keys::POS_FEE_MANUAL, &manual)
                .await;
        }
        if let Some(use_manual) = patch.use_manual_pos_fee {
            ok &= self
                .store
                .add_setting_value(setting_keys::USE_MANUAL_POS_FEE, &use_manual)
                .await;
        }
        self.synced(ok, "update POS fee settings");

        Ok(settings)
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.values().cloned().collect()
    }

    pub async fn add_product(&self, input: ProductInput) -> AppResult<Product> {
        input.validate()?;
        check(validate_product_input(&input))?;

        let product = Product::from_input(new_record_id("p"), input);
        self.state
            .write()
            .await
            .products
            .insert(product.id.clone(), product.clone());
        tracing::debug!(product_id = %product.id, "Product added");

        let ok = self.store.upsert(&product).await;
        self.synced(ok, "add product");
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> AppResult<Product> {
        check(validate_product_patch(&patch))?;

        let product = {
            let mut state = self.state.write().await;
            let product = state
                .products
                .get_mut(id)
                .ok_or_else(|| AppError::not_found("Product", id))?;
            product.apply(patch);
            product.clone()
        };
        tracing::debug!(product_id = %id, "Product updated");

        let ok = self.store.upsert(&product).await;
        self.synced(ok, "update product");
        Ok(product)
    }

    /// Historical sales of the product are kept and drop out of aggregations
    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.state
            .write()
            .await
            .products
            .remove(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;
        tracing::debug!(product_id = %id, "Product deleted");

        let ok = self.store.delete_by_id::<Product>(id).await;
        self.synced(ok, "delete product");
        Ok(())
    }

    pub async fn product_cost(&self, id: &str, as_of: Option<NaiveDate>) -> AppResult<Decimal> {
        let state = self.state.read().await;
        let product = state
            .product(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;
        Ok(product_cost_per_unit(&state, product, as_of))
    }

    // ========================================================================
    // Sales
    // ========================================================================

    pub async fn sales(&self) -> Vec<Sale> {
        self.state.read().await.sales.clone()
    }

    /// Record a sale, priced at the product's current price unless given
    pub async fn add_sale(&self, input: SaleInput) -> AppResult<Sale> {
        input.validate()?;

        let sale = {
            let mut state = self.state.write().await;
            let sale = new_sale(&state, input)?;
            state.sales.push(sale.clone());
            sale
        };
        tracing::debug!(sale_id = %sale.id, product_id = %sale.product_id, qty = sale.qty, "Sale added");

        let ok = self.store.upsert(&sale).await;
        self.synced(ok, "add sale");
        Ok(sale)
    }

    pub async fn delete_sale(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.sales.len();
            state.sales.retain(|s| s.id != id);
            if state.sales.len() == before {
                return Err(AppError::not_found("Sale", id));
            }
        }
        tracing::debug!(sale_id = %id, "Sale deleted");

        let ok = self.store.delete_by_id::<Sale>(id).await;
        self.synced(ok, "delete sale");
        Ok(())
    }

    // ========================================================================
    // Fixed costs
    // ========================================================================

    pub async fn fixed_costs(&self) -> Vec<FixedCost> {
        self.state.read().await.fixed_costs.clone()
    }

    pub async fn add_fixed_cost(&self, input: FixedCostInput) -> AppResult<FixedCost> {
        input.validate()?;

        let cost = FixedCost::new(new_record_id("fc"), input.name, input.amount);
        self.state.write().await.fixed_costs.push(cost.clone());
        tracing::debug!(fixed_cost_id = %cost.id, "Fixed cost added");

        let ok = self.store.upsert(&cost).await;
        self.synced(ok, "add fixed cost");
        Ok(cost)
    }

    pub async fn update_fixed_cost(&self, id: &str, patch: FixedCostPatch) -> AppResult<FixedCost> {
        check(validate_fixed_cost_patch(&patch))?;

        let cost = {
            let mut state = self.state.write().await;
            let cost = state
                .fixed_costs
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AppError::not_found("Fixed cost", id))?;
            cost.apply(patch);
            cost.clone()
        };
        tracing::debug!(fixed_cost_id = %id, "Fixed cost updated");

        let ok = self.store.upsert(&cost).await;
        self.synced(ok, "update fixed cost");
        Ok(cost)
    }

    pub async fn delete_fixed_cost(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.fixed_costs.len();
            state.fixed_costs.retain(|c| c.id != id);
            if state.fixed_costs.len() == before {
                return Err(AppError::not_found("Fixed cost", id));
            }
        }
        tracing::debug!(fixed_cost_id = %id, "Fixed cost deleted");

        let ok = self.store.delete_by_id::<FixedCost>(id).await;
        self.synced(ok, "delete fixed cost");
        Ok(())
    }

    // ========================================================================
    // Ingredients and batches
    // ========================================================================

    pub async fn ingredients(&self) -> Vec<Ingredient> {
        self.state.read().await.ingredients.values().cloned().collect()
    }

    pub async fn add_ingredient(&self, input: IngredientInput) -> AppResult<Ingredient> {
        input.validate()?;

        let ingredient = Ingredient::from_input(new_record_id("ing"), input);
        self.state
            .write()
            .await
            .ingredients
            .insert(ingredient.id.clone(), ingredient.clone());
        tracing::debug!(ingredient_id = %ingredient.id, "Ingredient added");

        let ok = self.store.upsert(&ingredient).await;
        self.synced(ok, "add ingredient");
        Ok(ingredient)
    }

    pub async fn update_ingredient(&self, id: &str, patch: IngredientPatch) -> AppResult<Ingredient> {
        check(validate_ingredient_patch(&patch))?;

        let ingredient = {
            let mut state = self.state.write().await;
            let ingredient = state
                .ingredients
                .get_mut(id)
                .ok_or_else(|| AppError::not_found("Ingredient", id))?;
            ingredient.apply(patch);
            ingredient.clone()
        };
        tracing::debug!(ingredient_id = %id, "Ingredient updated");

        let ok = self.store.upsert(&ingredient).await;
        self.synced(ok, "update ingredient");
        Ok(ingredient)
    }

    pub async fn delete_ingredient(&self, id: &str) -> AppResult<()> {
        self.state
            .write()
            .await
            .ingredients
            .remove(id)
            .ok_or_else(|| AppError::not_found("Ingredient", id))?;
        tracing::debug!(ingredient_id = %id, "Ingredient deleted");

        let ok = self.store.delete_by_id::<Ingredient>(id).await;
        self.synced(ok, "delete ingredient");
        Ok(())
    }

    /// Unit cost as of a date, or at current prices without one
    pub async fn ingredient_cost(&self, id: &str, as_of: Option<NaiveDate>) -> AppResult<Decimal> {
        let state = self.state.read().await;
        let known = state.ingredients.contains_key(id)
            || state.ingredient_batches.iter().any(|b| b.ingredient_id == id);
        if !known {
            return Err(AppError::not_found("Ingredient", id));
        }
        Ok(ingredient_cost_per_unit(&state, id, as_of))
    }

    pub async fn ingredient_batches(&self) -> Vec<IngredientBatch> {
        self.state.read().await.ingredient_batches.clone()
    }

    pub async fn add_ingredient_batch(&self, input: IngredientBatchInput) -> AppResult<IngredientBatch> {
        input.validate()?;

        let batch = {
            let mut state = self.state.write().await;
            if !state.ingredients.contains_key(&input.ingredient_id) {
                return Err(AppError::invalid_field(
                    "ingredient_id",
                    format!("Unknown ingredient '{}'", input.ingredient_id),
                ));
            }
            let batch = IngredientBatch::from_input(new_record_id("ib"), input);
            state.ingredient_batches.push(batch.clone());
            batch
        };
        tracing::debug!(batch_id = %batch.id, ingredient_id = %batch.ingredient_id, "Ingredient batch added");

        let ok = self.store.upsert(&batch).await;
        self.synced(ok, "add ingredient batch");
        Ok(batch)
    }

    pub async fn delete_ingredient_batch(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.ingredient_batches.len();
            state.ingredient_batches.retain(|b| b.id != id);
            if state.ingredient_batches.len() == before {
                return Err(AppError::not_found("Ingredient batch", id));
            }
        }
        tracing::debug!(batch_id = %id, "Ingredient batch deleted");

        let ok = self.store.delete_by_id::<IngredientBatch>(id).await;
        self.synced(ok, "delete ingredient batch");
        Ok(())
    }

    // ========================================================================
    // Strawberry batches
    // ========================================================================

    pub async fn strawberry_batches(&self) -> Vec<StrawberryBatch> {
        self.state.read().await.strawberry_batches.clone()
    }

    pub async fn add_strawberry_batch(&self, input: StrawberryBatchInput) -> AppResult<StrawberryBatch> {
        input.validate()?;

        let batch = StrawberryBatch::new(new_record_id("sb"), input);
        self.state.write().await.strawberry_batches.push(batch.clone());
        tracing::debug!(
            batch_id = %batch.id(),
            cost_per_piece = %batch.cost_per_piece(),
            "Strawberry batch added"
        );

        let ok = self.store.upsert(&batch).await;
        self.synced(ok, "add strawberry batch");
        Ok(batch)
    }

    pub async fn update_strawberry_batch(
        &self,
        id: &str,
        patch: StrawberryBatchPatch,
    ) -> AppResult<StrawberryBatch> {
        check(validate_strawberry_batch_patch(&patch))?;

        let batch = {
            let mut state = self.state.write().await;
            let batch = state
                .strawberry_batches
                .iter_mut()
                .find(|b| b.id() == id)
                .ok_or_else(|| AppError::not_found("Strawberry batch", id))?;
            batch.update(patch);
            batch.clone()
        };
        tracing::debug!(batch_id = %id, "Strawberry batch updated");

        let ok = self.store.upsert(&batch).await;
        self.synced(ok, "update strawberry batch");
        Ok(batch)
    }

    pub async fn delete_strawberry_batch(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.strawberry_batches.len();
            state.strawberry_batches.retain(|b| b.id() != id);
            if state.strawberry_batches.len() == before {
                return Err(AppError::not_found("Strawberry batch", id));
            }
        }
        tracing::debug!(batch_id = %id, "Strawberry batch deleted");

        let ok = self.store.delete_by_id::<StrawberryBatch>(id).await;
        self.synced(ok, "delete strawberry batch");
        Ok(())
    }

    pub async fn active_strawberry_batch(&self) -> Option<StrawberryBatch> {
        let state = self.state.read().await;
        active_strawberry_batch(&state.strawberry_batches).cloned()
    }

    pub async fn strawberry_batch_for_date(&self, date: Option<NaiveDate>) -> Option<StrawberryBatch> {
        let state = self.state.read().await;
        strawberry_batch_for_date(&state.strawberry_batches, date).cloned()
    }

    // ========================================================================
    // Waste and inventory adjustments
    // ========================================================================

    pub async fn waste_entries(&self) -> Vec<WasteEntry> {
        self.state.read().await.waste_entries.clone()
    }

    /// Record waste, valued at the unit cost in effect right now
    pub async fn add_waste(&self, input: WasteInput) -> AppResult<WasteEntry> {
        input.validate()?;

        let entry = {
            let mut state = self.state.write().await;
            if input.ingredient_id != ingredient_ids::STRAWBERRY
                && !state.ingredients.contains_key(&input.ingredient_id)
            {
                return Err(AppError::invalid_field(
                    "ingredient_id",
                    format!("Unknown ingredient '{}'", input.ingredient_id),
                ));
            }
            let unit_cost = waste_unit_cost(&state, &input.ingredient_id);
            let entry = WasteEntry::from_input(new_record_id("w"), input, unit_cost);
            state.waste_entries.push(entry.clone());
            entry
        };
        tracing::debug!(
            waste_id = %entry.id,
            ingredient_id = %entry.ingredient_id,
            estimated_cost = %entry.estimated_cost,
            "Waste recorded"
        );

        let ok = self.store.upsert(&entry).await;
        self.synced(ok, "add waste entry");
        Ok(entry)
    }

    pub async fn delete_waste(&self, id: &str) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            let before = state.waste_entries.len();
            state.waste_entries.retain(|w| w.id != id);
            if state.waste_entries.len() == before {
                return Err(AppError::not_found("Waste entry", id));
            }
        }
        tracing::debug!(waste_id = %id, "Waste entry deleted");

        let ok = self.store.delete_by_id::<WasteEntry>(id).await;
        self.synced(ok, "delete waste entry");
        Ok(())
    }

    /// Set (`Some`) or clear (`None`) the counted remaining stock of an ingredient
    pub async fn set_manual_adjustment(
        &self,
        ingredient_id: &str,
        remaining: Option<Decimal>,
    ) -> AppResult<BTreeMap<String, Decimal>> {
        if let Some(r) = remaining {
            check_amount(r).map_err(|e| AppError::invalid_field("remaining", e))?;
        }

        let adjustments = {
            let mut state = self.state.write().await;
            if ingredient_id != ingredient_ids::STRAWBERRY
                && !state.ingredients.contains_key(ingredient_id)
            {
                return Err(AppError::not_found("Ingredient", ingredient_id));
            }
            state.set_manual_adjustment(ingredient_id, remaining);
            state.manual_inventory_adjustments.clone()
        };
        tracing::debug!(ingredient_id = %ingredient_id, ?remaining, "Manual inventory adjustment");

        let ok = self
            .store
            .add_setting_value(setting_keys::MANUAL_INVENTORY_ADJUSTMENTS, &adjustments)
            .await;
        self.synced(ok, "save inventory adjustment");
        Ok(adjustments)
    }

    /// Back to the seeded defaults. Only the in-memory state is reset.
    pub async fn reset(&self) {
        *self.state.write().await = LedgerState::default();
        tracing::info!("Ledger reset to defaults (stored records untouched)");
    }

    // ========================================================================
    // Reports
    // ========================================================================

    pub async fn dashboard(&self) -> DashboardStats {
        let state = self.state.read().await;
        dashboard_stats(&state, &self.policy)
    }

    pub async fn usage(&self) -> IngredientUsage {
        let state = self.state.read().await;
        state_usage(&state, &self.policy)
    }

    pub async fn inventory(&self) -> Vec<IngredientInventory> {
        let state = self.state.read().await;
        let usage = state_usage(&state, &self.policy);
        project_inventory(&state, &usage)
    }

    pub async fn sales_ledger(&self) -> Vec<LedgerRow> {
        let state = self.state.read().await;
        sales_ledger(&state, &self.policy)
    }

    /// Automatic fees over sales whose product still exists
    pub async fn transaction_fees(&self) -> TransactionFees {
        let state = self.state.read().await;
        transaction_fees(
            state
                .sales
                .iter()
                .filter(|s| state.products.contains_key(&s.product_id)),
            &self.policy.auto_pos_fee,
        )
    }

    // ========================================================================
    // Transaction classifier
    // ========================================================================

    /// Candidate product splits of a card total no larger than `max_amount`
    pub async fn classify(
        &self,
        amount: u32,
        product_ids: &[String],
        max_amount: u32,
    ) -> AppResult<Vec<ProductCombo>> {
        if amount > max_amount {
            return Err(AppError::invalid_field(
                "amount",
                format!("Amount must be at most {}", max_amount),
            ));
        }

        let prices = {
            let state = self.state.read().await;
            priced_products(&state, product_ids)
        };
        let combos = tokio::task::spawn_blocking(move || find_combinations(amount, &prices))
            .await
            .map_err(|e| AppError::Internal(format!("Classifier task failed: {}", e)))?;
        tracing::debug!(amount, combos = combos.len(), "Card total classified");
        Ok(combos)
    }

    /// Record confirmed splits as manual sales, one line per product.
    /// Either every line is recorded or none is.
    pub async fn commit_combinations(
        &self,
        date: NaiveDate,
        combos: &[ProductCombo],
    ) -> AppResult<Vec<Sale>> {
        let totals = combo_totals(combos).ok_or_else(|| {
            AppError::invalid_field("combos", "Combined quantity is too large")
        })?;

        let inputs = totals
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .map(|(product_id, qty)| SaleInput {
                date,
                product_id,
                qty,
                unit_price: None,
                origin: SaleOrigin::Manual,
                transaction_id: None,
            })
            .collect::<Vec<_>>();
        for input in &inputs {
            input.validate()?;
        }

        let sales = {
            let mut state = self.state.write().await;
            let sales = inputs
                .into_iter()
                .map(|input| new_sale(&state, input))
                .collect::<AppResult<Vec<_>>>()
                .map_err(|e| match e {
                    AppError::Validation { message, .. } => AppError::Validation {
                        field: Some("combos".to_string()),
                        message,
                    },
                    other => other,
                })?;
            state.sales.extend(sales.iter().cloned());
            sales
        };
        tracing::debug!(date = %date, lines = sales.len(), "Classifier splits committed");

        let mut ok = true;
        for sale in &sales {
            ok &= self.store.upsert(sale).await;
        }
        self.synced(ok, "commit classifier splits");
        Ok(sales)
    }
}

/// A new sale against the current catalog, not yet recorded
fn new_sale(state: &LedgerState, input: SaleInput) -> AppResult<Sale> {
    let product = state.product(&input.product_id).ok_or_else(|| {
        AppError::invalid_field("product_id", format!("Unknown product '{}'", input.product_id))
    })?;
    let unit_price = input.unit_price.unwrap_or(product.price);
    check_amount(unit_price).map_err(|e| AppError::invalid_field("unit_price", e))?;

    Ok(Sale {
        id: new_record_id("s"),
        date: input.date,
        product_id: input.product_id,
        qty: input.qty,
        unit_price,
        origin: input.origin,
        transaction_id: input.transaction_id.filter(|t| !t.trim().is_empty()),
    })
}

// ============================================================================
// Loading
// ============================================================================

fn setting<T: DeserializeOwned>(settings: &BTreeMap<String, Value>, key: &str) -> Option<T> {
    let value = settings.get(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Ignoring stored setting {}: {}", key, e);
            None
        }
    }
}

/// Seeded defaults overlaid with everything the store holds.
///
/// Stored products and ingredients are merged over the seeded catalog by id.
/// Seeded fixed costs are kept while none are stored. If any collection
/// cannot be read the defaults are used as they are.
pub async fn load_state(store: &Arc<dyn RecordStore>) -> LedgerState {
    let mut state = LedgerState::default();

    let (products, sales, fixed_costs, ingredients, ingredient_batches, strawberry_batches, waste_entries) = tokio::join!(
        store.get_all::<Product>(),
        store.get_all::<Sale>(),
        store.get_all::<FixedCost>(),
        store.get_all::<Ingredient>(),
        store.get_all::<IngredientBatch>(),
        store.get_all::<StrawberryBatch>(),
        store.get_all::<WasteEntry>(),
    );

    let (
        Some(products),
        Some(sales),
        Some(fixed_costs),
        Some(ingredients),
        Some(ingredient_batches),
        Some(strawberry_batches),
        Some(waste_entries),
    ) = (
        products,
        sales,
        fixed_costs,
        ingredients,
        ingredient_batches,
        strawberry_batches,
        waste_entries,
    )
    else {
        tracing::warn!(
            backend = store.backend_tag(),
            "Failed to load stored ledger, starting from defaults"
        );
        return state;
    };

    state.merge_catalog(products, ingredients);
    state.sales = sales;
    if !fixed_costs.is_empty() {
        state.fixed_costs = fixed_costs;
    }
    state.ingredient_batches = ingredient_batches;
    state.strawberry_batches = strawberry_batches;
    state.waste_entries = waste_entries;

    if let Some(settings) = store.load_settings().await {
        if let Some(percent) = setting(&settings, setting_keys::POS_FEE_PERCENT) {
            state.settings.pos_fee_percent = percent;
        }
        if let Some(manual) = setting(&settings, setting_keys::POS_FEE_MANUAL) {
            state.settings.pos_fee_manual = manual;
        }
        if let Some(use_manual) = setting(&settings, setting_keys::USE_MANUAL_POS_FEE) {
            state.settings.use_manual_pos_fee = use_manual;
        }
        if let Some(adjustments) = setting(&settings, setting_keys::MANUAL_INVENTORY_ADJUSTMENTS) {
            state.manual_inventory_adjustments = adjustments;
        }
    }

    tracing::info!(
        backend = store.backend_tag(),
        products = state.products.len(),
        sales = state.sales.len(),
        "Ledger loaded"
    );
    state
}
