//! Persistence adapters
//!
//! The ledger mirrors every change into a [`RecordStore`]. Two adapters exist:
//! [`PgStore`] for a hosted Postgres database and [`LocalStore`] for a JSON
//! file on the kiosk itself. One is picked at startup by [`select_store`] and
//! nothing else in the crate knows which.
//!
//! Adapters never return errors. A failure is logged inside the adapter and
//! surfaces as `None` or `false`; callers keep their in-memory state.

mod local;
mod postgres;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    FixedCost, Ingredient, IngredientBatch, Product, Sale, StrawberryBatch, WasteEntry,
};

use crate::config::{StorageBackend, StorageConfig};

pub use local::LocalStore;
pub use postgres::PgStore;

/// Named groups of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Sales,
    FixedCosts,
    Ingredients,
    IngredientBatches,
    StrawberryBatches,
    WasteEntries,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Sales => "sales",
            Collection::FixedCosts => "fixed_costs",
            Collection::Ingredients => "ingredients",
            Collection::IngredientBatches => "ingredient_batches",
            Collection::StrawberryBatches => "strawberry_batches",
            Collection::WasteEntries => "waste_entries",
        }
    }
}

/// A record type that lives in one collection
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;

    fn record_id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $collection:expr) => {
        impl Record for $ty {
            const COLLECTION: Collection = $collection;

            fn record_id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_record!(Product, Collection::Products);
impl_record!(Sale, Collection::Sales);
impl_record!(FixedCost, Collection::FixedCosts);
impl_record!(Ingredient, Collection::Ingredients);
impl_record!(IngredientBatch, Collection::IngredientBatches);
impl_record!(WasteEntry, Collection::WasteEntries);

impl Record for StrawberryBatch {
    const COLLECTION: Collection = Collection::StrawberryBatches;

    fn record_id(&self) -> &str {
        self.id()
    }
}

/// Durable storage for ledger records and settings.
///
/// Collections are returned in insertion order. Upserts are last-write-wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// `None` when the store could not be read
    async fn load_collection(&self, collection: Collection) -> Option<Vec<Value>>;

    async fn upsert_record(&self, collection: Collection, id: &str, body: Value) -> bool;

    async fn delete_record(&self, collection: Collection, id: &str) -> bool;

    async fn load_settings(&self) -> Option<BTreeMap<String, Value>>;

    async fn put_setting(&self, key: &str, value: Value) -> bool;
}

impl dyn RecordStore {
    /// All records of one type. Records that no longer parse are skipped.
    pub async fn get_all<T: Record>(&self) -> Option<Vec<T>> {
        let rows = self.load_collection(T::COLLECTION).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<T>(row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    collection = T::COLLECTION.as_str(),
                    "Skipping unreadable record: {}",
                    e
                ),
            }
        }
        Some(records)
    }

    pub async fn upsert<T: Record>(&self, record: &T) -> bool {
        match serde_json::to_value(record) {
            Ok(body) => {
                self.upsert_record(T::COLLECTION, record.record_id(), body)
                    .await
            }
            Err(e) => {
                tracing::error!("Failed to encode {} record: {}", T::COLLECTION.as_str(), e);
                false
            }
        }
    }

    pub async fn delete_by_id<T: Record>(&self, id: &str) -> bool {
        self.delete_record(T::COLLECTION, id).await
    }

    pub async fn add_setting_value<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> bool {
        match serde_json::to_value(value) {
            Ok(value) => self.put_setting(key, value).await,
            Err(e) => {
                tracing::error!("Failed to encode setting {}: {}", key, e);
                false
            }
        }
    }
}

/// Pick the adapter named by the configuration.
///
/// `auto` uses Postgres when a database URL is configured and reachable and
/// falls back to the local file otherwise. `hosted` fails hard instead.
pub async fn select_store(
    config: &StorageConfig,
    run_migrations: bool,
) -> anyhow::Result<Arc<dyn RecordStore>> {
    let local = || -> Arc<dyn RecordStore> { Arc::new(LocalStore::new(&config.local_path)) };

    let store: Arc<dyn RecordStore> = match config.backend {
        StorageBackend::Local => local(),
        StorageBackend::Hosted => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("storage.database_url is required for hosted storage"))?;
            Arc::new(PgStore::connect(url, config, run_migrations).await?)
        }
        StorageBackend::Auto => match config.database_url.as_deref() {
            Some(url) if !url.is_empty() => {
                match PgStore::connect(url, config, run_migrations).await {
                    Ok(store) => Arc::new(store),
                    Err(e) => {
                        tracing::warn!("Hosted storage unavailable, using local file: {:#}", e);
                        local()
                    }
                }
            }
            _ => local(),
        },
    };

    tracing::info!("Storage backend: {}", store.backend_tag());
    Ok(store)
}
