use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{Collection, RecordStore};
use crate::config::StorageConfig;

/// Records as JSONB rows in a hosted Postgres database
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn connect(
        url: &str,
        config: &StorageConfig,
        run_migrations: bool,
    ) -> anyhow::Result<Self> {
        tracing::info!("Connecting to database...");
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(url)
            .await?;
        tracing::info!("Database connection established");

        if run_migrations {
            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations").run(&db).await?;
            tracing::info!("Migrations completed");
        }

        Ok(Self::new(db))
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn load_collection(&self, collection: Collection) -> Option<Vec<Value>> {
        let rows = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM ledger_records WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection.as_str())
        .fetch_all(&self.db)
        .await;

        match rows {
            Ok(rows) => Some(rows),
            Err(e) => {
                tracing::error!("Failed to load {}: {}", collection.as_str(), e);
                None
            }
        }
    }

    async fn upsert_record(&self, collection: Collection, id: &str, body: Value) -> bool {
        let result = sqlx::query(
            r#"
            INSERT INTO ledger_records (collection, id, body, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (collection, id)
            DO UPDATE SET body = EXCLUDED.body, updated_at = NOW()
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(body)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to upsert {} {}: {}", collection.as_str(), id, e);
                false
            }
        }
    }

    async fn delete_record(&self, collection: Collection, id: &str) -> bool {
        let result = sqlx::query("DELETE FROM ledger_records WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.db)
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to delete {} {}: {}", collection.as_str(), id, e);
                false
            }
        }
    }

    async fn load_settings(&self) -> Option<BTreeMap<String, Value>> {
        let rows = sqlx::query_as::<_, (String, Value)>("SELECT key, value FROM ledger_settings")
            .fetch_all(&self.db)
            .await;

        match rows {
            Ok(rows) => Some(rows.into_iter().collect()),
            Err(e) => {
                tracing::error!("Failed to load settings: {}", e);
                None
            }
        }
    }

    async fn put_setting(&self, key: &str, value: Value) -> bool {
        let result = sqlx::query(
            r#"
            INSERT INTO ledger_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to save setting {}: {}", key, e);
                false
            }
        }
    }
}
