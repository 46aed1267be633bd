use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Collection, RecordStore};

/// Everything in one JSON document on local disk.
///
/// The document is read on first use and rewritten in full after every
/// change, through a temporary file that replaces the original.
pub struct LocalStore {
    path: PathBuf,
    document: Mutex<Option<LocalDocument>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocalDocument {
    #[serde(default)]
    collections: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    settings: BTreeMap<String, Value>,
}

impl LocalDocument {
    fn collection_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        self.collections
            .entry(collection.as_str().to_string())
            .or_default()
    }
}

fn record_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

impl LocalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            document: Mutex::new(None),
        }
    }

    async fn read_document(&self) -> anyhow::Result<LocalDocument> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("{} is not a ledger document", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(LocalDocument::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    async fn write_document(&self, document: &LocalDocument) -> anyhow::Result<()> {
        let bytes =
            serde_json::to_vec_pretty(document).context("failed to encode ledger document")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))
    }

    /// Run `f` against the loaded document, then persist it if `f` changed it
    async fn modify<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut LocalDocument) -> bool + Send,
    {
        let mut guard = self.document.lock().await;
        if guard.is_none() {
            match self.read_document().await {
                Ok(document) => *guard = Some(document),
                Err(e) => {
                    tracing::error!("Local store unavailable: {:#}", e);
                    return false;
                }
            }
        }
        let Some(document) = guard.as_mut() else {
            return false;
        };

        if !f(document) {
            return true;
        }
        match self.write_document(document).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Local store write failed: {:#}", e);
                false
            }
        }
    }

    async fn read<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&LocalDocument) -> T + Send,
    {
        let mut guard = self.document.lock().await;
        if guard.is_none() {
            match self.read_document().await {
                Ok(document) => *guard = Some(document),
                Err(e) => {
                    tracing::error!("Local store unavailable: {:#}", e);
                    return None;
                }
            }
        }
        guard.as_ref().map(f)
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    fn backend_tag(&self) -> &'static str {
        "local"
    }

    async fn load_collection(&self, collection: Collection) -> Option<Vec<Value>> {
        self.read(|doc| {
            doc.collections
                .get(collection.as_str())
                .cloned()
                .unwrap_or_default()
        })
        .await
    }

    async fn upsert_record(&self, collection: Collection, id: &str, body: Value) -> bool {
        self.modify(|doc| {
            let records = doc.collection_mut(collection);
            match records.iter_mut().find(|r| record_id(r) == Some(id)) {
                Some(existing) => *existing = body,
                None => records.push(body),
            }
            true
        })
        .await
    }

    async fn delete_record(&self, collection: Collection, id: &str) -> bool {
        self.modify(|doc| {
            let records = doc.collection_mut(collection);
            let before = records.len();
            records.retain(|r| record_id(r) != Some(id));
            records.len() != before
        })
        .await
    }

    async fn load_settings(&self) -> Option<BTreeMap<String, Value>> {
        self.read(|doc| doc.settings.clone()).await
    }

    async fn put_setting(&self, key: &str, value: Value) -> bool {
        self.modify(|doc| {
            doc.settings.insert(key.to_string(), value);
            true
        })
        .await
    }
}
