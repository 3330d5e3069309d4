use super::collection::{new_id, Collection, OrderedItem};
use super::kv::{KeyValueStore, StoreError};
use crate::common::task::{spawn_once, Notify, RuntimeCell};
use crate::dashboard::source::{FetchError, JsonSource};
use crate::model::endpoint_key;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("items could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pull an item list out of an endpoint response. Accepts a bare array or
/// an object with an `items` array; any other shape yields `Ok(None)`.
/// Items without an id, or with a duplicate one, get a fresh id.
pub fn parse_items<T: OrderedItem>(doc: Value) -> Result<Option<Vec<T>>, serde_json::Error> {
    let list = match doc {
        Value::Array(list) => list,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(list)) => list,
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    let mut items: Vec<T> = serde_json::from_value(Value::Array(list))?;
    let mut seen = HashSet::new();
    for item in &mut items {
        if item.id().is_empty() || !seen.insert(item.id().to_string()) {
            let id = new_id();
            seen.insert(id.clone());
            item.set_id(id);
        }
    }
    Ok(Some(items))
}

pub fn fetch_items<T: OrderedItem>(
    url: &str,
    source: &dyn JsonSource,
) -> Result<Option<Vec<T>>, ImportError> {
    let doc = source.get_json(url)?;
    Ok(parse_items(doc)?)
}

#[derive(Debug, Clone)]
enum ImportStatus<T> {
    Fetching,
    Done(Vec<T>),
    Ignored,
    Failed(String),
}

/// Optional remote source of one item group, persisted under
/// `<collection key>-endpoint`.
pub struct RemoteItems<T: OrderedItem> {
    key: String,
    url: String,
    pending: Option<Arc<RuntimeCell<ImportStatus<T>>>>,
    error: Option<String>,
}

impl<T> RemoteItems<T>
where
    T: OrderedItem + Send + Sync + 'static,
{
    pub fn load(store: &dyn KeyValueStore, collection_key: &str) -> Self {
        let key = endpoint_key(collection_key);
        let url = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str::<String>(&raw).unwrap_or(raw),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "failed to read item endpoint");
                String::new()
            }
        };
        Self {
            key,
            url,
            pending: None,
            error: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Persist `url`; an empty value removes the endpoint.
    pub fn set_url(&mut self, store: &dyn KeyValueStore, url: &str) -> Result<(), StoreError> {
        let url = url.trim().to_string();
        if url.is_empty() {
            store.remove(&self.key)?;
        } else {
            let json = serde_json::to_string(&url).map_err(|source| StoreError::Serialize {
                key: self.key.clone(),
                source,
            })?;
            store.set(&self.key, &json)?;
        }
        self.url = url;
        Ok(())
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a background import. No-op without an endpoint or while one
    /// is already running.
    pub fn fetch_now(&mut self, source: Arc<dyn JsonSource>, notify: Notify) {
        if self.url.is_empty() || self.pending.is_some() {
            return;
        }
        self.error = None;
        let cell = Arc::new(RuntimeCell::new(ImportStatus::Fetching));
        let job_cell = Arc::clone(&cell);
        let url = self.url.clone();
        let spawned = spawn_once(&format!("import-{}", self.key), move || {
            let status = match fetch_items::<T>(&url, source.as_ref()) {
                Ok(Some(items)) => ImportStatus::Done(items),
                Ok(None) => ImportStatus::Ignored,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "item import failed");
                    ImportStatus::Failed(e.to_string())
                }
            };
            if job_cell.apply(|s| *s = status) {
                notify();
            }
        });
        match spawned {
            Ok(()) => self.pending = Some(cell),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Apply a finished import to `collection`. Returns true when the
    /// collection was replaced.
    pub fn poll(&mut self, collection: &mut Collection<T>) -> bool {
        let Some(cell) = &self.pending else {
            return false;
        };
        let status = cell.snapshot();
        if matches!(status, ImportStatus::Fetching) {
            return false;
        }
        cell.retire();
        self.pending = None;
        match status {
            ImportStatus::Done(items) => {
                tracing::info!(key = %self.key, count = items.len(), "imported items from endpoint");
                collection.replace_all(items);
                true
            }
            ImportStatus::Failed(e) => {
                self.error = Some(e);
                false
            }
            ImportStatus::Ignored => {
                tracing::debug!(key = %self.key, "endpoint returned an unsupported shape");
                false
            }
            ImportStatus::Fetching => false,
        }
    }
}

impl<T: OrderedItem> Drop for RemoteItems<T> {
    fn drop(&mut self) {
        if let Some(cell) = self.pending.take() {
            cell.retire();
        }
    }
}
