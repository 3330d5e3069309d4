use super::kv::{KeyValueStore, StoreError};
use crate::common::json::merge_json;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Shared shape of everything a [`Collection`] can hold.
pub trait OrderedItem: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

/// Insertion side relative to a drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Generate a fresh 128-bit identifier rendered as lowercase hex.
pub fn new_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// A named, ordered list persisted under one key of a [`KeyValueStore`].
///
/// Every mutation leaves `order` equal to the positional index and replaces
/// the shared snapshot in one step.
pub struct Collection<T: OrderedItem> {
    key: String,
    store: Arc<dyn KeyValueStore>,
    items: Arc<Vec<T>>,
    persistence_error: Option<String>,
}

impl<T: OrderedItem> Collection<T> {
    /// Load `key` from `store`, seeding it with `defaults` when the key is
    /// missing or cannot be decoded.
    pub fn load(store: Arc<dyn KeyValueStore>, key: &str, defaults: Vec<T>) -> Self {
        let mut collection = Self {
            key: key.to_string(),
            store,
            items: Arc::new(Vec::new()),
            persistence_error: None,
        };
        let stored = match collection.store.get(key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read collection; using defaults");
                collection.persistence_error = Some(e.to_string());
                None
            }
        };
        match stored.map(|raw| serde_json::from_str::<Vec<T>>(&raw)) {
            Some(Ok(items)) => {
                collection.items = Arc::new(normalize(items));
            }
            Some(Err(e)) => {
                tracing::warn!(key, error = %e, "stored collection is corrupt; reseeding defaults");
                collection.seed(defaults);
            }
            None => collection.seed(defaults),
        }
        collection
    }

    fn seed(&mut self, defaults: Vec<T>) {
        self.items = Arc::new(defaults);
        self.write();
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current sorted snapshot.
    pub fn items(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Last storage failure, if the most recent write did not reach the
    /// store. The in-memory list stays authoritative either way.
    pub fn persistence_error(&self) -> Option<&str> {
        self.persistence_error.as_deref()
    }

    /// Append `item` with a fresh id at the end of the collection and return
    /// the new id. Any id or order already set on `item` is ignored.
    pub fn add(&mut self, mut item: T) -> String {
        let next_order = self
            .items
            .iter()
            .map(|item| item.order())
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);
        let id = new_id();
        item.set_id(id.clone());
        item.set_order(next_order);
        let mut next = self.items.as_ref().clone();
        next.push(item);
        self.commit(next);
        id
    }

    /// Apply `patch` to the item with `id`. Unknown ids are ignored.
    pub fn update(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let mut next = self.items.as_ref().clone();
        patch(&mut next[pos]);
        next[pos].set_id(id.to_string());
        self.commit(sort_by_order(next));
        true
    }

    /// Shallow-merge a JSON object of fields into the item with `id`.
    pub fn merge(&mut self, id: &str, fields: &Value) -> Result<bool, StoreError> {
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };
        let current = serde_json::to_value(&self.items[pos]).map_err(|source| {
            StoreError::Serialize {
                key: self.key.clone(),
                source,
            }
        })?;
        let merged: T = serde_json::from_value(merge_json(&current, fields)).map_err(|source| {
            StoreError::Serialize {
                key: self.key.clone(),
                source,
            }
        })?;
        Ok(self.update(id, move |item| *item = merged))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        let next = self
            .items
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.commit(next);
        true
    }

    /// Move `dragged_id` immediately before or after `target_id`.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str, side: Side) -> bool {
        if dragged_id == target_id {
            return false;
        }
        let mut sorted = self.items.as_ref().clone();
        let Some(drag_idx) = sorted.iter().position(|item| item.id() == dragged_id) else {
            return false;
        };
        if !sorted.iter().any(|item| item.id() == target_id) {
            return false;
        }
        let dragged = sorted.remove(drag_idx);
        let Some(target_idx) = sorted.iter().position(|item| item.id() == target_id) else {
            return false;
        };
        let insert_idx = match side {
            Side::Before => target_idx,
            Side::After => target_idx + 1,
        };
        sorted.insert(insert_idx, dragged);
        self.commit(sorted);
        true
    }

    /// Swap the item with its neighbour in `direction`.
    pub fn move_item(&mut self, id: &str, direction: Direction) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let swap_idx = match direction {
            Direction::Up if idx > 0 => idx - 1,
            Direction::Down if idx + 1 < self.items.len() => idx + 1,
            _ => return false,
        };
        let mut next = self.items.as_ref().clone();
        next.swap(idx, swap_idx);
        self.commit(next);
        true
    }

    /// Replace the whole collection, keeping the stored relative order of
    /// `items`.
    pub fn replace_all(&mut self, items: Vec<T>) {
        let next = normalize(items);
        self.items = Arc::new(next);
        self.write();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// `next` is already in its final sequence; only `order` is rewritten.
    fn commit(&mut self, next: Vec<T>) {
        self.items = Arc::new(renumber(next));
        self.write();
    }

    fn write(&mut self) {
        let result = serde_json::to_string(self.items.as_ref())
            .map_err(|source| StoreError::Serialize {
                key: self.key.clone(),
                source,
            })
            .and_then(|json| self.store.set(&self.key, &json));
        match result {
            Ok(()) => self.persistence_error = None,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "persistence unavailable");
                self.persistence_error = Some(e.to_string());
            }
        }
    }
}

fn sort_by_order<T: OrderedItem>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| item.order());
    items
}

fn renumber<T: OrderedItem>(mut items: Vec<T>) -> Vec<T> {
    for (idx, item) in items.iter_mut().enumerate() {
        item.set_order(idx as i64);
    }
    items
}

/// Stable sort on `order`, then renumber to the positional index.
fn normalize<T: OrderedItem>(items: Vec<T>) -> Vec<T> {
    renumber(sort_by_order(items))
}
