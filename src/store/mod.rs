//! Persistence: the key-value substrate, ordered collections on top of it
//! and the optional remote endpoints of item groups.

pub mod collection;
pub mod endpoint;
pub mod kv;

pub use collection::{new_id, Collection, Direction, OrderedItem, Side};
pub use endpoint::{fetch_items, parse_items, ImportError, RemoteItems};
pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};

use serde::{de::DeserializeOwned, Serialize};

/// Read a single JSON value stored under `key`. Missing, unreadable and
/// undecodable values all yield `None`.
pub fn load_pref<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring undecodable preference");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference");
            None
        }
    }
}

pub fn save_pref<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayoutMode, LAYOUT_MODE_KEY};

    #[test]
    fn preferences_round_trip_and_tolerate_garbage() {
        let store = MemoryStore::new();
        assert_eq!(load_pref::<LayoutMode>(&store, LAYOUT_MODE_KEY), None);
        save_pref(&store, LAYOUT_MODE_KEY, &LayoutMode::List).unwrap();
        assert_eq!(
            load_pref::<LayoutMode>(&store, LAYOUT_MODE_KEY),
            Some(LayoutMode::List)
        );
        store.set(LAYOUT_MODE_KEY, "{oops").unwrap();
        assert_eq!(load_pref::<LayoutMode>(&store, LAYOUT_MODE_KEY), None);
    }
}
