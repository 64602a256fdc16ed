//! DashMap Key-Value Store
//!
//! Implements KeyValueStore using DashMap for lock-free concurrent
//! access. Nothing survives the process; useful for tests and for
//! running without a storage file.

use crate::domain::ports::KeyValueStore;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory key-value store.
pub struct DashMapKeyValueStore {
    values: DashMap<String, String>,
}

impl DashMapKeyValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for DashMapKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for DashMapKeyValueStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|e| e.value().clone())
    }

    async fn set(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    async fn remove(&self, key: &str) {
        self.values.remove(key);
    }
}
