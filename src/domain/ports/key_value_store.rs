//! Key-Value Store Port
//!
//! Defines the interface for durable string storage, the analog of the
//! web platform's local/session storage. Implementations may use SQLite
//! or in-memory maps.

use async_trait::async_trait;

/// Durable string key-value storage.
///
/// This is an outbound port. Writes are idempotent last-write-wins on
/// named keys; there is no transactional coupling between keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value for a key, if present.
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str);

    /// Delete a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str);
}
