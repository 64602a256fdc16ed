//! Cookie Jar Port
//!
//! Defines the interface for expiring name-value pairs consumed by
//! server-rendered requests. Entries past their TTL are never returned.

use async_trait::async_trait;
use std::time::Duration;

/// Expiring cookie storage.
///
/// This is an outbound port. `get` must treat an expired entry as absent;
/// whether expired rows are purged eagerly or lazily is up to the adapter.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// Read a cookie that has not expired.
    async fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie with a time-to-live.
    async fn set(&self, name: &str, value: &str, ttl: Duration);

    /// Delete a cookie. Removing an absent cookie is not an error.
    async fn remove(&self, name: &str);
}
