//! DashMap Cookie Jar
//!
//! Implements CookieJar using DashMap. Expiry is checked lazily on read;
//! an expired entry is removed and reported as absent.

use crate::domain::ports::CookieJar;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

struct CookieEntry {
    value: String,
    expires_at: Instant,
}

/// In-memory cookie jar with TTL semantics.
pub struct DashMapCookieJar {
    cookies: DashMap<String, CookieEntry>,
}

impl DashMapCookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self {
            cookies: DashMap::new(),
        }
    }
}

impl Default for DashMapCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieJar for DashMapCookieJar {
    async fn get(&self, name: &str) -> Option<String> {
        let expired = match self.cookies.get(name) {
            Some(entry) => {
                if entry.expires_at > Instant::now() {
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.cookies.remove(name);
        }
        None
    }

    async fn set(&self, name: &str, value: &str, ttl: Duration) {
        self.cookies.insert(
            name.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
    }

    async fn remove(&self, name: &str) {
        self.cookies.remove(name);
    }
}
