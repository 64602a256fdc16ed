//! SQLite Store
//!
//! Implements KeyValueStore and CookieJar on a single SQLite database
//! file so coordinates, the zone snapshot, and the zone cookie survive
//! restarts. Operations run on the blocking pool; failures are logged
//! and degrade to "value absent", matching best-effort storage
//! semantics.

use crate::domain::ports::{CookieJar, KeyValueStore};
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// SQLite-backed durable store.
pub struct SqliteStore {
    path: String,
}

impl SqliteStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS cookies (
                 name       TEXT PRIMARY KEY,
                 value      TEXT NOT NULL,
                 expires_at INTEGER NOT NULL
             );",
        )?;
        Ok(Self {
            path: path.to_string(),
        })
    }

    /// Run a closure against a fresh connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        match tokio::task::spawn_blocking(move || -> Result<T> {
            let conn = Connection::open(&path)?;
            Ok(f(&conn)?)
        })
        .await
        {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::error!("sqlite store error: {:?}", e);
                None
            }
            Err(e) => {
                tracing::error!("spawn_blocking error: {:?}", e);
                None
            }
        }
    }

    fn now_epoch_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Option<String> {
        let key = key.to_string();
        self.run(move |conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", [&key], |row| {
                row.get(0)
            })
            .optional()
        })
        .await
        .flatten()
    }

    async fn set(&self, key: &str, value: &str) {
        let key = key.to_string();
        let value = value.to_string();
        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                [&key, &value],
            )
        })
        .await;
    }

    async fn remove(&self, key: &str) {
        let key = key.to_string();
        self.run(move |conn| conn.execute("DELETE FROM kv WHERE key = ?1", [&key]))
            .await;
    }
}

#[async_trait]
impl CookieJar for SqliteStore {
    async fn get(&self, name: &str) -> Option<String> {
        let name = name.to_string();
        let now = Self::now_epoch_secs();
        self.run(move |conn| {
            let row: Option<(String, i64)> = conn
                .query_row(
                    "SELECT value, expires_at FROM cookies WHERE name = ?1",
                    [&name],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            match row {
                Some((value, expires_at)) if expires_at > now => Ok(Some(value)),
                Some(_) => {
                    // Lazy purge of the expired row
                    conn.execute("DELETE FROM cookies WHERE name = ?1", [&name])?;
                    Ok(None)
                }
                None => Ok(None),
            }
        })
        .await
        .flatten()
    }

    async fn set(&self, name: &str, value: &str, ttl: Duration) {
        let name = name.to_string();
        let value = value.to_string();
        let expires_at = Self::now_epoch_secs() + ttl.as_secs() as i64;
        self.run(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cookies (name, value, expires_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![name, value, expires_at],
            )
        })
        .await;
    }

    async fn remove(&self, name: &str) {
        let name = name.to_string();
        self.run(move |conn| conn.execute("DELETE FROM cookies WHERE name = ?1", [&name]))
            .await;
    }
}
