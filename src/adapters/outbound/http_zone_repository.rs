//! HTTP Zone Repository
//!
//! Implements ZoneRepository against the storefront backend's zone
//! lookup endpoint. A 404 or an empty body means no zone covers the
//! coordinates, which is a normal outcome.

use crate::domain::entities::{Coordinates, Zone};
use crate::domain::ports::{ZoneLookupError, ZoneRepository};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Zone lookup over HTTP.
pub struct HttpZoneRepository {
    client: reqwest::Client,
    base_url: String,
}

impl HttpZoneRepository {
    /// Create a repository with a client-level timeout.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ZoneRepository for HttpZoneRepository {
    async fn find_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Zone>, ZoneLookupError> {
        let url = format!("{}/zones/lookup", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lng", coordinates.lng.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ZoneLookupError::Http(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ZoneLookupError::BadStatus(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ZoneLookupError::Http(e.to_string()))?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let zone: Zone =
            serde_json::from_str(trimmed).map_err(|e| ZoneLookupError::Decode(e.to_string()))?;
        Ok(Some(zone))
    }
}
