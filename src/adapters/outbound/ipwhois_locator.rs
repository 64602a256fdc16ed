//! ipwhois Locator
//!
//! Implements IpLocator against an ipwhois-style endpoint. The payload
//! carries an explicit `success` flag that must be checked even on a 200
//! response.

use crate::domain::entities::Coordinates;
use crate::domain::ports::{IpLocator, LocateError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct IpWhoIsPayload {
    success: bool,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

/// Secondary IP-geolocation provider.
pub struct IpWhoIsLocator {
    client: reqwest::Client,
    url: String,
}

impl IpWhoIsLocator {
    /// Create a locator with a client-level timeout.
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl IpLocator for IpWhoIsLocator {
    fn name(&self) -> &str {
        "ipwhois"
    }

    async fn locate(&self) -> Result<Coordinates, LocateError> {
        let resp = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LocateError::Timeout
            } else {
                LocateError::Http(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            return Err(LocateError::BadStatus(resp.status().as_u16()));
        }

        let payload: IpWhoIsPayload = resp
            .json()
            .await
            .map_err(|e| LocateError::Decode(e.to_string()))?;

        if !payload.success {
            return Err(LocateError::Unsuccessful);
        }

        Coordinates::new(payload.latitude, payload.longitude)
            .ok_or(LocateError::InvalidCoordinates)
    }
}
