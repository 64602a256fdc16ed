//! ipapi Locator
//!
//! Implements IpLocator against an ipapi-style endpoint whose JSON
//! payload carries `latitude`/`longitude` at the top level.

use crate::domain::entities::Coordinates;
use crate::domain::ports::{IpLocator, LocateError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct IpApiPayload {
    latitude: f64,
    longitude: f64,
}

/// Primary IP-geolocation provider.
pub struct IpApiLocator {
    client: reqwest::Client,
    url: String,
}

impl IpApiLocator {
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
impl IpLocator for IpApiLocator {
    fn name(&self) -> &str {
        "ipapi"
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

        let payload: IpApiPayload = resp
            .json()
            .await
            .map_err(|e| LocateError::Decode(e.to_string()))?;

        Coordinates::new(payload.latitude, payload.longitude)
            .ok_or(LocateError::InvalidCoordinates)
    }
}
