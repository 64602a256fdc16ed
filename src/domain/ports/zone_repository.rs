//! Zone Repository Port
//!
//! Defines the interface for resolving coordinates to the zone covering
//! them. The zone catalog is owned by the backend; this port only asks.

use crate::domain::entities::{Coordinates, Zone};
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes for zone lookup.
///
/// Unlike acquisition errors, these are surfaced to subscribers: the
/// resolver keeps its previous zone and records the message.
#[derive(Debug, Error)]
pub enum ZoneLookupError {
    /// The request could not be completed
    #[error("request failed: {0}")]
    Http(String),
    /// The endpoint answered with an unexpected status
    #[error("unexpected status: {0}")]
    BadStatus(u16),
    /// The payload was not a zone record
    #[error("undecodable payload: {0}")]
    Decode(String),
}

/// Coordinates-to-zone lookup.
///
/// This is an outbound port. `Ok(None)` means the lookup succeeded and no
/// zone covers the point, which is a normal outcome, not an error.
#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Find the zone covering the given coordinates.
    async fn find_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Zone>, ZoneLookupError>;
}
