//! IP Locator Port
//!
//! Defines the interface for coarse, permission-free geolocation based on
//! the caller's public IP. Implementations wrap third-party HTTP
//! providers; the resolver tries them in order.

use crate::domain::entities::Coordinates;
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes for location acquisition.
///
/// Acquisition errors are recovered internally by advancing to the next
/// fallback; they carry enough detail for logs, nothing more.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The request could not be completed
    #[error("request failed: {0}")]
    Http(String),
    /// The provider answered with a non-OK status
    #[error("unexpected status: {0}")]
    BadStatus(u16),
    /// The payload was not the expected JSON shape
    #[error("undecodable payload: {0}")]
    Decode(String),
    /// The provider reported failure in an otherwise valid payload
    #[error("provider reported failure")]
    Unsuccessful,
    /// The payload carried coordinates outside valid bounds
    #[error("coordinates out of bounds")]
    InvalidCoordinates,
    /// The call exceeded its time budget
    #[error("timed out")]
    Timeout,
    /// No geolocation capability is available
    #[error("geolocation not supported")]
    Unsupported,
    /// The user or platform denied access
    #[error("permission denied: {0}")]
    Denied(String),
}

/// Coarse IP-based geolocation.
///
/// This is an outbound port. A successful result always holds validated
/// coordinates; adapters must map out-of-bounds payloads to
/// `LocateError::InvalidCoordinates`.
#[async_trait]
pub trait IpLocator: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Resolve the caller's public IP to coordinates.
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}
