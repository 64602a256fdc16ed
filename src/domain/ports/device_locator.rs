//! Device Locator Port
//!
//! Defines the interface for precise, permission-gated positioning.
//! The capability may be absent entirely; the composition root wires
//! `None` when the platform offers nothing.

use crate::domain::entities::Coordinates;
use crate::domain::ports::LocateError;
use async_trait::async_trait;
use std::time::Duration;

/// Options for a single position request.
#[derive(Debug, Clone, Copy)]
pub struct PositionRequest {
    /// Ask the platform for its most accurate fix
    pub high_accuracy: bool,
    /// Give up after this long
    pub timeout: Duration,
    /// Oldest acceptable cached fix; zero forces a fresh reading
    pub maximum_age: Duration,
}

/// Precise device positioning.
///
/// This is an outbound port. Failures are surfaced to the caller through
/// a dedicated error channel and never trigger an automatic fallback.
#[async_trait]
pub trait DeviceLocator: Send + Sync {
    /// Obtain the device's current position.
    async fn current_position(&self, request: PositionRequest)
        -> Result<Coordinates, LocateError>;
}
