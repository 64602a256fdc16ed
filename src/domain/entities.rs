//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the zone resolver domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::LocationSource;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Construction is the validation boundary: a `Coordinates` value always
/// holds a finite latitude in [-90, 90] and longitude in [-180, 180].
/// Anything else is treated as "no coordinates" and never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting out-of-bounds or non-finite values.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
        {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    /// Parse coordinates from stored string values.
    ///
    /// Non-numeric strings fail the same way out-of-bounds numbers do.
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        Self::new(lat, lng)
    }
}

/// A delivery zone as defined by the backend.
///
/// The resolver only caches the last-fetched value; the record is owned
/// by the zone-lookup service. Unknown payload fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque zone identifier
    pub id: String,
    /// Human-readable zone name
    pub name: String,
    /// Whether the zone currently accepts orders
    #[serde(default)]
    pub is_active: bool,
}

/// Published resolver state.
///
/// A snapshot is emitted on every state change; subscribers render from it
/// and must stay usable with `zone == None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverSnapshot {
    /// Last adopted coordinates
    pub coordinates: Option<Coordinates>,
    /// How the adopted coordinates were obtained
    pub source: Option<LocationSource>,
    /// Last successfully resolved zone
    pub zone: Option<Zone>,
    /// True while a zone lookup is in flight
    pub loading: bool,
    /// Last zone-lookup failure
    pub error: Option<String>,
    /// Last device-geolocation failure (kept apart from `error` so a
    /// denied permission never hides a lookup failure, and vice versa)
    pub location_error: Option<String>,
}
