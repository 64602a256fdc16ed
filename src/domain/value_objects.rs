//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// How the currently adopted coordinates were obtained.
///
/// The tag is persisted alongside the coordinates so the UI can offer an
/// upgrade path, e.g. a "use precise location" affordance while the
/// source is still `Ip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationSource {
    /// Coarse coordinates from an IP-geolocation provider
    Ip,
    /// Precise coordinates from the device, permission-gated
    Gps,
    /// The configured fallback location
    Default,
    /// Caller-supplied override (e.g. a point picked on a map)
    Manual,
}

impl LocationSource {
    /// Parse a persisted source tag.
    ///
    /// Unknown tags map to no source so a corrupt value never
    /// masquerades as a real acquisition path.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ip" => Some(Self::Ip),
            "gps" => Some(Self::Gps),
            "default" => Some(Self::Default),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    /// Convert to the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Gps => "gps",
            Self::Default => "default",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
