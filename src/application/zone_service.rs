//! Zone Service - Main application use case
//!
//! Orchestrates zone resolution: acquires best-effort coordinates on
//! startup without a permission prompt, offers an opt-in upgrade to a
//! precise device fix, and resolves coordinates to a zone through the
//! backend port. State is published over a watch channel; callers
//! subscribe instead of reaching into ambient globals.

use crate::domain::entities::{Coordinates, ResolverSnapshot, Zone};
use crate::domain::ports::{
    CookieJar, DeviceLocator, IpLocator, KeyValueStore, PositionRequest, ZoneRepository,
};
use crate::domain::value_objects::LocationSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;

/// Storage keys, scoped to keep clear of older unscoped entries.
const KEY_LAT: &str = "bazar:lat";
const KEY_LNG: &str = "bazar:lng";
const KEY_SOURCE: &str = "bazar:source";
const KEY_ZONE: &str = "bazar:zone";
/// Zone key written by earlier releases, removed whenever a fresh
/// snapshot is cached.
const LEGACY_KEY_ZONE: &str = "zone";
/// Cookie consumed by server-rendered requests.
const ZONE_COOKIE: &str = "zone_id";

/// Tunables for the resolution pipeline.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Budget for each IP-geolocation provider call
    pub provider_timeout: Duration,
    /// Budget for a precise device fix
    pub device_timeout: Duration,
    /// Adopted when every acquisition strategy fails
    pub default_coordinates: Coordinates,
    /// Lifetime of the zone id cookie
    pub zone_cookie_ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_millis(5000),
            device_timeout: Duration::from_secs(10),
            default_coordinates: Coordinates {
                lat: 23.8103,
                lng: 90.4125,
            },
            zone_cookie_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        }
    }
}

/// Errors returned by caller-facing operations.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The supplied coordinates fail bounds validation
    #[error("coordinates out of bounds")]
    InvalidCoordinates,
    /// No device capability is wired, or the device call failed
    #[error("precise location unavailable: {0}")]
    LocationUnavailable(String),
}

/// Zone resolution service.
///
/// The acquisition chain in `initialize` is strictly sequential: a step
/// is attempted only after the previous one definitively failed, and the
/// first satisfied step wins. Every zone lookup takes a ticket from a
/// monotonic counter; a completion whose ticket is no longer the latest
/// is dropped, so a slow stale response can never clobber a fresher one.
pub struct ZoneService {
    store: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn CookieJar>,
    ip_locators: Vec<Arc<dyn IpLocator>>,
    device_locator: Option<Arc<dyn DeviceLocator>>,
    zone_repo: Arc<dyn ZoneRepository>,
    config: ResolverConfig,
    state: watch::Sender<ResolverSnapshot>,
    resolve_seq: AtomicU64,
}

impl ZoneService {
    /// Create a new zone service.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        cookies: Arc<dyn CookieJar>,
        ip_locators: Vec<Arc<dyn IpLocator>>,
        device_locator: Option<Arc<dyn DeviceLocator>>,
        zone_repo: Arc<dyn ZoneRepository>,
        config: ResolverConfig,
    ) -> Self {
        let (state, _) = watch::channel(ResolverSnapshot::default());
        Self {
            store,
            cookies,
            ip_locators,
            device_locator,
            zone_repo,
            config,
            state,
            resolve_seq: AtomicU64::new(0),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ResolverSnapshot> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> ResolverSnapshot {
        self.state.borrow().clone()
    }

    /// Acquire coordinates and resolve the zone. Invoked once per session.
    ///
    /// Fallback chain, first satisfied branch wins:
    /// 1. persisted coordinates (malformed values are discarded, not fatal)
    /// 2. IP-geolocation providers, in order, each bounded by the
    ///    provider timeout
    /// 3. the configured default location
    pub async fn initialize(&self) {
        if let Some((coords, source)) = self.load_stored_coordinates().await {
            tracing::debug!("adopting stored coordinates ({}, {})", coords.lat, coords.lng);
            self.adopt(coords, source);
            self.resolve_zone(coords).await;
            return;
        }

        let (coords, source) = match self.locate_by_ip().await {
            Some(coords) => (coords, LocationSource::Ip),
            None => {
                tracing::info!("all IP providers failed, falling back to default location");
                (self.config.default_coordinates, LocationSource::Default)
            }
        };

        self.persist_coordinates(coords, source).await;
        self.adopt(coords, source);
        self.resolve_zone(coords).await;
    }

    /// Upgrade to a precise, permission-gated device fix.
    ///
    /// Success overwrites coordinates and source, clears any prior
    /// device error, and re-resolves. Failure records the device error
    /// and leaves adopted coordinates, zone, and the resolution error
    /// untouched; there is no automatic fallback, the caller retries.
    pub async fn use_precise_location(&self) -> Result<Coordinates, ResolverError> {
        let locator = self.device_locator.as_ref().ok_or_else(|| {
            ResolverError::LocationUnavailable("no device locator configured".to_string())
        })?;

        let request = PositionRequest {
            high_accuracy: true,
            timeout: self.config.device_timeout,
            maximum_age: Duration::ZERO,
        };

        match locator.current_position(request).await {
            Ok(coords) => {
                self.persist_coordinates(coords, LocationSource::Gps).await;
                self.state.send_modify(|s| {
                    s.coordinates = Some(coords);
                    s.source = Some(LocationSource::Gps);
                    s.location_error = None;
                });
                self.resolve_zone(coords).await;
                Ok(coords)
            }
            Err(e) => {
                tracing::warn!("precise location failed: {}", e);
                self.state
                    .send_modify(|s| s.location_error = Some(e.to_string()));
                Err(ResolverError::LocationUnavailable(e.to_string()))
            }
        }
    }

    /// Manual override, e.g. a point picked on a map.
    ///
    /// Bounds are enforced exactly like the automatic paths.
    pub async fn update_location(&self, lat: f64, lng: f64) -> Result<(), ResolverError> {
        let coords = Coordinates::new(lat, lng).ok_or(ResolverError::InvalidCoordinates)?;

        self.persist_coordinates(coords, LocationSource::Manual).await;
        self.adopt(coords, LocationSource::Manual);
        self.resolve_zone(coords).await;
        Ok(())
    }

    /// Re-run zone resolution against the adopted coordinates.
    ///
    /// Strict no-op while no coordinates are adopted.
    pub async fn refetch_zone(&self) {
        let coords = self.state.borrow().coordinates;
        match coords {
            Some(coords) => self.resolve_zone(coords).await,
            None => tracing::debug!("refetch requested before any coordinates were adopted"),
        }
    }

    /// Read and validate persisted coordinates.
    ///
    /// Malformed values (including a half-written pair) are removed from
    /// the store so the next session starts clean.
    async fn load_stored_coordinates(&self) -> Option<(Coordinates, LocationSource)> {
        let lat = self.store.get(KEY_LAT).await;
        let lng = self.store.get(KEY_LNG).await;

        if lat.is_none() && lng.is_none() {
            return None;
        }

        let parsed = match (&lat, &lng) {
            (Some(lat), Some(lng)) => Coordinates::parse(lat, lng),
            _ => None,
        };

        match parsed {
            Some(coords) => {
                let source = match self.store.get(KEY_SOURCE).await {
                    Some(tag) => LocationSource::from_str(&tag).unwrap_or(LocationSource::Default),
                    None => LocationSource::Default,
                };
                Some((coords, source))
            }
            None => {
                tracing::warn!("discarding malformed stored coordinates");
                self.store.remove(KEY_LAT).await;
                self.store.remove(KEY_LNG).await;
                self.store.remove(KEY_SOURCE).await;
                None
            }
        }
    }

    /// Try each IP provider in order; first valid result wins.
    async fn locate_by_ip(&self) -> Option<Coordinates> {
        for locator in &self.ip_locators {
            match tokio::time::timeout(self.config.provider_timeout, locator.locate()).await {
                Ok(Ok(coords)) => {
                    tracing::debug!(
                        "provider {} located ({}, {})",
                        locator.name(),
                        coords.lat,
                        coords.lng
                    );
                    return Some(coords);
                }
                Ok(Err(e)) => tracing::warn!("provider {} failed: {}", locator.name(), e),
                Err(_) => tracing::warn!("provider {} timed out", locator.name()),
            }
        }
        None
    }

    fn adopt(&self, coords: Coordinates, source: LocationSource) {
        self.state.send_modify(|s| {
            s.coordinates = Some(coords);
            s.source = Some(source);
        });
    }

    async fn persist_coordinates(&self, coords: Coordinates, source: LocationSource) {
        self.store.set(KEY_LAT, &coords.lat.to_string()).await;
        self.store.set(KEY_LNG, &coords.lng.to_string()).await;
        self.store.set(KEY_SOURCE, source.as_str()).await;
    }

    /// Resolve coordinates to a zone and publish the outcome.
    async fn resolve_zone(&self, coords: Coordinates) {
        let ticket = self.resolve_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.loading = true);

        let result = self.zone_repo.find_by_coordinates(coords).await;

        // A newer request was issued while this one was in flight; its
        // completion owns the state now.
        if self.resolve_seq.load(Ordering::SeqCst) != ticket {
            tracing::debug!("dropping stale zone lookup completion");
            return;
        }

        match result {
            Ok(zone) => {
                match &zone {
                    Some(z) => tracing::info!("resolved zone {} ({})", z.id, z.name),
                    None => tracing::info!(
                        "no zone covers ({}, {})",
                        coords.lat,
                        coords.lng
                    ),
                }
                self.cache_zone(zone.as_ref()).await;
                self.state.send_modify(|s| {
                    s.zone = zone.clone();
                    s.error = None;
                    s.loading = false;
                });
            }
            Err(e) => {
                tracing::warn!("zone lookup failed: {}", e);
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.loading = false;
                });
            }
        }
    }

    /// Cache the resolved zone for the next session and for
    /// server-rendered requests.
    async fn cache_zone(&self, zone: Option<&Zone>) {
        match zone {
            Some(zone) => {
                match serde_json::to_string(zone) {
                    Ok(json) => self.store.set(KEY_ZONE, &json).await,
                    Err(e) => tracing::warn!("zone snapshot not cached: {}", e),
                }
                self.cookies
                    .set(ZONE_COOKIE, &zone.id, self.config.zone_cookie_ttl)
                    .await;
            }
            None => {
                self.store.remove(KEY_ZONE).await;
                self.cookies.remove(ZONE_COOKIE).await;
            }
        }
        self.store.remove(LEGACY_KEY_ZONE).await;
    }
}
