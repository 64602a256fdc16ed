//! Zone Resolver - Geolocation fallback chain with zone lookup
//!
//! This is the composition root that wires together all the components.

mod adapters;
mod application;
mod config;
mod domain;

use crate::adapters::outbound::{HttpZoneRepository, IpApiLocator, IpWhoIsLocator, SqliteStore};
use crate::application::{ResolverConfig, ZoneService};
use crate::config::load_config;
use crate::domain::entities::Coordinates;
use crate::domain::ports::{CookieJar, DeviceLocator, IpLocator, KeyValueStore, ZoneRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting zone resolver store={} zone_api={}",
        cfg.store_path,
        cfg.zone_api_url
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and the service

    // 1. Create outbound adapters

    // Durable storage (SQLite file shared by the key-value store and
    // the cookie jar)
    let store = Arc::new(SqliteStore::open(&cfg.store_path)?);

    // IP geolocation providers, tried in order
    let provider_timeout = Duration::from_millis(cfg.provider_timeout_ms);
    let ip_locators: Vec<Arc<dyn IpLocator>> = vec![
        Arc::new(IpApiLocator::new(&cfg.ip_primary_url, provider_timeout)?) as Arc<dyn IpLocator>,
        Arc::new(IpWhoIsLocator::new(&cfg.ip_secondary_url, provider_timeout)?),
    ];

    // Zone lookup backend
    let zone_repo =
        Arc::new(HttpZoneRepository::new(&cfg.zone_api_url, Duration::from_secs(15))?);

    // No device capability exists on this platform; embedders that have
    // one construct the service with their own locator
    let device_locator: Option<Arc<dyn DeviceLocator>> = None;

    let default_coordinates = Coordinates::new(cfg.default_lat, cfg.default_lng)
        .unwrap_or(ResolverConfig::default().default_coordinates);

    // 2. Create the application service
    let service = ZoneService::new(
        store.clone() as Arc<dyn KeyValueStore>,
        store as Arc<dyn CookieJar>,
        ip_locators,
        device_locator,
        zone_repo as Arc<dyn ZoneRepository>,
        ResolverConfig {
            provider_timeout,
            device_timeout: Duration::from_millis(cfg.device_timeout_ms),
            default_coordinates,
            zone_cookie_ttl: Duration::from_secs(cfg.cookie_ttl_days * 24 * 60 * 60),
        },
    );

    // 3. Run the acquisition chain and report the outcome
    service.initialize().await;

    let snapshot = service.snapshot();
    match &snapshot.zone {
        Some(zone) => tracing::info!(
            "zone resolved: {} ({}) active={}",
            zone.name,
            zone.id,
            zone.is_active
        ),
        None => match &snapshot.error {
            Some(e) => tracing::warn!("zone not resolved: {}", e),
            None => tracing::info!("no zone covers the adopted location"),
        },
    }

    Ok(())
}
