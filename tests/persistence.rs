//! Integration tests for cross-session persistence
//!
//! Runs the service over the SQLite store to verify that coordinates,
//! the zone snapshot, and the zone cookie survive a restart and that the
//! warm path skips geolocation entirely.

use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zone_resolver::adapters::outbound::{HttpZoneRepository, IpApiLocator, SqliteStore};
use zone_resolver::{
    CookieJar, IpLocator, KeyValueStore, LocationSource, ResolverConfig, ZoneService,
};

fn test_config() -> ResolverConfig {
    ResolverConfig {
        provider_timeout: Duration::from_millis(500),
        ..Default::default()
    }
}

fn build_service(
    store: Arc<SqliteStore>,
    ip_server: &MockServer,
    zone_server: &MockServer,
) -> ZoneService {
    let locators: Vec<Arc<dyn IpLocator>> = vec![Arc::new(
        IpApiLocator::new(&ip_server.uri(), Duration::from_millis(400)).unwrap(),
    )];
    let zone_repo = Arc::new(
        HttpZoneRepository::new(&zone_server.uri(), Duration::from_secs(2)).unwrap(),
    );

    ZoneService::new(
        store.clone(),
        store,
        locators,
        None,
        zone_repo,
        test_config(),
    )
}

fn zone_body() -> serde_json::Value {
    serde_json::json!({
        "id": "gulshan",
        "name": "Gulshan",
        "is_active": true
    })
}

#[tokio::test]
async fn test_second_session_reuses_persisted_location() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("zones.db");
    let db_path = db_path.to_str().unwrap();

    let zone_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/lookup"))
        .and(query_param("lat", "23.7925"))
        .and(query_param("lng", "90.4078"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(2)
        .mount(&zone_server)
        .await;

    // Session 1: cold start through the IP provider
    {
        let ip_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 23.7925,
                "longitude": 90.4078
            })))
            .expect(1)
            .mount(&ip_server)
            .await;

        let store = Arc::new(SqliteStore::open(db_path).unwrap());
        let service = build_service(store, &ip_server, &zone_server);
        service.initialize().await;

        assert_eq!(service.snapshot().zone.unwrap().id, "gulshan");
    }

    // Session 2: warm start over the same file, provider must stay idle
    let ip_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 0.0,
            "longitude": 0.0
        })))
        .expect(0)
        .mount(&ip_server)
        .await;

    let store = Arc::new(SqliteStore::open(db_path).unwrap());
    let service = build_service(store.clone(), &ip_server, &zone_server);
    service.initialize().await;

    let snap = service.snapshot();
    assert_eq!(snap.coordinates.unwrap().lat, 23.7925);
    assert_eq!(snap.source, Some(LocationSource::Ip));
    assert_eq!(snap.zone.unwrap().id, "gulshan");

    // The cookie written in session 1 is still readable
    assert_eq!(CookieJar::get(&*store, "zone_id").await.unwrap(), "gulshan");
}

#[tokio::test]
async fn test_corrupted_persisted_coordinates_fall_back_to_provider() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("zones.db");
    let db_path = db_path.to_str().unwrap();

    // Corrupt leftovers from a previous run
    {
        let store = SqliteStore::open(db_path).unwrap();
        KeyValueStore::set(&store, "bazar:lat", "not-a-number").await;
        KeyValueStore::set(&store, "bazar:lng", "90.41").await;
    }

    let ip_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 23.75,
            "longitude": 90.39
        })))
        .expect(1)
        .mount(&ip_server)
        .await;

    let zone_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/zones/lookup"))
        .and(query_param("lat", "23.75"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .expect(1)
        .mount(&zone_server)
        .await;

    let store = Arc::new(SqliteStore::open(db_path).unwrap());
    let service = build_service(store.clone(), &ip_server, &zone_server);
    service.initialize().await;

    let snap = service.snapshot();
    assert_eq!(snap.source, Some(LocationSource::Ip));
    assert_eq!(snap.coordinates.unwrap().lat, 23.75);

    // The corrupt values were replaced by the fresh acquisition
    assert_eq!(
        KeyValueStore::get(&*store, "bazar:lat").await.unwrap(),
        "23.75"
    );
}
