use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Zone lookup backend
    pub zone_api_url: String,

    // IP geolocation providers, tried in order
    pub ip_primary_url: String,
    pub ip_secondary_url: String,
    pub provider_timeout_ms: u64,

    // Precise location settings
    pub device_timeout_ms: u64,

    // Fallback location when every acquisition strategy fails
    pub default_lat: f64,
    pub default_lng: f64,

    // Durable storage
    pub store_path: String,
    pub cookie_ttl_days: u64,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone_api_url: "http://127.0.0.1:8000/api/v1".to_string(),
            ip_primary_url: "https://ipapi.co/json/".to_string(),
            ip_secondary_url: "https://ipwho.is/".to_string(),
            provider_timeout_ms: 5000,
            device_timeout_ms: 10_000,
            default_lat: 23.8103,
            default_lng: 90.4125,
            store_path: "zones.db".to_string(),
            cookie_ttl_days: 7,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let zone_api_url = std::env::var("ZONE_RESOLVER_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/api/v1".to_string());

    let ip_primary_url = std::env::var("ZONE_RESOLVER_IP_PRIMARY_URL")
        .unwrap_or_else(|_| "https://ipapi.co/json/".to_string());

    let ip_secondary_url = std::env::var("ZONE_RESOLVER_IP_SECONDARY_URL")
        .unwrap_or_else(|_| "https://ipwho.is/".to_string());

    let provider_timeout_ms = std::env::var("ZONE_RESOLVER_PROVIDER_TIMEOUT_MS")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    let device_timeout_ms = std::env::var("ZONE_RESOLVER_DEVICE_TIMEOUT_MS")
        .unwrap_or_else(|_| "10000".to_string())
        .parse()
        .unwrap_or(10_000);

    let default_lat = std::env::var("ZONE_RESOLVER_DEFAULT_LAT")
        .unwrap_or_else(|_| "23.8103".to_string())
        .parse()
        .unwrap_or(23.8103);

    let default_lng = std::env::var("ZONE_RESOLVER_DEFAULT_LNG")
        .unwrap_or_else(|_| "90.4125".to_string())
        .parse()
        .unwrap_or(90.4125);

    let store_path = std::env::var("ZONE_RESOLVER_STORE_PATH")
        .unwrap_or_else(|_| "zones.db".to_string());

    let cookie_ttl_days = std::env::var("ZONE_RESOLVER_COOKIE_TTL_DAYS")
        .unwrap_or_else(|_| "7".to_string())
        .parse()
        .unwrap_or(7);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        zone_api_url,
        ip_primary_url,
        ip_secondary_url,
        provider_timeout_ms,
        device_timeout_ms,
        default_lat,
        default_lng,
        store_path,
        cookie_ttl_days,
        debug,
    })
}
