mod http_zone_repository;
mod ipapi_locator;
mod ipwhois_locator;
mod memory_cookie_jar;
mod memory_key_value_store;
mod sqlite_store;

pub use http_zone_repository::HttpZoneRepository;
pub use ipapi_locator::IpApiLocator;
pub use ipwhois_locator::IpWhoIsLocator;
pub use memory_cookie_jar::DashMapCookieJar;
pub use memory_key_value_store::DashMapKeyValueStore;
pub use sqlite_store::SqliteStore;
