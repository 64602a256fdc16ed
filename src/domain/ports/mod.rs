mod cookie_jar;
mod device_locator;
mod ip_locator;
mod key_value_store;
mod zone_repository;

pub use cookie_jar::CookieJar;
pub use device_locator::{DeviceLocator, PositionRequest};
pub use ip_locator::{IpLocator, LocateError};
pub use key_value_store::KeyValueStore;
pub use zone_repository::{ZoneLookupError, ZoneRepository};
