mod zone_service;

pub use zone_service::{ResolverConfig, ResolverError, ZoneService};
