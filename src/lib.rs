//! Zone Resolver Library
//!
//! This module exposes the zone resolver components for use in
//! integration tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use application::{ResolverConfig, ResolverError, ZoneService};
pub use config::load_config;
pub use domain::entities::{Coordinates, ResolverSnapshot, Zone};
pub use domain::ports::{
    CookieJar, DeviceLocator, IpLocator, KeyValueStore, PositionRequest, ZoneRepository,
};
pub use domain::services::StepFlow;
pub use domain::value_objects::LocationSource;
