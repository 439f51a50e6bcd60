//! Business logic services

pub mod geo;
pub mod geocoding;
pub mod hos;
pub mod location;
pub mod logbook;
pub mod nominatim;
pub mod routing;
pub mod trip;
