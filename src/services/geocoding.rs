//! Geocoding abstraction layer
//!
//! This module provides geocoding implementations:
//! - MockGeocoder for tests (deterministic, no network)
//! - NominatimGeocoder for production
//!
//! Configuration via the GEOCODER_BACKEND setting:
//! - "mock" → MockGeocoder (tests, development)
//! - "nominatim" → NominatimGeocoder (default)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::services::nominatim::NominatimClient;
use crate::types::{Coordinates, GeocodedLocation};

/// Geocoder trait - abstraction for all geocoding implementations
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode a free-text address to coordinates.
    /// Returns None if the address cannot be geocoded.
    async fn forward(&self, address: &str) -> Result<Option<GeocodedLocation>>;

    /// Name a coordinate at city level, preferring "City, ST".
    /// Returns None if nothing is known about the point.
    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>>;

    /// Get the name of this geocoder implementation
    fn name(&self) -> &'static str;
}

// ==========================================================================
// MockGeocoder Implementation
// ==========================================================================

/// Reverse labels handed out by the mock, keyed by coordinate hash
const MOCK_PLACES: &[&str] = &[
    "Amarillo, TX",
    "Tucumcari, NM",
    "Oklahoma City, OK",
    "Flagstaff, AZ",
    "Little Rock, AR",
    "Abilene, TX",
];

/// Mock geocoder for testing - returns deterministic fake coordinates
pub struct MockGeocoder;

impl MockGeocoder {
    pub fn new() -> Self {
        Self
    }

    /// Generate deterministic coordinates from the address hash.
    /// Coordinates land inside the continental US, away from the coasts.
    fn hash_to_coordinates(address: &str) -> Coordinates {
        let hash = fnv1a(address.as_bytes());

        // Interior US bounds: lat 33-45, lng -115..-85
        const LAT_MIN: f64 = 33.0;
        const LAT_MAX: f64 = 45.0;
        const LNG_MIN: f64 = -115.0;
        const LNG_MAX: f64 = -85.0;

        let lat_normalized = ((hash >> 32) as f64) / (u32::MAX as f64);
        let lng_normalized = ((hash & 0xFFFF_FFFF) as f64) / (u32::MAX as f64);

        Coordinates {
            lat: LAT_MIN + lat_normalized * (LAT_MAX - LAT_MIN),
            lng: LNG_MIN + lng_normalized * (LNG_MAX - LNG_MIN),
        }
    }
}

impl Default for MockGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn forward(&self, address: &str) -> Result<Option<GeocodedLocation>> {
        Ok(Some(GeocodedLocation {
            coordinates: Self::hash_to_coordinates(address),
            display_name: format!("{}, United States", address),
        }))
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let key = format!("{:.1},{:.1}", lat, lng);
        let index = (fnv1a(key.as_bytes()) as usize) % MOCK_PLACES.len();
        Ok(Some(MOCK_PLACES[index].to_string()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// FNV-1a; stable across runs, unlike `DefaultHasher`'s random seed
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// ==========================================================================
// NominatimGeocoder Implementation
// ==========================================================================

/// Nominatim-backed geocoder.
///
/// Request pacing (≥ 1 s between requests) lives in the wrapped client.
pub struct NominatimGeocoder {
    client: NominatimClient,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: NominatimClient::new(base_url),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn forward(&self, address: &str) -> Result<Option<GeocodedLocation>> {
        self.client.search(address).await
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        self.client.reverse(lat, lng).await
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

// ==========================================================================
// Factory function
// ==========================================================================

/// Create a geocoder from configuration
pub fn create_geocoder(config: &Config) -> Arc<dyn Geocoder> {
    match config.geocoder_backend.as_str() {
        "mock" => {
            tracing::info!("Using MockGeocoder");
            Arc::new(MockGeocoder::new())
        }
        "nominatim" => {
            tracing::info!("Using NominatimGeocoder at {}", config.nominatim_url);
            Arc::new(NominatimGeocoder::new(&config.nominatim_url))
        }
        other => {
            tracing::warn!("Unknown GEOCODER_BACKEND '{}', using mock", other);
            Arc::new(MockGeocoder::new())
        }
    }
}
