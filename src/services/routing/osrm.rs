//! OSRM routing client
//!
//! OSRM API documentation:
//! https://project-osrm.org/docs/v5.24.0/api/

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::Router;
use crate::types::{Coordinates, RouteData, RouteLeg};

const METERS_PER_MILE: f64 = 1609.34;

/// OSRM client configuration
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server (e.g. "https://router.project-osrm.org")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl OsrmConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// OSRM routing client
pub struct OsrmRouter {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRouter {
    pub fn new(config: OsrmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the route URL. OSRM takes `lng,lat` pairs separated by `;`.
    fn route_url(&self, waypoints: &[Coordinates]) -> String {
        let coords = waypoints
            .iter()
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/driving/{}?overview=full&geometries=polyline",
            self.config.base_url.trim_end_matches('/'),
            coords
        )
    }
}

#[async_trait]
impl Router for OsrmRouter {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<Option<RouteData>> {
        if waypoints.len() < 2 {
            return Ok(None);
        }

        let url = self.route_url(waypoints);
        debug!("Requesting route from OSRM for {} waypoints", waypoints.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send route request to OSRM")?;

        if !response.status().is_success() {
            warn!("OSRM returned status {}", response.status());
            return Ok(None);
        }

        let body: OsrmResponse = response
            .json()
            .await
            .context("Failed to parse OSRM response")?;

        if body.code != "Ok" {
            warn!("OSRM error: {}", body.message.unwrap_or_else(|| body.code.clone()));
            return Ok(None);
        }

        let Some(route) = body.routes.into_iter().next() else {
            return Ok(None);
        };

        // OSRM's full-overview geometry is a precision-5 encoded polyline
        let geometry = decode_polyline(&route.geometry, 5)?;
        debug!("Received route geometry with {} points", geometry.len());

        let legs = route
            .legs
            .iter()
            .map(|leg| RouteLeg {
                distance_miles: leg.distance / METERS_PER_MILE,
                duration_hours: leg.duration / 3600.0,
            })
            .collect();

        Ok(Some(RouteData {
            total_distance_miles: route.distance / METERS_PER_MILE,
            total_duration_hours: route.duration / 3600.0,
            geometry,
            legs,
        }))
    }

    fn name(&self) -> &str {
        "OSRM"
    }
}

// OSRM API types

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Total distance in meters
    distance: f64,
    /// Total duration in seconds
    duration: f64,
    /// Encoded polyline over all legs
    geometry: String,
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    distance: f64,
    duration: f64,
}

/// Decode an encoded polyline into `[lat, lng]` pairs.
/// Precision is 5 decimal places for OSRM's polyline format.
fn decode_polyline(encoded: &str, precision: u32) -> Result<Vec<[f64; 2]>> {
    let factor = 10_f64.powi(precision as i32);
    let mut coordinates = Vec::new();
    let mut lat = 0i64;
    let mut lng = 0i64;

    let bytes = encoded.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        // Decode latitude
        let mut shift = 0;
        let mut result = 0i64;
        loop {
            if i >= bytes.len() {
                anyhow::bail!("Invalid polyline encoding");
            }
            let byte = bytes[i] as i64 - 63;
            i += 1;
            result |= (byte & 0x1f) << shift;
            shift += 5;
            if byte < 0x20 {
                break;
            }
        }
        let dlat = if result & 1 != 0 { !(result >> 1) } else { result >> 1 };
        lat += dlat;

        // Decode longitude
        shift = 0;
        result = 0;
        loop {
            if i >= bytes.len() {
                anyhow::bail!("Invalid polyline encoding");
            }
            let byte = bytes[i] as i64 - 63;
            i += 1;
            result |= (byte & 0x1f) << shift;
            shift += 5;
            if byte < 0x20 {
                break;
            }
        }
        let dlng = if result & 1 != 0 { !(result >> 1) } else { result >> 1 };
        lng += dlng;

        coordinates.push([lat as f64 / factor, lng as f64 / factor]);
    }

    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osrm_config_default() {
        let config = OsrmConfig::default();
        assert_eq!(config.base_url, "https://router.project-osrm.org");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn route_url_uses_lng_lat_order() {
        let router = OsrmRouter::new(OsrmConfig::default());
        let url = router.route_url(&[
            Coordinates { lat: 32.7767, lng: -96.797 },
            Coordinates { lat: 35.4676, lng: -97.5164 },
        ]);

        assert!(url.contains("/route/v1/driving/-96.797,32.7767;-97.5164,35.4676?"));
        assert!(url.contains("overview=full"));
        assert!(url.contains("geometries=polyline"));
    }

    #[test]
    fn decode_polyline_reference_vector() {
        // Canonical example from the polyline format documentation
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();

        assert_eq!(points.len(), 3);
        assert!((points[0][0] - 38.5).abs() < 1e-5);
        assert!((points[0][1] + 120.2).abs() < 1e-5);
        assert!((points[1][0] - 40.7).abs() < 1e-5);
        assert!((points[2][0] - 43.252).abs() < 1e-5);
        assert!((points[2][1] + 126.453).abs() < 1e-5);
    }

    #[test]
    fn decode_polyline_rejects_truncated_input() {
        assert!(decode_polyline("_p~iF", 5).is_err());
    }

    #[test]
    fn osrm_error_response_parses() {
        let body = r#"{"code":"NoRoute","message":"Impossible route between points"}"#;
        let response: OsrmResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.code, "NoRoute");
        assert!(response.routes.is_empty());
    }

    #[tokio::test]
    #[ignore = "Requires network access to the public OSRM instance"]
    async fn osrm_route_dallas_oklahoma_city() {
        let router = OsrmRouter::new(OsrmConfig::default());

        let route = router
            .route(&[
                Coordinates { lat: 32.7767, lng: -96.797 },
                Coordinates { lat: 35.4676, lng: -97.5164 },
            ])
            .await
            .unwrap()
            .unwrap();

        // Dallas to Oklahoma City is ~210 road miles
        assert!(route.total_distance_miles > 180.0 && route.total_distance_miles < 240.0);
        assert_eq!(route.legs.len(), 1);
        assert!(route.geometry.len() > 50);
    }
}
