//! Road routing abstraction
//!
//! Uses OSRM for production, mock for tests.

mod osrm;

pub use osrm::{OsrmConfig, OsrmRouter};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::services::geo;
use crate::types::{Coordinates, RouteData, RouteLeg};

/// Routing service trait for abstraction (OSRM, mock, etc.)
#[async_trait]
pub trait Router: Send + Sync {
    /// Route through the waypoints in order.
    /// Returns None when the engine finds no route.
    async fn route(&self, waypoints: &[Coordinates]) -> Result<Option<RouteData>>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Mock routing service for tests.
/// Haversine distance × road coefficient at a fixed average speed,
/// with a densified straight-line geometry between waypoints.
pub struct MockRouter {
    /// Straight-line to road distance coefficient
    road_coefficient: f64,
    /// Average speed in mph for duration estimation
    average_speed_mph: f64,
}

/// Interpolated geometry points per leg
const MOCK_POINTS_PER_LEG: usize = 24;

impl Default for MockRouter {
    fn default() -> Self {
        Self {
            road_coefficient: 1.2,
            average_speed_mph: 55.0,
        }
    }
}

impl MockRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(road_coefficient: f64, average_speed_mph: f64) -> Self {
        Self {
            road_coefficient,
            average_speed_mph,
        }
    }
}

#[async_trait]
impl Router for MockRouter {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<Option<RouteData>> {
        if waypoints.len() < 2 {
            return Ok(None);
        }

        let mut legs = Vec::with_capacity(waypoints.len() - 1);
        let mut geometry = Vec::new();

        for pair in waypoints.windows(2) {
            let from = [pair[0].lat, pair[0].lng];
            let to = [pair[1].lat, pair[1].lng];

            let distance_miles = geo::haversine_miles(from, to) * self.road_coefficient;
            legs.push(RouteLeg {
                distance_miles,
                duration_hours: distance_miles / self.average_speed_mph,
            });

            for step in 0..MOCK_POINTS_PER_LEG {
                let t = step as f64 / MOCK_POINTS_PER_LEG as f64;
                geometry.push([from[0] + t * (to[0] - from[0]), from[1] + t * (to[1] - from[1])]);
            }
        }
        if let Some(last) = waypoints.last() {
            geometry.push([last.lat, last.lng]);
        }

        let total_distance_miles: f64 = legs.iter().map(|l| l.distance_miles).sum();
        let total_duration_hours: f64 = legs.iter().map(|l| l.duration_hours).sum();

        Ok(Some(RouteData {
            total_distance_miles,
            total_duration_hours,
            geometry,
            legs,
        }))
    }

    fn name(&self) -> &str {
        "MockRouting"
    }
}

/// Create a router from configuration
pub fn create_router(config: &Config) -> Arc<dyn Router> {
    match config.router_backend.as_str() {
        "mock" => {
            tracing::info!("Using MockRouter");
            Arc::new(MockRouter::new())
        }
        "osrm" => {
            tracing::info!("Using OsrmRouter at {}", config.osrm_url);
            Arc::new(OsrmRouter::new(OsrmConfig::new(&config.osrm_url)))
        }
        other => {
            tracing::warn!("Unknown ROUTER_BACKEND '{}', using mock", other);
            Arc::new(MockRouter::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dallas() -> Coordinates {
        Coordinates { lat: 32.7767, lng: -96.7970 }
    }

    fn oklahoma_city() -> Coordinates {
        Coordinates { lat: 35.4676, lng: -97.5164 }
    }

    fn wichita() -> Coordinates {
        Coordinates { lat: 37.6872, lng: -97.3301 }
    }

    #[tokio::test]
    async fn mock_router_rejects_single_waypoint() {
        let router = MockRouter::new();
        let route = router.route(&[dallas()]).await.unwrap();
        assert!(route.is_none());
    }

    #[tokio::test]
    async fn mock_router_builds_one_leg_per_waypoint_pair() {
        let router = MockRouter::new();
        let route = router
            .route(&[dallas(), oklahoma_city(), wichita()])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(route.legs.len(), 2);

        // Dallas to Oklahoma City is ~190 mi straight line, ~230 mi road
        let leg = &route.legs[0];
        assert!(
            leg.distance_miles > 200.0 && leg.distance_miles < 270.0,
            "got {} mi",
            leg.distance_miles
        );
        assert!((leg.duration_hours - leg.distance_miles / 55.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mock_router_geometry_spans_the_waypoints() {
        let router = MockRouter::new();
        let route = router
            .route(&[dallas(), oklahoma_city(), wichita()])
            .await
            .unwrap()
            .unwrap();

        assert!(route.geometry.len() > 10);

        let first = route.geometry[0];
        assert!((first[0] - 32.7767).abs() < 1e-9);

        let last = route.geometry[route.geometry.len() - 1];
        assert!((last[0] - 37.6872).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mock_router_totals_are_leg_sums() {
        let router = MockRouter::new();
        let route = router
            .route(&[dallas(), oklahoma_city(), wichita()])
            .await
            .unwrap()
            .unwrap();

        let leg_sum: f64 = route.legs.iter().map(|l| l.distance_miles).sum();
        assert!((route.total_distance_miles - leg_sum).abs() < 1e-9);
    }

    #[tokio::test]
    async fn mock_router_custom_params() {
        let router = MockRouter::with_params(1.5, 60.0);
        let route = router
            .route(&[dallas(), oklahoma_city()])
            .await
            .unwrap()
            .unwrap();

        // Higher coefficient stretches the distance
        assert!(route.legs[0].distance_miles > 270.0);
    }

    #[test]
    fn router_names() {
        assert_eq!(MockRouter::new().name(), "MockRouting");
    }
}
