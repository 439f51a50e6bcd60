//! Trip planning request/response types

use serde::{Deserialize, Serialize};

use super::{LogSheet, Stop};

/// Coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A geocoded place: coordinates plus the geocoder's display string
#[derive(Debug, Clone)]
pub struct GeocodedLocation {
    pub coordinates: Coordinates,
    pub display_name: String,
}

/// One leg of a routed trip
#[derive(Debug, Clone)]
pub struct RouteLeg {
    pub distance_miles: f64,
    pub duration_hours: f64,
}

/// A road route as returned by the routing engine.
///
/// Geometry points are `[lat, lng]`. Leg distances are authoritative for
/// timing; the geometry is only used to place stops along the road.
#[derive(Debug, Clone)]
pub struct RouteData {
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
    pub geometry: Vec<[f64; 2]>,
    pub legs: Vec<RouteLeg>,
}

/// Trip planning input
#[derive(Debug, Clone, Deserialize)]
pub struct TripRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the 70-hour/8-day cycle
    pub current_cycle_hours: f64,
}

/// Trip summary statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
    pub total_days: u32,
    pub fuel_stops: usize,
    pub rest_breaks: usize,
    pub rest_stops: usize,
    pub cycle_hours_after: f64,
}

/// Complete trip planning response
#[derive(Debug, Clone, Serialize)]
pub struct TripResponse {
    /// Full route polyline as `[lat, lng]` pairs
    pub route_geometry: Vec<[f64; 2]>,
    pub stops: Vec<Stop>,
    pub log_sheets: Vec<LogSheet>,
    pub summary: TripSummary,
}
