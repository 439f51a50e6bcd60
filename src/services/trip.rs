//! Trip planning orchestration.
//!
//! Sequences the external geocoder and router, runs the HOS planner and
//! log generator, and assembles the response. Every external failure
//! terminates the request; no retries and no partial results.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::warn;

use crate::services::geocoding::Geocoder;
use crate::services::hos::{PlaceLookup, TripPlanner};
use crate::services::logbook;
use crate::services::routing::Router;
use crate::types::{GeocodedLocation, TripRequest, TripResponse};

/// Errors that terminate a planning request
#[derive(Debug, Error)]
pub enum PlanError {
    /// A forward geocode returned no result
    #[error("Could not find location: {0}")]
    LocationNotFound(String),

    /// The router returned no usable route
    #[error("Could not calculate route between locations")]
    RouteUnavailable,

    /// Transport failure talking to the geocoder or router
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Adapts the geocoder's reverse lookup to the planner's seam.
/// Failures collapse to None; the stop gets the fallback label.
struct ReversePlaces<'a> {
    geocoder: &'a dyn Geocoder,
}

#[async_trait]
impl PlaceLookup for ReversePlaces<'_> {
    async fn place_name(&self, lat: f64, lng: f64) -> Option<String> {
        match self.geocoder.reverse(lat, lng).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Reverse geocoding failed: {e:#}");
                None
            }
        }
    }
}

/// Trip planning service
pub struct TripService {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn Router>,
}

impl TripService {
    pub fn new(geocoder: Arc<dyn Geocoder>, router: Arc<dyn Router>) -> Self {
        Self { geocoder, router }
    }

    /// Plan a trip starting 06:00 local on the day of the request
    pub async fn plan(&self, request: &TripRequest) -> Result<TripResponse, PlanError> {
        self.plan_from(request, default_start_time()).await
    }

    /// Plan a trip with an explicit start time (tests pin this)
    pub async fn plan_from(
        &self,
        request: &TripRequest,
        start_time: NaiveDateTime,
    ) -> Result<TripResponse, PlanError> {
        let current = self.geocode(&request.current_location).await?;
        let pickup = self.geocode(&request.pickup_location).await?;
        let dropoff = self.geocode(&request.dropoff_location).await?;

        let waypoints = [current.coordinates, pickup.coordinates, dropoff.coordinates];
        let route = self
            .router
            .route(&waypoints)
            .await?
            .ok_or(PlanError::RouteUnavailable)?;

        if route.legs.len() < 2 || route.geometry.len() < 2 {
            return Err(PlanError::RouteUnavailable);
        }

        let mut planner = TripPlanner::new(start_time, request.current_cycle_hours);
        let lookup = ReversePlaces {
            geocoder: self.geocoder.as_ref(),
        };
        let stops = planner
            .calculate_trip(&route, &current, &pickup, &dropoff, &lookup)
            .await;

        let log_sheets = logbook::build_log_sheets(&stops);
        let summary = planner.summary(route.total_distance_miles);

        Ok(TripResponse {
            route_geometry: route.geometry,
            stops,
            log_sheets,
            summary,
        })
    }

    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, PlanError> {
        self.geocoder
            .forward(address)
            .await?
            .ok_or_else(|| PlanError::LocationNotFound(address.to_string()))
    }
}

/// 06:00 local on the current day
fn default_start_time() -> NaiveDateTime {
    Local::now()
        .date_naive()
        .and_hms_opt(6, 0, 0)
        .expect("valid time")
}

// ===========================================================================
// Tests
// ===========================================================================
