//! Trip planning endpoint

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::error;

use super::AppState;
use crate::services::trip::PlanError;
use crate::types::{TripRequest, TripResponse};

/// Error body for 4xx/5xx responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// `POST /plan` — plan an HOS-compliant trip.
///
/// Returns 200 with the trip response, 400 on invalid input or when a
/// location/route cannot be resolved, 500 on upstream failure.
pub async fn plan_trip(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    validate(&request).map_err(bad_request)?;

    match state.trips.plan(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ (PlanError::LocationNotFound(_) | PlanError::RouteUnavailable)) => {
            Err(bad_request(e.to_string()))
        }
        Err(PlanError::Upstream(e)) => {
            error!("Trip planning failed: {e:#}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "An error occurred while planning the trip".to_string(),
                }),
            ))
        }
    }
}

/// Field-level input validation
fn validate(request: &TripRequest) -> Result<(), String> {
    for (field, value) in [
        ("current_location", &request.current_location),
        ("pickup_location", &request.pickup_location),
        ("dropoff_location", &request.dropoff_location),
    ] {
        if value.is_empty() {
            return Err(format!("{field} must not be empty"));
        }
        if value.chars().count() > 500 {
            return Err(format!("{field} must be at most 500 characters"));
        }
    }

    if !request.current_cycle_hours.is_finite()
        || !(0.0..=70.0).contains(&request.current_cycle_hours)
    {
        return Err("current_cycle_hours must be between 0 and 70".to_string());
    }

    Ok(())
}
