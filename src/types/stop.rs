//! Planned stop types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Kind of planned stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Start,
    Pickup,
    Dropoff,
    End,
    Break,
    Rest,
    PreTrip,
    Fuel,
}

/// ELD duty status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    Sleeper,
    Driving,
    OnDuty,
}

/// Effect a stop has on the driver's HOS counters.
///
/// Kept as plain data so the planner applies every stop the same way;
/// the table lives in [`StopKind::effect`].
#[derive(Debug, Clone, Copy)]
pub struct StopEffect {
    /// Stop time counts toward the 14-hour window and the 70-hour cycle
    pub accrues_on_duty: bool,
    /// Resets the 8-hour break counter
    pub resets_break: bool,
    /// Resets the daily driving and on-duty counters
    pub resets_daily: bool,
}

impl StopKind {
    /// Duty status recorded for this stop on the log grid
    pub fn duty_status(self) -> DutyStatus {
        match self {
            StopKind::Break | StopKind::Rest => DutyStatus::OffDuty,
            _ => DutyStatus::OnDuty,
        }
    }

    /// Counter effects applied when the stop is served
    pub fn effect(self) -> StopEffect {
        match self {
            StopKind::Break => StopEffect {
                accrues_on_duty: false,
                resets_break: true,
                resets_daily: false,
            },
            StopKind::Rest => StopEffect {
                accrues_on_duty: false,
                resets_break: true,
                resets_daily: true,
            },
            StopKind::Start
            | StopKind::Pickup
            | StopKind::Dropoff
            | StopKind::End
            | StopKind::PreTrip
            | StopKind::Fuel => StopEffect {
                accrues_on_duty: true,
                resets_break: false,
                resets_daily: false,
            },
        }
    }

    /// Wire name of the stop kind
    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::Start => "start",
            StopKind::Pickup => "pickup",
            StopKind::Dropoff => "dropoff",
            StopKind::End => "end",
            StopKind::Break => "break",
            StopKind::Rest => "rest",
            StopKind::PreTrip => "pre_trip",
            StopKind::Fuel => "fuel",
        }
    }
}

/// A planned stop on the trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    /// 1-based sequence number
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: StopKind,
    pub location: String,
    pub coordinates: Coordinates,
    pub arrival_time: NaiveDateTime,
    pub departure_time: NaiveDateTime,
    pub duration_minutes: u32,
    /// Trip odometer at arrival, rounded to 0.1 mi
    pub cumulative_miles: f64,
    /// Driving-today counter at arrival
    pub cumulative_driving_hours: f64,
    /// 1-based calendar day relative to the first stop's arrival date
    pub day: u32,
    pub duty_status: DutyStatus,
    pub notes: String,
}
