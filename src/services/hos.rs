//! HOS (Hours of Service) trip planner.
//!
//! Implements the FMCSA limits for property-carrying drivers:
//! - 11-hour daily driving limit (after 10 consecutive hours off)
//! - 14-hour on-duty window
//! - 30-minute break after 8 cumulative driving hours
//! - 70-hour/8-day cycle limit
//! - 10-hour off-duty reset
//!
//! The planner walks each route leg in drivable chunks, stopping at the
//! earliest binding limit, and emits the stop list consumed by the log
//! generator. Given identical inputs it produces identical output; the
//! only external call is the injected place lookup for stop labels.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};

use crate::services::{geo, location};
use crate::types::{Coordinates, GeocodedLocation, RouteData, Stop, StopKind, TripSummary};

// HOS limits
pub const MAX_DRIVING_HOURS: f64 = 11.0;
pub const MAX_ON_DUTY_HOURS: f64 = 14.0;
pub const BREAK_REQUIRED_AFTER_HOURS: f64 = 8.0;
pub const MAX_CYCLE_HOURS: f64 = 70.0;
pub const REQUIRED_REST_HOURS: f64 = 10.0;
pub const REQUIRED_BREAK_MINUTES: u32 = 30;

// Trip assumptions
pub const AVERAGE_SPEED_MPH: f64 = 55.0;
pub const FUEL_INTERVAL_MILES: f64 = 1000.0;
pub const FUEL_STOP_MINUTES: u32 = 30;
pub const PICKUP_MINUTES: u32 = 60;
pub const DROPOFF_MINUTES: u32 = 60;
pub const PRE_TRIP_MINUTES: u32 = 30;
pub const POST_TRIP_MINUTES: u32 = 15;

/// Tolerance for comparisons against the running hour/mile counters
const EPSILON: f64 = 1e-9;

/// City-level place lookup for stops interpolated along the route.
///
/// Lookup failures are tolerated by the planner (the stop is labeled
/// "Unknown Location"), so implementations return Option, not Result.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn place_name(&self, lat: f64, lng: f64) -> Option<String>;
}

/// Mutable HOS counters advanced by the planner
#[derive(Debug, Clone)]
pub struct DriverState {
    /// Driving hours since the last 10-hour rest (11-hour limit)
    pub driving_hours_today: f64,
    /// On-duty hours since the last 10-hour rest (14-hour window)
    pub on_duty_hours_today: f64,
    /// Driving hours since the last 30-minute break or rest
    pub hours_since_last_break: f64,
    /// Rolling 8-day cycle hours; never reset within a trip
    pub cycle_hours_used: f64,
    pub current_time: NaiveDateTime,
    pub current_miles: f64,
}

/// HOS-compliant trip planner.
///
/// One instance plans one trip: seed it with the start time and prior
/// cycle hours, call [`calculate_trip`](Self::calculate_trip), then read
/// the summary.
pub struct TripPlanner {
    state: DriverState,
    stops: Vec<Stop>,
    next_id: u32,
}

impl TripPlanner {
    pub fn new(start_time: NaiveDateTime, current_cycle_hours: f64) -> Self {
        Self {
            state: DriverState {
                driving_hours_today: 0.0,
                on_duty_hours_today: 0.0,
                hours_since_last_break: 0.0,
                cycle_hours_used: current_cycle_hours,
                current_time: start_time,
                current_miles: 0.0,
            },
            stops: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Plan all stops for the trip.
    ///
    /// `route.legs` holds the current→pickup and pickup→dropoff legs in
    /// order; a missing leg is treated as zero miles.
    pub async fn calculate_trip(
        &mut self,
        route: &RouteData,
        current: &GeocodedLocation,
        pickup: &GeocodedLocation,
        dropoff: &GeocodedLocation,
        lookup: &dyn PlaceLookup,
    ) -> Vec<Stop> {
        self.stops.clear();
        self.next_id = 0;

        let pickup_leg = route.legs.first().map(|l| l.distance_miles).unwrap_or(0.0);
        let dropoff_leg = route.legs.get(1).map(|l| l.distance_miles).unwrap_or(0.0);

        self.add_stop(
            StopKind::Start,
            current.display_name.clone(),
            current.coordinates,
            PRE_TRIP_MINUTES,
            "Pre-trip inspection",
        );

        self.drive_leg(pickup_leg, &route.geometry, lookup).await;

        self.add_stop(
            StopKind::Pickup,
            pickup.display_name.clone(),
            pickup.coordinates,
            PICKUP_MINUTES,
            "Loading cargo",
        );

        self.drive_leg(dropoff_leg, &route.geometry, lookup).await;

        self.add_stop(
            StopKind::Dropoff,
            dropoff.display_name.clone(),
            dropoff.coordinates,
            DROPOFF_MINUTES,
            "Unloading cargo",
        );

        self.add_stop(
            StopKind::End,
            dropoff.display_name.clone(),
            dropoff.coordinates,
            POST_TRIP_MINUTES,
            "Post-trip inspection",
        );

        self.stops.clone()
    }

    /// Trip summary statistics
    pub fn summary(&self, total_distance_miles: f64) -> TripSummary {
        let count = |kind: StopKind| self.stops.iter().filter(|s| s.kind == kind).count();

        let (total_duration_hours, total_days) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => {
                let hours =
                    (last.departure_time - first.arrival_time).num_seconds() as f64 / 3600.0;
                (hours, last.day.max(1))
            }
            _ => (0.0, 0),
        };

        TripSummary {
            total_distance_miles: round1(total_distance_miles),
            total_duration_hours: round1(total_duration_hours),
            total_days,
            fuel_stops: count(StopKind::Fuel),
            rest_breaks: count(StopKind::Break),
            rest_stops: count(StopKind::Rest),
            cycle_hours_after: round1(self.state.cycle_hours_used),
        }
    }

    /// Drive one leg, inserting breaks, rests, and fuel stops where a
    /// limit binds before the leg ends.
    async fn drive_leg(&mut self, leg_miles: f64, geometry: &[[f64; 2]], lookup: &dyn PlaceLookup) {
        let mut remaining = leg_miles;

        while remaining > EPSILON {
            let until_break = self.miles_until_break();
            let until_rest = self.miles_until_rest();
            let until_fuel = self.miles_until_fuel();

            let drivable = remaining.min(until_break).min(until_rest).min(until_fuel);

            if drivable <= EPSILON {
                // A limit binds before any distance can be covered.
                // Rest resets the break counter too, so it is checked first.
                if self.state.driving_hours_today >= MAX_DRIVING_HOURS - EPSILON {
                    self.take_rest(geometry, lookup).await;
                } else if self.state.hours_since_last_break
                    >= BREAK_REQUIRED_AFTER_HOURS - EPSILON
                {
                    self.take_break(geometry, lookup).await;
                }
                continue;
            }

            self.advance_driving(drivable / AVERAGE_SPEED_MPH, drivable);
            remaining -= drivable;

            if remaining > EPSILON {
                // Tie-break order when several limits bind: rest > break > fuel.
                if self.state.driving_hours_today >= MAX_DRIVING_HOURS - EPSILON {
                    self.take_rest(geometry, lookup).await;
                } else if self.state.hours_since_last_break
                    >= BREAK_REQUIRED_AFTER_HOURS - EPSILON
                {
                    self.take_break(geometry, lookup).await;
                } else if drivable >= until_fuel - EPSILON {
                    // The fuel cadence cut this chunk short. Trigger on that
                    // signal; an exact-equality odometer check would almost
                    // never fire on floats.
                    self.take_fuel_stop(geometry, lookup).await;
                }
            }
        }
    }

    fn miles_until_break(&self) -> f64 {
        ((BREAK_REQUIRED_AFTER_HOURS - self.state.hours_since_last_break) * AVERAGE_SPEED_MPH)
            .max(0.0)
    }

    fn miles_until_rest(&self) -> f64 {
        ((MAX_DRIVING_HOURS - self.state.driving_hours_today) * AVERAGE_SPEED_MPH).max(0.0)
    }

    fn miles_until_fuel(&self) -> f64 {
        let until = FUEL_INTERVAL_MILES - self.state.current_miles.rem_euclid(FUEL_INTERVAL_MILES);
        // An odometer within float error of the cadence mark means the fuel
        // stop for this interval was already emitted; plan the next one a
        // full interval ahead instead of stalling on a zero-mile chunk.
        if until <= EPSILON {
            FUEL_INTERVAL_MILES
        } else {
            until
        }
    }

    /// Advance every counter for a driving chunk
    fn advance_driving(&mut self, hours: f64, miles: f64) {
        self.state.driving_hours_today += hours;
        self.state.on_duty_hours_today += hours;
        self.state.hours_since_last_break += hours;
        self.state.cycle_hours_used += hours;
        self.state.current_time += duration_from_hours(hours);
        self.state.current_miles += miles;
    }

    async fn take_break(&mut self, geometry: &[[f64; 2]], lookup: &dyn PlaceLookup) {
        let coordinates = self.coordinates_at_current_mile(geometry);
        let label = resolve_place(lookup, coordinates).await;

        self.add_stop(
            StopKind::Break,
            label,
            coordinates,
            REQUIRED_BREAK_MINUTES,
            "30-minute break (8 hours driving)",
        );
    }

    async fn take_rest(&mut self, geometry: &[[f64; 2]], lookup: &dyn PlaceLookup) {
        let coordinates = self.coordinates_at_current_mile(geometry);
        let label = resolve_place(lookup, coordinates).await;

        self.add_stop(
            StopKind::Rest,
            label.clone(),
            coordinates,
            (REQUIRED_REST_HOURS * 60.0) as u32,
            "10-hour rest (11-hour driving limit)",
        );

        // A fresh duty period starts with a new pre-trip inspection
        self.add_stop(
            StopKind::PreTrip,
            label,
            coordinates,
            PRE_TRIP_MINUTES,
            "Pre-trip inspection",
        );
    }

    async fn take_fuel_stop(&mut self, geometry: &[[f64; 2]], lookup: &dyn PlaceLookup) {
        let coordinates = self.coordinates_at_current_mile(geometry);
        let label = resolve_place(lookup, coordinates).await;

        self.add_stop(
            StopKind::Fuel,
            label,
            coordinates,
            FUEL_STOP_MINUTES,
            "Fuel stop (1,000 miles)",
        );
    }

    fn coordinates_at_current_mile(&self, geometry: &[[f64; 2]]) -> Coordinates {
        match geo::point_at_mile(geometry, self.state.current_miles) {
            Some([lat, lng]) => Coordinates { lat, lng },
            // Degenerate geometry; reuse the previous stop's position
            None => self
                .stops
                .last()
                .map(|s| s.coordinates)
                .unwrap_or(Coordinates { lat: 0.0, lng: 0.0 }),
        }
    }

    /// Record a stop and apply its counter effects
    fn add_stop(
        &mut self,
        kind: StopKind,
        location: String,
        coordinates: Coordinates,
        duration_minutes: u32,
        notes: &str,
    ) {
        self.next_id += 1;

        let arrival = self.state.current_time;
        let departure = arrival + Duration::minutes(i64::from(duration_minutes));

        // Day is relative to the first recorded stop; the first stop
        // compares against its own arrival date and lands on day 1.
        let trip_start_date = self
            .stops
            .first()
            .map(|s| s.arrival_time.date())
            .unwrap_or_else(|| arrival.date());
        let day = (arrival.date() - trip_start_date).num_days() + 1;

        self.stops.push(Stop {
            id: self.next_id,
            kind,
            location: location::format_location(&location),
            coordinates,
            arrival_time: arrival,
            departure_time: departure,
            duration_minutes,
            cumulative_miles: round1(self.state.current_miles),
            cumulative_driving_hours: round2(self.state.driving_hours_today),
            day: day as u32,
            duty_status: kind.duty_status(),
            notes: notes.to_string(),
        });

        let effect = kind.effect();
        if effect.resets_daily {
            self.state.driving_hours_today = 0.0;
            self.state.on_duty_hours_today = 0.0;
        }
        if effect.resets_break {
            self.state.hours_since_last_break = 0.0;
        }
        if effect.accrues_on_duty {
            let hours = f64::from(duration_minutes) / 60.0;
            self.state.on_duty_hours_today += hours;
            self.state.cycle_hours_used += hours;
        }

        self.state.current_time = departure;
    }
}

async fn resolve_place(lookup: &dyn PlaceLookup, coordinates: Coordinates) -> String {
    lookup
        .place_name(coordinates.lat, coordinates.lng)
        .await
        .unwrap_or_else(|| "Unknown Location".to_string())
}

fn duration_from_hours(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RouteLeg;
    use chrono::NaiveDate;

    /// Fake place lookup with a fixed label
    struct FixedPlaces;

    #[async_trait]
    impl PlaceLookup for FixedPlaces {
        async fn place_name(&self, _lat: f64, _lng: f64) -> Option<String> {
            Some("Wayside, TX".to_string())
        }
    }

    /// Fake place lookup that always fails
    struct NoPlaces;

    #[async_trait]
    impl PlaceLookup for NoPlaces {
        async fn place_name(&self, _lat: f64, _lng: f64) -> Option<String> {
            None
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    }

    /// Straight polyline north along a meridian; haversine length along it
    /// maps miles to latitude exactly, so interpolated stop positions are
    /// easy to predict.
    fn meridian_geometry(total_miles: f64) -> Vec<[f64; 2]> {
        let miles_per_degree = 3959.0_f64 * std::f64::consts::PI / 180.0;
        let points = 60;
        (0..=points)
            .map(|i| {
                let miles = total_miles * i as f64 / points as f64;
                [30.0 + miles / miles_per_degree, -97.0]
            })
            .collect()
    }

    fn test_route(pickup_leg: f64, dropoff_leg: f64) -> RouteData {
        let total = pickup_leg + dropoff_leg;
        RouteData {
            total_distance_miles: total,
            total_duration_hours: total / AVERAGE_SPEED_MPH,
            geometry: meridian_geometry(total),
            legs: vec![
                RouteLeg {
                    distance_miles: pickup_leg,
                    duration_hours: pickup_leg / AVERAGE_SPEED_MPH,
                },
                RouteLeg {
                    distance_miles: dropoff_leg,
                    duration_hours: dropoff_leg / AVERAGE_SPEED_MPH,
                },
            ],
        }
    }

    fn place(name: &str, lat: f64) -> GeocodedLocation {
        GeocodedLocation {
            coordinates: Coordinates { lat, lng: -97.0 },
            display_name: name.to_string(),
        }
    }

    async fn plan(pickup_leg: f64, dropoff_leg: f64, cycle_hours: f64) -> (Vec<Stop>, TripSummary) {
        let route = test_route(pickup_leg, dropoff_leg);
        let mut planner = TripPlanner::new(start(), cycle_hours);
        let stops = planner
            .calculate_trip(
                &route,
                &place("Dallas, TX", 30.0),
                &place("Oklahoma City, OK", 32.0),
                &place("Wichita, KS", 34.0),
                &FixedPlaces,
            )
            .await;
        let summary = planner.summary(route.total_distance_miles);
        (stops, summary)
    }

    fn kinds(stops: &[Stop]) -> Vec<StopKind> {
        stops.iter().map(|s| s.kind).collect()
    }

    // -----------------------------------------------------------------------
    // Short trip: skeleton only, one log day
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn short_trip_emits_skeleton_only() {
        let (stops, summary) = plan(150.0, 150.0, 0.0).await;

        assert_eq!(
            kinds(&stops),
            vec![StopKind::Start, StopKind::Pickup, StopKind::Dropoff, StopKind::End]
        );
        assert_eq!(summary.fuel_stops, 0);
        assert_eq!(summary.rest_breaks, 0);
        assert_eq!(summary.rest_stops, 0);
        assert_eq!(summary.total_days, 1);

        // 300 mi at 55 mph driving + 2:45 of on-duty stops
        let expected_hours = 300.0 / 55.0 + 2.75;
        assert!((summary.total_duration_hours - round1(expected_hours)).abs() < 0.11);
        assert!((summary.cycle_hours_after - round1(300.0 / 55.0 + 2.75)).abs() < 0.11);
    }

    #[tokio::test]
    async fn start_stop_is_a_pre_trip_inspection_at_six_am() {
        let (stops, _) = plan(150.0, 150.0, 0.0).await;

        let first = &stops[0];
        assert_eq!(first.kind, StopKind::Start);
        assert_eq!(first.arrival_time, start());
        assert_eq!(first.duration_minutes, PRE_TRIP_MINUTES);
        assert_eq!(first.notes, "Pre-trip inspection");
        assert_eq!(first.day, 1);
        assert_eq!(first.cumulative_miles, 0.0);
    }

    // -----------------------------------------------------------------------
    // Break trigger at 8 driving hours
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn break_inserted_when_driving_reaches_eight_hours() {
        // 495 mi = 9 h of driving; the break counter accumulates across
        // the pickup stop, so 8 h of driving lands at odometer 440.
        let (stops, summary) = plan(100.0, 395.0, 0.0).await;

        let breaks: Vec<&Stop> = stops.iter().filter(|s| s.kind == StopKind::Break).collect();
        assert_eq!(breaks.len(), 1);
        assert_eq!(summary.rest_breaks, 1);

        let brk = breaks[0];
        assert!((brk.cumulative_miles - 440.0).abs() < 0.1, "got {}", brk.cumulative_miles);
        assert_eq!(brk.duration_minutes, REQUIRED_BREAK_MINUTES);
        assert_eq!(brk.duty_status, crate::types::DutyStatus::OffDuty);
        assert!((brk.cumulative_driving_hours - 8.0).abs() < 0.01);
        assert_eq!(summary.rest_stops, 0);
    }

    // -----------------------------------------------------------------------
    // Rest trigger at 11 driving hours, followed by a pre-trip
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn rest_inserted_at_eleven_driving_hours() {
        let (stops, summary) = plan(100.0, 700.0, 0.0).await;

        assert_eq!(summary.rest_breaks, 1);
        assert_eq!(summary.rest_stops, 1);

        let rest_index = stops.iter().position(|s| s.kind == StopKind::Rest).unwrap();
        let rest = &stops[rest_index];
        assert!((rest.cumulative_miles - 605.0).abs() < 0.1, "got {}", rest.cumulative_miles);
        assert!((rest.cumulative_driving_hours - 11.0).abs() < 0.01);
        assert_eq!(rest.duration_minutes, 600);

        let pre_trip = &stops[rest_index + 1];
        assert_eq!(pre_trip.kind, StopKind::PreTrip);
        assert_eq!(pre_trip.coordinates, rest.coordinates);
        assert_eq!(pre_trip.duration_minutes, PRE_TRIP_MINUTES);
        assert_eq!(pre_trip.duty_status, crate::types::DutyStatus::OnDuty);
        assert_eq!(pre_trip.arrival_time, rest.departure_time);
        // Daily counters were reset by the rest
        assert_eq!(pre_trip.cumulative_driving_hours, 0.0);

        assert!(summary.total_days >= 2);
    }

    // -----------------------------------------------------------------------
    // Fuel cadence every 1000 miles
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn fuel_stops_every_thousand_miles() {
        let (stops, summary) = plan(400.0, 2000.0, 0.0).await;

        let fuel: Vec<&Stop> = stops.iter().filter(|s| s.kind == StopKind::Fuel).collect();
        assert_eq!(fuel.len(), 2);
        assert_eq!(summary.fuel_stops, 2);

        assert!((fuel[0].cumulative_miles - 1000.0).abs() < 0.1, "got {}", fuel[0].cumulative_miles);
        assert!((fuel[1].cumulative_miles - 2000.0).abs() < 0.1, "got {}", fuel[1].cumulative_miles);
        for stop in fuel {
            assert_eq!(stop.duration_minutes, FUEL_STOP_MINUTES);
            assert_eq!(stop.duty_status, crate::types::DutyStatus::OnDuty);
        }
    }

    // -----------------------------------------------------------------------
    // Cycle seed near the limit: planner still plans, summary reflects it
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn cycle_near_limit_is_reported_not_refused() {
        let (stops, summary) = plan(150.0, 150.0, 68.0).await;

        assert_eq!(stops.len(), 4);
        let added = 300.0 / 55.0 + 2.75;
        assert!((summary.cycle_hours_after - round1(68.0 + added)).abs() < 0.11);
        assert!(summary.cycle_hours_after > MAX_CYCLE_HOURS);
    }

    // -----------------------------------------------------------------------
    // Ordering and counter invariants over a spread of routes
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn invariants_hold_across_route_shapes() {
        for (leg1, leg2, cycle) in [
            (150.0, 150.0, 0.0),
            (100.0, 395.0, 0.0),
            (100.0, 700.0, 12.5),
            (400.0, 2000.0, 5.0),
            (30.0, 2470.0, 0.0),
            (880.0, 0.0, 68.0),
        ] {
            let (stops, summary) = plan(leg1, leg2, cycle).await;

            // Monotonic time and odometer
            for pair in stops.windows(2) {
                assert!(pair[1].arrival_time >= pair[0].departure_time);
                assert!(pair[1].cumulative_miles >= pair[0].cumulative_miles - 0.05);
                // A single drivable chunk never exceeds the 8-hour break window
                let driven = pair[1].arrival_time - pair[0].departure_time;
                assert!(driven <= Duration::minutes(8 * 60 + 1));
            }

            // Exactly one of each skeleton stop, in order
            let skeleton: Vec<usize> = [StopKind::Start, StopKind::Pickup, StopKind::Dropoff, StopKind::End]
                .iter()
                .map(|kind| {
                    let found: Vec<usize> = stops
                        .iter()
                        .enumerate()
                        .filter(|(_, s)| s.kind == *kind)
                        .map(|(i, _)| i)
                        .collect();
                    assert_eq!(found.len(), 1, "expected exactly one {kind:?}");
                    found[0]
                })
                .collect();
            assert!(skeleton.windows(2).all(|w| w[0] < w[1]));

            // Driving-today cap at every emission
            for stop in &stops {
                assert!(stop.cumulative_driving_hours <= MAX_DRIVING_HOURS + 0.01);
            }

            // Every rest is immediately followed by a pre-trip at the same spot
            for (i, stop) in stops.iter().enumerate() {
                if stop.kind == StopKind::Rest {
                    let next = &stops[i + 1];
                    assert_eq!(next.kind, StopKind::PreTrip);
                    assert_eq!(next.coordinates, stop.coordinates);
                }
            }

            // Fuel stops sit on the 1000-mile cadence
            for stop in stops.iter().filter(|s| s.kind == StopKind::Fuel) {
                let offset = stop.cumulative_miles.rem_euclid(FUEL_INTERVAL_MILES);
                assert!(
                    offset < 1.0 || offset > FUEL_INTERVAL_MILES - 1.0,
                    "fuel at {} mi",
                    stop.cumulative_miles
                );
            }

            // Summary counts match the stop list
            assert_eq!(summary.fuel_stops, stops.iter().filter(|s| s.kind == StopKind::Fuel).count());
            assert_eq!(summary.rest_breaks, stops.iter().filter(|s| s.kind == StopKind::Break).count());
            assert_eq!(summary.rest_stops, stops.iter().filter(|s| s.kind == StopKind::Rest).count());
            assert_eq!(summary.total_days, stops.iter().map(|s| s.day).max().unwrap());

            // Ids are the 1-based sequence
            for (i, stop) in stops.iter().enumerate() {
                assert_eq!(stop.id as usize, i + 1);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Stop labels
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn interleaved_stops_use_the_place_lookup() {
        let (stops, _) = plan(100.0, 395.0, 0.0).await;

        let brk = stops.iter().find(|s| s.kind == StopKind::Break).unwrap();
        assert_eq!(brk.location, "Wayside, TX");
    }

    #[tokio::test]
    async fn failed_lookup_labels_stop_unknown() {
        let route = test_route(100.0, 700.0);
        let mut planner = TripPlanner::new(start(), 0.0);
        let stops = planner
            .calculate_trip(
                &route,
                &place("Dallas, TX", 30.0),
                &place("Oklahoma City, OK", 32.0),
                &place("Wichita, KS", 34.0),
                &NoPlaces,
            )
            .await;

        let brk = stops.iter().find(|s| s.kind == StopKind::Break).unwrap();
        assert_eq!(brk.location, "Unknown Location");
    }

    #[tokio::test]
    async fn interleaved_stop_coordinates_come_from_the_polyline() {
        let (stops, _) = plan(100.0, 395.0, 0.0).await;

        // Break at odometer 440 on the meridian: lat 30 + 440/69.1
        let miles_per_degree = 3959.0_f64 * std::f64::consts::PI / 180.0;
        let brk = stops.iter().find(|s| s.kind == StopKind::Break).unwrap();
        assert!((brk.coordinates.lat - (30.0 + 440.0 / miles_per_degree)).abs() < 0.01);
        assert!((brk.coordinates.lng + 97.0).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // Degenerate inputs
    // -----------------------------------------------------------------------
    #[tokio::test]
    async fn zero_length_legs_still_produce_the_skeleton() {
        let (stops, summary) = plan(0.0, 0.0, 0.0).await;

        assert_eq!(stops.len(), 4);
        assert_eq!(summary.total_days, 1);
        assert_eq!(stops.last().unwrap().cumulative_miles, 0.0);
    }

    #[tokio::test]
    async fn empty_planner_summary_is_zeroed() {
        let planner = TripPlanner::new(start(), 10.0);
        let summary = planner.summary(0.0);

        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.total_duration_hours, 0.0);
        assert_eq!(summary.cycle_hours_after, 10.0);
    }
}
