//! ELD daily log sheet generation.
//!
//! Re-projects the planned stop list onto calendar days as continuous
//! 24-hour duty-status strip charts. Each sheet covers midnight to
//! midnight; segments are gap-free, overlap-free, and no two adjacent
//! segments share a status.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::types::{DutySegment, DutyStatus, DutyTotals, LogSheet, Remark, Stop, StopKind};

/// Tolerance in hours when comparing positions on the 24-hour grid
const GRID_EPSILON: f64 = 0.001;

/// A duty status change at a point in time
#[derive(Debug, Clone)]
struct DutyEvent {
    time: NaiveDateTime,
    status: DutyStatus,
    location: String,
}

/// Generate one log sheet per calendar day spanned by the stops
pub fn build_log_sheets(stops: &[Stop]) -> Vec<LogSheet> {
    if stops.is_empty() {
        return Vec::new();
    }

    let events = event_timeline(stops);

    let start_date = events[0].time.date();
    let end_date = events[events.len() - 1].time.date();

    let mut sheets = Vec::new();
    let mut date = start_date;
    let mut day_number = 1;
    while date <= end_date {
        sheets.push(day_log(date, day_number, &events, stops));
        date += Duration::days(1);
        day_number += 1;
    }

    sheets
}

/// Flatten the stops into a timeline of duty status changes.
///
/// Each stop contributes its arrival (the stop's own status) and its
/// departure (driving to the next stop, or off duty after the last).
fn event_timeline(stops: &[Stop]) -> Vec<DutyEvent> {
    let mut events = Vec::with_capacity(stops.len() * 2);

    for (i, stop) in stops.iter().enumerate() {
        let status = if matches!(stop.kind, StopKind::Rest | StopKind::Break)
            || stop.duty_status == DutyStatus::OffDuty
        {
            DutyStatus::OffDuty
        } else {
            DutyStatus::OnDuty
        };

        events.push(DutyEvent {
            time: stop.arrival_time,
            status,
            location: stop.location.clone(),
        });

        if stops.get(i + 1).is_some() {
            events.push(DutyEvent {
                time: stop.departure_time,
                status: DutyStatus::Driving,
                location: "En route".to_string(),
            });
        } else {
            events.push(DutyEvent {
                time: stop.departure_time,
                status: DutyStatus::OffDuty,
                location: stop.location.clone(),
            });
        }
    }

    events.sort_by_key(|e| e.time);
    events
}

fn day_log(date: NaiveDate, day_number: u32, events: &[DutyEvent], stops: &[Stop]) -> LogSheet {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    let segments = day_segments(day_start, day_end, events, day_number);
    let totals = duty_totals(&segments);
    let total_miles = day_miles(date, stops);
    let remarks = day_remarks(day_start, day_end, stops);

    LogSheet {
        date: date.format("%m/%d/%Y").to_string(),
        day_number,
        total_miles,
        segments,
        totals,
        remarks,
    }
}

/// Build the duty segments covering one 24-hour day
fn day_segments(
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
    events: &[DutyEvent],
    day_number: u32,
) -> Vec<DutySegment> {
    let (mut status, mut location) = status_at_midnight(day_start, events, day_number);
    let mut current_hour = 0.0;
    let mut segments = Vec::new();

    for event in events.iter().filter(|e| e.time >= day_start && e.time < day_end) {
        let event_hour = hour_of_day(event.time);
        if event_hour > current_hour + GRID_EPSILON {
            segments.push(DutySegment {
                status,
                start_hour: round2(current_hour),
                end_hour: round2(event_hour),
                location: location.clone(),
                notes: String::new(),
            });
        }
        current_hour = event_hour;
        status = event.status;
        location = event.location.clone();
    }

    if current_hour < 24.0 {
        segments.push(DutySegment {
            status,
            start_hour: round2(current_hour),
            end_hour: 24.0,
            location,
            notes: String::new(),
        });
    }

    normalize_segments(merge_segments(segments))
}

/// Status in effect at a day's midnight boundary.
///
/// Day 1 starts off duty; later days inherit the most recent event
/// strictly before midnight, defaulting to off duty when the timeline
/// has nothing earlier.
fn status_at_midnight(
    day_start: NaiveDateTime,
    events: &[DutyEvent],
    day_number: u32,
) -> (DutyStatus, String) {
    if day_number == 1 {
        return (DutyStatus::OffDuty, String::new());
    }

    let mut last: Option<&DutyEvent> = None;
    for event in events {
        if event.time < day_start {
            last = Some(event);
        } else {
            break;
        }
    }

    match last {
        Some(event) => (event.status, event.location.clone()),
        None => (DutyStatus::OffDuty, String::new()),
    }
}

fn hour_of_day(time: NaiveDateTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0 + f64::from(time.second()) / 3600.0
}

/// Merge consecutive segments with the same status
fn merge_segments(segments: Vec<DutySegment>) -> Vec<DutySegment> {
    let mut merged: Vec<DutySegment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(prev) if prev.status == segment.status => {
                prev.end_hour = segment.end_hour;
                if prev.location.is_empty() && !segment.location.is_empty() {
                    prev.location = segment.location;
                }
            }
            _ => merged.push(segment),
        }
    }

    merged
}

/// Clamp the segments to exactly [0, 24] with no gaps
fn normalize_segments(segments: Vec<DutySegment>) -> Vec<DutySegment> {
    if segments.is_empty() {
        return vec![DutySegment {
            status: DutyStatus::OffDuty,
            start_hour: 0.0,
            end_hour: 24.0,
            location: String::new(),
            notes: String::new(),
        }];
    }

    let mut normalized: Vec<DutySegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        // Gap detection and the extended end use the raw hour; rounding
        // happens only when the segment itself is appended
        if let Some(prev) = normalized.last_mut() {
            if segment.start_hour > prev.end_hour + GRID_EPSILON {
                prev.end_hour = segment.start_hour;
            }
        }
        normalized.push(DutySegment {
            start_hour: round1(segment.start_hour),
            end_hour: round1(segment.end_hour),
            ..segment
        });
    }

    if let Some(first) = normalized.first_mut() {
        if first.start_hour > 0.0 {
            first.start_hour = 0.0;
        }
    }
    if let Some(last) = normalized.last_mut() {
        if last.end_hour < 24.0 {
            last.end_hour = 24.0;
        }
    }

    normalized
}

/// Per-status hour totals; the largest bucket absorbs rounding drift
fn duty_totals(segments: &[DutySegment]) -> DutyTotals {
    let mut totals = DutyTotals::default();
    for segment in segments {
        let hours = segment.end_hour - segment.start_hour;
        if hours > 0.0 {
            totals.add(segment.status, hours);
        }
    }

    totals.off_duty = round1(totals.off_duty);
    totals.sleeper = round1(totals.sleeper);
    totals.driving = round1(totals.driving);
    totals.on_duty = round1(totals.on_duty);

    let sum = totals.sum();
    if (sum - 24.0).abs() > 0.5 {
        let largest = totals.largest_mut();
        *largest = round1(*largest + 24.0 - sum);
    }

    totals
}

/// Miles driven within the day: last stop of the day's odometer minus
/// the previous day's last odometer (the trip starts at zero on day 1).
fn day_miles(date: NaiveDate, stops: &[Stop]) -> f64 {
    let day_start = date.and_time(NaiveTime::MIN);
    let day_end = day_start + Duration::days(1);

    let last_of_day = stops
        .iter()
        .filter(|s| s.arrival_time >= day_start && s.arrival_time < day_end)
        .last();
    let Some(last_of_day) = last_of_day else {
        return 0.0;
    };

    if stops.first().map(|s| s.arrival_time.date()) == Some(date) {
        return round1(last_of_day.cumulative_miles);
    }

    let mut previous_day_miles = 0.0;
    for stop in stops {
        if stop.arrival_time < day_start {
            previous_day_miles = stop.cumulative_miles;
        } else {
            break;
        }
    }

    round1(last_of_day.cumulative_miles - previous_day_miles)
}

/// Remarks for every stop arriving within the day
fn day_remarks(day_start: NaiveDateTime, day_end: NaiveDateTime, stops: &[Stop]) -> Vec<Remark> {
    stops
        .iter()
        .filter(|s| s.arrival_time >= day_start && s.arrival_time < day_end)
        .map(|stop| Remark {
            time: stop.arrival_time.format("%H:%M").to_string(),
            location: stop.location.clone(),
            activity: if stop.notes.is_empty() {
                stop.kind.as_str().to_string()
            } else {
                stop.notes.clone()
            },
        })
        .collect()
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
