//! ELD daily log sheet types

use serde::{Deserialize, Serialize};

use super::DutyStatus;

/// Continuous duty-status interval within one calendar day.
///
/// Hours are half-open `[start_hour, end_hour)` positions on the 24-hour
/// grid, 0 ≤ start < end ≤ 24.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutySegment {
    pub status: DutyStatus,
    pub start_hour: f64,
    pub end_hour: f64,
    pub location: String,
    pub notes: String,
}

/// Hours per duty status for one day, summing to 24
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DutyTotals {
    pub off_duty: f64,
    pub sleeper: f64,
    pub driving: f64,
    pub on_duty: f64,
}

impl DutyTotals {
    pub fn add(&mut self, status: DutyStatus, hours: f64) {
        match status {
            DutyStatus::OffDuty => self.off_duty += hours,
            DutyStatus::Sleeper => self.sleeper += hours,
            DutyStatus::Driving => self.driving += hours,
            DutyStatus::OnDuty => self.on_duty += hours,
        }
    }

    pub fn sum(&self) -> f64 {
        self.off_duty + self.sleeper + self.driving + self.on_duty
    }

    /// The largest bucket, used to absorb rounding error
    pub fn largest_mut(&mut self) -> &mut f64 {
        let max = self
            .off_duty
            .max(self.sleeper)
            .max(self.driving)
            .max(self.on_duty);
        if self.off_duty == max {
            &mut self.off_duty
        } else if self.sleeper == max {
            &mut self.sleeper
        } else if self.driving == max {
            &mut self.driving
        } else {
            &mut self.on_duty
        }
    }
}

/// Timestamped activity entry for the remarks line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remark {
    /// HH:MM
    pub time: String,
    pub location: String,
    pub activity: String,
}

/// One calendar day of the driver's log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSheet {
    /// MM/DD/YYYY
    pub date: String,
    pub day_number: u32,
    /// Miles driven within this calendar day
    pub total_miles: f64,
    pub segments: Vec<DutySegment>,
    pub totals: DutyTotals,
    pub remarks: Vec<Remark>,
}
