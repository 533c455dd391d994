//! Inspection due-date status, computed at read time

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub(crate) const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Where an inspection's next date stands relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Past due by `days`
    Overdue { days: i64 },
    /// Due within a week
    DueSoon { days: i64 },
    /// Due within a month
    Upcoming { days: i64 },
    Scheduled { days: i64 },
}

/// Whole days from `now` until `next_date`, rounded up
pub fn days_remaining(next_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (next_date - now).num_milliseconds();
    let days = ms.div_euclid(DAY_MS);
    if ms.rem_euclid(DAY_MS) == 0 {
        days
    } else {
        days + 1
    }
}

impl InspectionStatus {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => InspectionStatus::Overdue { days: d.abs() },
            0..=7 => InspectionStatus::DueSoon { days },
            8..=30 => InspectionStatus::Upcoming { days },
            _ => InspectionStatus::Scheduled { days },
        }
    }

    pub fn at(next_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_days(days_remaining(next_date, now))
    }
}
