//! Calendar-day value types.
//!
//! Blocked-date computation works on whole days: two values are equal iff they
//! name the same calendar day. Modelling this as a dedicated day type (rather
//! than normalizing timestamps at comparison time) keeps set operations exact
//! and avoids timezone-truncation bugs.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A calendar day (year, month, day; no time component).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                DomainError::validation(format!("invalid calendar day {year}-{month}-{day}"))
            })
    }

    /// Truncate a wall-clock instant to its UTC calendar day.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Signed number of days from `self` to `other` (positive when `other`
    /// is later).
    pub fn days_until(&self, other: CalendarDay) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Iterate every day from `self` through `end`, inclusive. Empty when
    /// `end < self`.
    pub fn days_through(&self, end: CalendarDay) -> DaysThrough {
        DaysThrough {
            next: if *self <= end { Some(self.0) } else { None },
            end: end.0,
        }
    }
}

impl ValueObject for CalendarDay {}

impl core::fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Inclusive day-range iterator (see [`CalendarDay::days_through`]).
#[derive(Debug, Clone)]
pub struct DaysThrough {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DaysThrough {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        let current = self.next?;
        self.next = if current < self.end {
            current.succ_opt()
        } else {
            None
        };
        Some(CalendarDay(current))
    }
}

/// A displayed month, used by calendar rendering to lock out days that
/// belong to a neighbouring month.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    pub fn of(day: CalendarDay) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        day.year() == self.year && day.month() == self.month
    }
}
