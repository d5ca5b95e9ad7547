use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use staybook_core::{CalendarDay, ValueObject};

use crate::stay::BookedStay;

/// An immutable set of calendar days unavailable for a target (a room
/// selection, or the user's own bookings).
///
/// Day-granular by construction: membership and equality compare whole
/// days, never timestamps. "Mutations" return new sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBlockSet {
    days: BTreeSet<CalendarDay>,
}

impl DateBlockSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Expand a batch of stays into one de-duplicated day set.
    pub fn from_stays<'a>(stays: impl IntoIterator<Item = &'a BookedStay>) -> Self {
        stays
            .into_iter()
            .flat_map(BookedStay::blocked_days)
            .collect()
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.days.contains(&day)
    }

    pub fn union(&self, other: &DateBlockSet) -> DateBlockSet {
        Self {
            days: self.days.union(&other.days).copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        self.days.iter().copied()
    }
}

impl ValueObject for DateBlockSet {}

impl FromIterator<CalendarDay> for DateBlockSet {
    fn from_iter<I: IntoIterator<Item = CalendarDay>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
