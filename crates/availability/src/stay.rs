use serde::{Deserialize, Serialize};

use staybook_core::{CalendarDay, RoomId};

/// Server-side lifecycle status of an existing booking.
///
/// Only "active-ish" statuses make a room (or the user) unavailable;
/// cancelled and declined bookings never produce blocks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Paid,
    CheckedIn,
    Cancelled,
    Declined,
}

impl BookingStatus {
    /// Whether a booking in this status blocks calendar days.
    pub fn blocks_calendar(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending
                | BookingStatus::Approved
                | BookingStatus::Paid
                | BookingStatus::CheckedIn
        )
    }
}

/// An existing booking as reported by the calendar collaborator: a room,
/// a status, and an inclusive [check-in, check-out] date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedStay {
    pub room_id: RoomId,
    pub status: BookingStatus,
    pub check_in: CalendarDay,
    pub check_out: CalendarDay,
}

impl BookedStay {
    /// Expand this stay into the individual days it blocks.
    ///
    /// Inclusive of both endpoints. Empty for non-blocking statuses and for
    /// malformed ranges (check-out before check-in) coming off the wire.
    pub fn blocked_days(&self) -> impl Iterator<Item = CalendarDay> + '_ {
        let range = if self.status.blocks_calendar() && self.check_in <= self.check_out {
            Some(self.check_in.days_through(self.check_out))
        } else {
            None
        };
        range.into_iter().flatten()
    }
}
