//! Blocked-date computation and calendar day classification.
//!
//! This crate answers one question for the booking flow: *which calendar
//! days are off limits?* It merges two independently fetched inputs (days
//! where a selected room is physically booked, and days where the requesting
//! user already holds a booking of their own) into day-set values the
//! calendar UI can classify against.
//!
//! Fetch failures never escape the oracle: the last-known sets stay in
//! force and a visible degraded flag is raised instead (a transient network
//! error must not hard-fail a browsing flow).

pub mod block_set;
pub mod oracle;
pub mod source;
pub mod stay;

pub use block_set::DateBlockSet;
pub use oracle::{AvailabilityOracle, DayStatus, SelectionKey};
pub use source::{FetchError, RoomCalendarSource, UserBookingSource};
pub use stay::{BookedStay, BookingStatus};
