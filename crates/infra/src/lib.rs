//! In-memory collaborator implementations.
//!
//! Intended for tests/dev: a seedable calendar standing in for the
//! room-calendar and booking-history collaborators, and a booking desk
//! standing in for the booking-creation collaborator, both with failure
//! injection so the degraded paths can be exercised.

pub mod booking_desk;
pub mod calendar;

pub use booking_desk::{DeskMode, InMemoryBookingDesk};
pub use calendar::{InMemoryCalendar, StayRecord};
