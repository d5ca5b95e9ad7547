//! Collaborator traits for blocked-date queries.
//!
//! Room blocks and user blocks are deliberately separate sources: room
//! blocks change often and are room-id-scoped, user blocks are cheap and
//! session-scoped, and the UI gives different feedback for each kind of
//! conflict.

use async_trait::async_trait;
use thiserror::Error;

use staybook_core::{RoomId, UserId};

use crate::stay::BookedStay;

/// Transient failure while fetching blocked dates.
///
/// Never propagates past the [`crate::AvailabilityOracle`]; callers of the
/// oracle see degraded state, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network/backend unreachable.
    #[error("availability transport failure: {0}")]
    Transport(String),

    /// Backend replied with something unusable.
    #[error("availability backend error: {0}")]
    Backend(String),
}

/// Calendar collaborator: active bookings referencing any of the given
/// rooms.
#[async_trait]
pub trait RoomCalendarSource: Send + Sync {
    async fn blocked_stays(&self, room_ids: &[RoomId]) -> Result<Vec<BookedStay>, FetchError>;
}

/// Booking-history collaborator: the authenticated user's own bookings
/// (any room).
#[async_trait]
pub trait UserBookingSource: Send + Sync {
    async fn user_stays(&self, user: UserId) -> Result<Vec<BookedStay>, FetchError>;
}
