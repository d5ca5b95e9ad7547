//! Booking-creation collaborator boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::payload::{BookingRequest, BookingResponse};

/// Transport-level failure while talking to the booking collaborator.
///
/// A rejection is not an error at this level: the collaborator answers
/// with `BookingResponse { success: false, .. }` for those.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("booking transport failure: {0}")]
    Transport(String),
}

/// The external booking-creation collaborator.
///
/// Submission has real side effects on the server and is not idempotent at
/// this layer; callers must not re-issue a request until the previous one
/// has resolved.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingResponse, GatewayError>;
}
