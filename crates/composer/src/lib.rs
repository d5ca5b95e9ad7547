//! Booking composition state machine.
//!
//! The composer owns the candidate date range, participant count, package
//! choice and event name; validates them against the shared cart and the
//! business rules; and on submit assembles a [`BookingRequest`] for the
//! external booking-creation collaborator. The server stays the source of
//! truth for real conflicts: a rejection comes back as a
//! [`SubmitError::Rejected`] with draft and cart preserved for retry.

pub mod composer;
pub mod draft;
pub mod gateway;
pub mod payload;

pub use composer::{BookingComposer, ComposerState, SubmitError};
pub use draft::{BookingDraft, DraftField, ParticipantPolicy, ValidationIssue};
pub use gateway::{BookingGateway, GatewayError};
pub use payload::{BookingRequest, BookingResponse};
