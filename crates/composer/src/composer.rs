use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use staybook_catalog::Package;
use staybook_cart::CartStore;
use staybook_core::{CalendarDay, DomainError, DomainResult, PackageId};
use staybook_pricing::{compute_total, stay_nights, PriceBreakdown};

use crate::draft::{BookingDraft, DraftField, ParticipantPolicy, ValidationIssue};
use crate::gateway::{BookingGateway, GatewayError};
use crate::payload::{BookingRequest, BookingResponse};

/// Composer lifecycle.
///
/// There is no `Failed` variant: per the error policy a failed submission
/// returns the composer to `DetailsValid` for resubmission, with the
/// failure surfaced through [`BookingComposer::last_failure`]. That keeps
/// the submit-enabled predicate exactly `state == DetailsValid`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComposerState {
    /// No (valid) date range chosen yet.
    Empty,
    /// Dates chosen, details still incomplete.
    DatesSet,
    /// Everything validates; submission allowed.
    DetailsValid,
    /// Submission in flight; the composer is frozen.
    Submitting,
    /// Accepted by the server; cart cleared and draft reset.
    Submitted,
}

/// Submission failure, surfaced exactly once per attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Local misuse: submit called outside `DetailsValid` (including a
    /// duplicate submit while one is in flight).
    #[error("submission not allowed: {0}")]
    NotReady(String),

    /// The draft stopped pricing/assembling between validation and submit.
    #[error("draft failed final checks: {0}")]
    Draft(#[from] DomainError),

    /// The server rejected the booking (e.g. a concurrently-created
    /// conflicting booking).
    #[error("booking rejected: {0}")]
    Rejected(String),

    /// Connectivity failure; nothing is assumed committed.
    #[error("could not reach the booking service")]
    Transport,
}

/// The orchestrating state machine for one booking flow.
///
/// Owns the draft; reads the shared cart; validation runs after every
/// accepted edit and may regress the state. One composer exists per
/// session, which is what makes the `Submitting` freeze a sufficient
/// duplicate-submit guard.
#[derive(Debug)]
pub struct BookingComposer {
    cart: Arc<CartStore>,
    packages: Vec<Package>,
    policy: ParticipantPolicy,
    draft: BookingDraft,
    state: ComposerState,
    last_failure: Option<SubmitError>,
}

impl BookingComposer {
    pub fn new(cart: Arc<CartStore>, packages: Vec<Package>, policy: ParticipantPolicy) -> Self {
        let mut composer = Self {
            cart,
            packages,
            policy,
            draft: BookingDraft::new(),
            state: ComposerState::Empty,
            last_failure: None,
        };
        composer.draft.seed_participants(
            composer.cart.aggregate_capacity(),
            ParticipantPolicy::ReseedOnCartChange,
        );
        composer
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The failure of the most recent submission attempt, if any. Cleared
    /// by the next accepted edit or successful submit.
    pub fn last_failure(&self) -> Option<&SubmitError> {
        self.last_failure.as_ref()
    }

    /// Exactly `state == DetailsValid`.
    pub fn submit_enabled(&self) -> bool {
        self.state == ComposerState::DetailsValid
    }

    /// Current field-level validation messages (empty when submit-ready).
    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.draft.event_name().trim().is_empty() {
            issues.push(ValidationIssue::new(
                DraftField::EventName,
                "event name must not be blank",
            ));
        }

        match (self.draft.check_in(), self.draft.check_out()) {
            (Some(check_in), Some(check_out)) => {
                if check_in == check_out && !self.cart.is_empty() {
                    issues.push(ValidationIssue::new(
                        DraftField::Dates,
                        "room stays require at least one full night",
                    ));
                }
            }
            _ => issues.push(ValidationIssue::new(
                DraftField::Dates,
                "choose a check-in and check-out date",
            )),
        }

        if self.draft.participants() == 0 {
            issues.push(ValidationIssue::new(
                DraftField::Participants,
                "at least one participant is required",
            ));
        }

        if !self.packages.is_empty() {
            match self.draft.package_id() {
                None => issues.push(ValidationIssue::new(
                    DraftField::Package,
                    "select a package",
                )),
                Some(id) if self.find_package(id).is_none() => issues.push(
                    ValidationIssue::new(DraftField::Package, "selected package no longer exists"),
                ),
                Some(_) => {}
            }
        }

        issues
    }

    /// Set the candidate date range. Check-out before check-in is rejected
    /// outright; equal dates are stored and validated against the cart
    /// (day-use events with no rooms are legitimate).
    pub fn set_dates(&mut self, check_in: CalendarDay, check_out: CalendarDay) -> DomainResult<()> {
        self.guard_unfrozen()?;
        if check_out < check_in {
            return Err(DomainError::validation("check-out is before check-in"));
        }
        self.draft.set_dates(check_in, check_out);
        self.after_edit();
        Ok(())
    }

    pub fn set_event_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.guard_unfrozen()?;
        self.draft.set_event_name(name);
        self.after_edit();
        Ok(())
    }

    /// Explicit user edit of the participant count; wins over derived
    /// values per the configured [`ParticipantPolicy`].
    pub fn set_participants(&mut self, count: u32) -> DomainResult<()> {
        self.guard_unfrozen()?;
        self.draft.set_participants(count);
        self.after_edit();
        Ok(())
    }

    pub fn select_package(&mut self, package_id: Option<PackageId>) -> DomainResult<()> {
        self.guard_unfrozen()?;
        if let Some(id) = package_id {
            if self.find_package(id).is_none() {
                return Err(DomainError::not_found());
            }
        }
        self.draft.set_package(package_id);
        self.after_edit();
        Ok(())
    }

    /// Replace the known package list (the collaborator may deliver it
    /// after the composer is built).
    pub fn set_packages(&mut self, packages: Vec<Package>) -> DomainResult<()> {
        self.guard_unfrozen()?;
        self.packages = packages;
        self.after_edit();
        Ok(())
    }

    /// React to a cart change: reseed participants per policy and re-run
    /// validation (the cart feeds the same-day rule). Ignored while a
    /// submission is in flight, and after acceptance (the accepted flow is
    /// over; clearing the cart is part of it).
    pub fn cart_changed(&mut self) {
        if matches!(
            self.state,
            ComposerState::Submitting | ComposerState::Submitted
        ) {
            return;
        }
        self.draft
            .seed_participants(self.cart.aggregate_capacity(), self.policy);
        self.recompute_state();
    }

    /// Derived total for the current draft, recomputed on demand.
    pub fn quote(&self) -> DomainResult<PriceBreakdown> {
        let (check_in, check_out) = match (self.draft.check_in(), self.draft.check_out()) {
            (Some(i), Some(o)) => (i, o),
            _ => return Err(DomainError::validation("no date range chosen")),
        };
        let cart = self.cart.snapshot();
        let nights = stay_nights(check_in, check_out, !cart.is_empty())?;
        let package = self.draft.package_id().and_then(|id| self.find_package(id));
        compute_total(cart.rooms(), nights, package, self.draft.participants())
    }

    /// Submit the draft to the booking collaborator.
    ///
    /// On acceptance the cart is cleared and the draft reset (navigation is
    /// the caller's responsibility). On rejection or transport failure the
    /// draft and cart are preserved unchanged and the composer returns to
    /// `DetailsValid` for resubmission.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<BookingResponse, SubmitError>
    where
        G: BookingGateway + ?Sized,
    {
        if self.state != ComposerState::DetailsValid {
            return Err(SubmitError::NotReady(format!(
                "submit requires a complete draft (state: {:?})",
                self.state
            )));
        }
        self.state = ComposerState::Submitting;

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                self.recompute_state();
                return Err(SubmitError::Draft(err));
            }
        };

        info!(
            rooms = request.room_ids.len(),
            participants = request.participants,
            total = %request.total_price,
            "submitting booking"
        );

        match gateway.create_booking(&request).await {
            Ok(response) if response.success => {
                self.cart.clear();
                self.draft = BookingDraft::new();
                self.last_failure = None;
                self.state = ComposerState::Submitted;
                info!("booking accepted");
                Ok(response)
            }
            Ok(response) => {
                let failure = SubmitError::Rejected(
                    response
                        .message
                        .clone()
                        .unwrap_or_else(|| "booking rejected".to_string()),
                );
                warn!(error = %failure, "booking rejected by the server");
                self.fail(failure.clone());
                Err(failure)
            }
            Err(GatewayError::Transport(detail)) => {
                warn!(%detail, "booking submission transport failure");
                let failure = SubmitError::Transport;
                self.fail(failure.clone());
                Err(failure)
            }
        }
    }

    /// Discard the draft and any recorded failure (logout, new flow).
    pub fn reset(&mut self) {
        self.draft = BookingDraft::new();
        self.last_failure = None;
        self.state = ComposerState::Empty;
    }

    fn fail(&mut self, failure: SubmitError) {
        self.last_failure = Some(failure);
        // Draft and cart are untouched, so validation still passes.
        self.state = ComposerState::DetailsValid;
    }

    fn build_request(&self) -> DomainResult<BookingRequest> {
        let (check_in, check_out) = match (self.draft.check_in(), self.draft.check_out()) {
            (Some(i), Some(o)) => (i, o),
            _ => return Err(DomainError::validation("no date range chosen")),
        };
        let cart = self.cart.snapshot();
        let nights = stay_nights(check_in, check_out, !cart.is_empty())?;
        let package = self.draft.package_id().and_then(|id| self.find_package(id));
        let breakdown = compute_total(cart.rooms(), nights, package, self.draft.participants())?;
        Ok(BookingRequest {
            event_name: self.draft.event_name().trim().to_string(),
            room_ids: cart.room_ids(),
            check_in,
            check_out,
            participants: self.draft.participants(),
            package_id: self.draft.package_id(),
            total_price: breakdown.total,
        })
    }

    fn find_package(&self, id: PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| p.package_id() == id)
    }

    fn guard_unfrozen(&self) -> DomainResult<()> {
        if self.state == ComposerState::Submitting {
            return Err(DomainError::conflict("submission in flight; edits are frozen"));
        }
        Ok(())
    }

    fn after_edit(&mut self) {
        self.last_failure = None;
        self.recompute_state();
    }

    fn recompute_state(&mut self) {
        let dates_chosen = matches!(
            (self.draft.check_in(), self.draft.check_out()),
            (Some(check_in), Some(check_out)) if check_in <= check_out
        );
        self.state = if !dates_chosen {
            ComposerState::Empty
        } else if self.validation_issues().is_empty() {
            ComposerState::DetailsValid
        } else {
            ComposerState::DatesSet
        };
    }
}
