//! `staybook-engine`: the assembled booking flow.
//!
//! [`BookingSession`] wires the shared cart store, the availability oracle
//! and the booking composer over injected collaborator handles, the way a
//! host UI would hold them: one session per signed-in (or anonymous) user,
//! all operations serialized by the host's event loop.

use std::sync::Arc;

use tracing::warn;

use staybook_availability::{
    AvailabilityOracle, DayStatus, RoomCalendarSource, UserBookingSource,
};
use staybook_cart::{restore, CartSnapshot, CartStore, SessionStore};
use staybook_catalog::{Package, Room};
use staybook_composer::{
    BookingComposer, BookingGateway, BookingResponse, ComposerState, ParticipantPolicy,
    SubmitError, ValidationIssue,
};
use staybook_core::{CalendarDay, DomainResult, MonthView, PackageId, RoomId, UserId};
use staybook_pricing::PriceBreakdown;

/// One user's booking flow: cart, availability, draft and submission.
pub struct BookingSession {
    cart: Arc<CartStore>,
    oracle: AvailabilityOracle,
    composer: BookingComposer,
    calendar: Arc<dyn RoomCalendarSource>,
    history: Arc<dyn UserBookingSource>,
    gateway: Arc<dyn BookingGateway>,
    session_store: Arc<dyn SessionStore>,
    user: Option<UserId>,
}

impl BookingSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        calendar: Arc<dyn RoomCalendarSource>,
        history: Arc<dyn UserBookingSource>,
        gateway: Arc<dyn BookingGateway>,
        session_store: Arc<dyn SessionStore>,
        packages: Vec<Package>,
        policy: ParticipantPolicy,
        user: Option<UserId>,
    ) -> Self {
        let cart = Arc::new(CartStore::new());
        let composer = BookingComposer::new(Arc::clone(&cart), packages, policy);
        Self {
            cart,
            oracle: AvailabilityOracle::new(),
            composer,
            calendar,
            history,
            gateway,
            session_store,
            user,
        }
    }

    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    /// Rebuild the cart from the stored session snapshot, resolving ids
    /// against the given catalog. A missing or corrupt snapshot degrades
    /// to an empty cart.
    pub fn restore_cart(&mut self, catalog: &[Room]) {
        match self.session_store.load() {
            Ok(Some(snapshot)) => restore(&self.cart, &snapshot, catalog),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "session snapshot unreadable; starting empty"),
        }
        self.selection_changed();
    }

    /// Catalog "add" action.
    pub fn add_room(&mut self, room: Room) {
        if self.cart.add(room) {
            self.selection_changed();
        }
    }

    /// Catalog/cart "remove" action.
    pub fn remove_room(&mut self, id: RoomId) {
        if self.cart.remove(id) {
            self.selection_changed();
        }
    }

    /// Refresh both block sets for the current selection and user.
    pub async fn refresh_availability(&mut self) {
        self.oracle.refresh_room_blocks(self.calendar.as_ref()).await;
        self.oracle
            .refresh_user_blocks(self.history.as_ref(), self.user)
            .await;
    }

    pub fn classify(&self, day: CalendarDay, today: CalendarDay, month: MonthView) -> DayStatus {
        self.oracle.classify(day, today, month)
    }

    pub fn is_selectable(&self, day: CalendarDay, today: CalendarDay) -> bool {
        self.oracle.is_selectable(day, today)
    }

    /// Soft indicator that the blocks on display may be stale.
    pub fn availability_degraded(&self) -> bool {
        self.oracle.is_degraded()
    }

    pub fn set_dates(&mut self, check_in: CalendarDay, check_out: CalendarDay) -> DomainResult<()> {
        self.composer.set_dates(check_in, check_out)
    }

    pub fn set_event_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        self.composer.set_event_name(name)
    }

    pub fn set_participants(&mut self, count: u32) -> DomainResult<()> {
        self.composer.set_participants(count)
    }

    pub fn select_package(&mut self, package_id: Option<PackageId>) -> DomainResult<()> {
        self.composer.select_package(package_id)
    }

    pub fn state(&self) -> ComposerState {
        self.composer.state()
    }

    pub fn submit_enabled(&self) -> bool {
        self.composer.submit_enabled()
    }

    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        self.composer.validation_issues()
    }

    pub fn last_failure(&self) -> Option<&SubmitError> {
        self.composer.last_failure()
    }

    /// Reactively derived total for the current draft.
    pub fn quote(&self) -> DomainResult<PriceBreakdown> {
        self.composer.quote()
    }

    /// Submit the draft. On acceptance the cart is cleared (and the cleared
    /// state persisted); on failure everything is preserved for retry.
    pub async fn submit(&mut self) -> Result<BookingResponse, SubmitError> {
        let result = self.composer.submit(self.gateway.as_ref()).await;
        if result.is_ok() {
            self.selection_changed();
        }
        result
    }

    /// Log the user out: cart, draft, stored session and fetched blocks
    /// are all discarded. Blocks fetched for the previous user must not
    /// survive into the anonymous session.
    pub fn logout(&mut self) {
        self.cart.clear();
        self.composer.reset();
        self.user = None;
        if let Err(err) = self.session_store.clear() {
            warn!(error = %err, "failed to clear session snapshot");
        }
        self.oracle = AvailabilityOracle::new();
    }

    /// Propagate a cart change to the oracle, the composer and the session
    /// snapshot.
    fn selection_changed(&mut self) {
        self.oracle.set_selection(self.cart.room_ids());
        self.composer.cart_changed();
        if let Err(err) = self.session_store.save(&CartSnapshot::of(&self.cart)) {
            // Non-fatal: the session just won't survive a reload.
            warn!(error = %err, "failed to persist cart snapshot");
        }
    }
}
