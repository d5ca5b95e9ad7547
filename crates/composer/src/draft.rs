use staybook_core::{CalendarDay, PackageId};

/// Which draft field a validation message belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DraftField {
    EventName,
    Dates,
    Participants,
    Package,
}

/// A field-level validation message. Always caught before submission is
/// attempted; never sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: DraftField,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// What happens to a user-edited participant count when the cart changes.
///
/// The participant count auto-seeds from the cart's aggregate capacity but
/// is user-overridable; whether a manual edit survives later cart changes
/// is a product decision, so it is a policy knob rather than hard-coded.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ParticipantPolicy {
    /// Once the user has touched the field, cart changes stop reseeding it.
    #[default]
    PreserveUserEdits,
    /// Cart changes always reseed from aggregate capacity.
    ReseedOnCartChange,
}

/// The in-progress booking form state, minus the cart (which is shared).
///
/// Created fresh per booking flow; reset after a successful submission and
/// left intact on failure for retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    event_name: String,
    check_in: Option<CalendarDay>,
    check_out: Option<CalendarDay>,
    participants: u32,
    participants_touched: bool,
    package_id: Option<PackageId>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            event_name: String::new(),
            check_in: None,
            check_out: None,
            participants: 1,
            participants_touched: false,
            package_id: None,
        }
    }
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn check_in(&self) -> Option<CalendarDay> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<CalendarDay> {
        self.check_out
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    pub fn participants_touched(&self) -> bool {
        self.participants_touched
    }

    pub fn package_id(&self) -> Option<PackageId> {
        self.package_id
    }

    pub(crate) fn set_event_name(&mut self, name: impl Into<String>) {
        self.event_name = name.into();
    }

    pub(crate) fn set_dates(&mut self, check_in: CalendarDay, check_out: CalendarDay) {
        self.check_in = Some(check_in);
        self.check_out = Some(check_out);
    }

    /// Explicit user edit; last explicit user value wins over derived.
    pub(crate) fn set_participants(&mut self, count: u32) {
        self.participants = count;
        self.participants_touched = true;
    }

    /// Derived seed from the cart's aggregate capacity.
    ///
    /// Ignored for an empty cart (capacity 0 would make the draft invalid),
    /// and for a touched field under [`ParticipantPolicy::PreserveUserEdits`].
    pub(crate) fn seed_participants(&mut self, capacity: u32, policy: ParticipantPolicy) {
        if capacity == 0 {
            return;
        }
        let overridden =
            self.participants_touched && policy == ParticipantPolicy::PreserveUserEdits;
        if !overridden {
            self.participants = capacity;
        }
    }

    pub(crate) fn set_package(&mut self, package_id: Option<PackageId>) {
        self.package_id = package_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_respects_a_touched_field_by_default() {
        let mut draft = BookingDraft::new();
        draft.seed_participants(4, ParticipantPolicy::PreserveUserEdits);
        assert_eq!(draft.participants(), 4);

        draft.set_participants(10);
        draft.seed_participants(6, ParticipantPolicy::PreserveUserEdits);
        assert_eq!(draft.participants(), 10);
    }

    #[test]
    fn reseed_policy_clobbers_user_edits() {
        let mut draft = BookingDraft::new();
        draft.set_participants(10);
        draft.seed_participants(6, ParticipantPolicy::ReseedOnCartChange);
        assert_eq!(draft.participants(), 6);
    }

    #[test]
    fn empty_cart_never_seeds() {
        let mut draft = BookingDraft::new();
        draft.seed_participants(0, ParticipantPolicy::ReseedOnCartChange);
        assert_eq!(draft.participants(), 1);
    }
}
