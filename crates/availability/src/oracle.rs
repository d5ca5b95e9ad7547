use tracing::{debug, warn};

use staybook_core::{CalendarDay, MonthView, RoomId, UserId};

use crate::block_set::DateBlockSet;
use crate::source::{FetchError, RoomCalendarSource, UserBookingSource};

/// Calendar-cell classification for rendering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// Outside the displayed month, or strictly in the past.
    Locked,
    /// Blocked by a room booking or by one of the user's own bookings.
    Reserved,
    /// Free to select.
    Open,
}

/// Snapshot of the room selection a fetch was issued for.
///
/// Sorted and de-duplicated so two snapshots of the same logical selection
/// compare equal regardless of cart insertion order. A late fetch result is
/// applied only if its key still matches the live selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionKey(Vec<RoomId>);

impl SelectionKey {
    fn of(ids: impl IntoIterator<Item = RoomId>) -> Self {
        let mut ids: Vec<RoomId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn room_ids(&self) -> &[RoomId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Merges per-room blocked dates with the user's own booking dates and
/// classifies calendar days for the UI.
///
/// The oracle is locally authoritative for UX only; the server remains the
/// arbiter of real conflicts at submission time. Fetch failures degrade to
/// the last-known sets with [`AvailabilityOracle::is_degraded`] raised; they
/// never surface as errors.
#[derive(Debug, Default)]
pub struct AvailabilityOracle {
    selection: SelectionKey,
    room_blocks: DateBlockSet,
    user_blocks: DateBlockSet,
    room_degraded: bool,
    user_degraded: bool,
}

impl AvailabilityOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current room selection. Call [`refresh_room_blocks`]
    /// (or the split fetch/apply pair) afterwards to bring blocks up to
    /// date.
    ///
    /// [`refresh_room_blocks`]: AvailabilityOracle::refresh_room_blocks
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = RoomId>) {
        self.selection = SelectionKey::of(ids);
    }

    /// Snapshot key for an about-to-be-issued room-blocks fetch.
    pub fn selection_key(&self) -> SelectionKey {
        self.selection.clone()
    }

    /// One-shot refresh of room blocks for the current selection.
    ///
    /// An empty selection yields an empty set without touching the source
    /// (no wasted round trip).
    pub async fn refresh_room_blocks<S>(&mut self, source: &S)
    where
        S: RoomCalendarSource + ?Sized,
    {
        let key = self.selection_key();
        if key.is_empty() {
            self.room_blocks = DateBlockSet::empty();
            self.room_degraded = false;
            return;
        }
        let result = source.blocked_stays(key.room_ids()).await;
        self.apply_room_blocks(key, result);
    }

    /// Apply the outcome of a room-blocks fetch issued under `key`.
    ///
    /// This is the staleness gate for overlapping fetches: if the selection
    /// has changed since the fetch was issued, the result is discarded.
    /// A late response must not re-open dates that no longer apply, nor
    /// block dates for rooms the user removed.
    pub fn apply_room_blocks(
        &mut self,
        key: SelectionKey,
        result: Result<Vec<crate::stay::BookedStay>, FetchError>,
    ) {
        if key != self.selection {
            debug!(
                requested = key.room_ids().len(),
                current = self.selection.room_ids().len(),
                "discarding stale room-blocks fetch"
            );
            return;
        }
        match result {
            Ok(stays) => {
                self.room_blocks = DateBlockSet::from_stays(&stays);
                self.room_degraded = false;
            }
            Err(err) => {
                // Keep the last-known set; browsing must not hard-fail.
                warn!(error = %err, "room-blocks fetch failed; keeping last-known blocks");
                self.room_degraded = true;
            }
        }
    }

    /// Refresh the user's own blocked dates. Anonymous callers (`None`) get
    /// an empty set without a network call.
    pub async fn refresh_user_blocks<S>(&mut self, source: &S, user: Option<UserId>)
    where
        S: UserBookingSource + ?Sized,
    {
        let Some(user) = user else {
            self.user_blocks = DateBlockSet::empty();
            self.user_degraded = false;
            return;
        };
        match source.user_stays(user).await {
            Ok(stays) => {
                self.user_blocks = DateBlockSet::from_stays(&stays);
                self.user_degraded = false;
            }
            Err(err) => {
                warn!(error = %err, "user-blocks fetch failed; keeping last-known blocks");
                self.user_degraded = true;
            }
        }
    }

    pub fn room_blocks(&self) -> &DateBlockSet {
        &self.room_blocks
    }

    pub fn user_blocks(&self) -> &DateBlockSet {
        &self.user_blocks
    }

    /// Whether `day` is blocked by either source.
    pub fn is_blocked(&self, day: CalendarDay) -> bool {
        self.room_blocks.contains(day) || self.user_blocks.contains(day)
    }

    /// True when the most recent fetch on either source failed and the
    /// blocks shown may be stale. Surfaced to the UI as a soft warning.
    pub fn is_degraded(&self) -> bool {
        self.room_degraded || self.user_degraded
    }

    /// Classify a calendar cell. Pure given the oracle's current block
    /// sets: same (day, today, month) always yields the same status.
    pub fn classify(&self, day: CalendarDay, today: CalendarDay, month: MonthView) -> DayStatus {
        if !month.contains(day) || day < today {
            DayStatus::Locked
        } else if self.is_blocked(day) {
            DayStatus::Reserved
        } else {
            DayStatus::Open
        }
    }

    /// Combined predicate for the date picker: not blocked and not in the
    /// past.
    pub fn is_selectable(&self, day: CalendarDay, today: CalendarDay) -> bool {
        !self.is_blocked(day) && day >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::{BookedStay, BookingStatus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn d(y: i32, m: u32, day: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, day).unwrap()
    }

    fn stay(room_id: RoomId, from: CalendarDay, to: CalendarDay) -> BookedStay {
        BookedStay {
            room_id,
            status: BookingStatus::Approved,
            check_in: from,
            check_out: to,
        }
    }

    /// Fake calendar with a canned answer and a call counter.
    struct FakeCalendar {
        stays: Vec<BookedStay>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeCalendar {
        fn answering(stays: Vec<BookedStay>) -> Self {
            Self {
                stays,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                stays: vec![],
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RoomCalendarSource for FakeCalendar {
        async fn blocked_stays(
            &self,
            room_ids: &[RoomId],
        ) -> Result<Vec<BookedStay>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Transport("connection reset".into()));
            }
            Ok(self
                .stays
                .iter()
                .filter(|s| room_ids.contains(&s.room_id))
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl UserBookingSource for FakeCalendar {
        async fn user_stays(&self, _user: UserId) -> Result<Vec<BookedStay>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Transport("connection reset".into()));
            }
            Ok(self.stays.clone())
        }
    }

    #[tokio::test]
    async fn empty_selection_skips_the_network() {
        let calendar = FakeCalendar::answering(vec![]);
        let mut oracle = AvailabilityOracle::new();
        oracle.refresh_room_blocks(&calendar).await;
        assert_eq!(calendar.calls.load(Ordering::SeqCst), 0);
        assert!(oracle.room_blocks().is_empty());
    }

    #[tokio::test]
    async fn refresh_scopes_blocks_to_selected_rooms() {
        let selected = RoomId::new();
        let other = RoomId::new();
        let calendar = FakeCalendar::answering(vec![
            stay(selected, d(2025, 8, 1), d(2025, 8, 2)),
            stay(other, d(2025, 8, 10), d(2025, 8, 11)),
        ]);
        let mut oracle = AvailabilityOracle::new();
        oracle.set_selection([selected]);
        oracle.refresh_room_blocks(&calendar).await;
        assert!(oracle.is_blocked(d(2025, 8, 1)));
        assert!(!oracle.is_blocked(d(2025, 8, 10)));
    }

    #[tokio::test]
    async fn stale_fetch_result_is_discarded() {
        let first = RoomId::new();
        let second = RoomId::new();
        let mut oracle = AvailabilityOracle::new();
        oracle.set_selection([first]);
        let in_flight = oracle.selection_key();

        // Selection changes while the fetch is in flight.
        oracle.set_selection([second]);
        oracle.apply_room_blocks(
            in_flight,
            Ok(vec![stay(first, d(2025, 8, 1), d(2025, 8, 3))]),
        );
        assert!(oracle.room_blocks().is_empty());

        // A result for the live selection still lands.
        oracle.apply_room_blocks(
            oracle.selection_key(),
            Ok(vec![stay(second, d(2025, 8, 5), d(2025, 8, 6))]),
        );
        assert!(oracle.is_blocked(d(2025, 8, 5)));
    }

    #[tokio::test]
    async fn fetch_failure_keeps_last_known_and_degrades() {
        let room = RoomId::new();
        let good = FakeCalendar::answering(vec![stay(room, d(2025, 8, 1), d(2025, 8, 2))]);
        let bad = FakeCalendar::failing();

        let mut oracle = AvailabilityOracle::new();
        oracle.set_selection([room]);
        oracle.refresh_room_blocks(&good).await;
        assert!(!oracle.is_degraded());

        oracle.refresh_room_blocks(&bad).await;
        assert!(oracle.is_degraded());
        // last-known survives the failure
        assert!(oracle.is_blocked(d(2025, 8, 1)));

        oracle.refresh_room_blocks(&good).await;
        assert!(!oracle.is_degraded());
    }

    #[tokio::test]
    async fn anonymous_user_gets_empty_blocks_without_a_call() {
        let calendar = FakeCalendar::answering(vec![]);
        let mut oracle = AvailabilityOracle::new();
        oracle.refresh_user_blocks(&calendar, None).await;
        assert_eq!(calendar.calls.load(Ordering::SeqCst), 0);
        assert!(oracle.user_blocks().is_empty());
    }

    #[tokio::test]
    async fn user_only_conflict_still_classifies_reserved() {
        // A date blocked only by the user's own booking elsewhere.
        let calendar = FakeCalendar::answering(vec![stay(
            RoomId::new(),
            d(2025, 9, 10),
            d(2025, 9, 12),
        )]);
        let mut oracle = AvailabilityOracle::new();
        oracle.refresh_user_blocks(&calendar, Some(UserId::new())).await;

        let today = d(2025, 9, 1);
        let month = MonthView { year: 2025, month: 9 };
        assert_eq!(oracle.classify(d(2025, 9, 11), today, month), DayStatus::Reserved);
        assert!(!oracle.is_selectable(d(2025, 9, 11), today));
    }

    #[test]
    fn classify_locks_past_and_other_months() {
        let oracle = AvailabilityOracle::new();
        let today = d(2025, 9, 15);
        let month = MonthView { year: 2025, month: 9 };
        assert_eq!(oracle.classify(d(2025, 9, 14), today, month), DayStatus::Locked);
        assert_eq!(oracle.classify(d(2025, 10, 1), today, month), DayStatus::Locked);
        assert_eq!(oracle.classify(d(2025, 9, 15), today, month), DayStatus::Open);
    }

    #[test]
    fn classify_is_pure() {
        let mut oracle = AvailabilityOracle::new();
        oracle.apply_room_blocks(
            oracle.selection_key(),
            Ok(vec![]),
        );
        let today = d(2025, 9, 15);
        let month = MonthView { year: 2025, month: 9 };
        let first = oracle.classify(d(2025, 9, 20), today, month);
        for _ in 0..3 {
            assert_eq!(oracle.classify(d(2025, 9, 20), today, month), first);
        }
    }
}
