use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use staybook_availability::{
    BookedStay, BookingStatus, FetchError, RoomCalendarSource, UserBookingSource,
};
use staybook_core::{CalendarDay, RoomId, UserId};

/// One row of the in-memory booking table: who booked which room, when,
/// and in what status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRecord {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub status: BookingStatus,
    pub check_in: CalendarDay,
    pub check_out: CalendarDay,
}

impl StayRecord {
    fn to_stay(&self) -> BookedStay {
        BookedStay {
            room_id: self.room_id,
            status: self.status,
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// In-memory calendar backing both availability sources.
///
/// `fail_next_*` arms a one-shot transport failure so tests can drive the
/// oracle's degraded path deterministically.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    records: RwLock<Vec<StayRecord>>,
    fail_next_rooms: AtomicBool,
    fail_next_user: AtomicBool,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, record: StayRecord) {
        if let Ok(mut records) = self.records.write() {
            records.push(record);
        }
    }

    /// Arm a one-shot transport failure for the next room-blocks fetch.
    pub fn fail_next_rooms(&self) {
        self.fail_next_rooms.store(true, Ordering::SeqCst);
    }

    /// Arm a one-shot transport failure for the next user-blocks fetch.
    pub fn fail_next_user(&self) {
        self.fail_next_user.store(true, Ordering::SeqCst);
    }

    fn read(&self) -> Result<Vec<StayRecord>, FetchError> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|_| FetchError::Backend("calendar table poisoned".into()))
    }
}

#[async_trait]
impl RoomCalendarSource for InMemoryCalendar {
    async fn blocked_stays(&self, room_ids: &[RoomId]) -> Result<Vec<BookedStay>, FetchError> {
        if self.fail_next_rooms.swap(false, Ordering::SeqCst) {
            return Err(FetchError::Transport("injected failure".into()));
        }
        Ok(self
            .read()?
            .iter()
            .filter(|r| room_ids.contains(&r.room_id))
            .map(StayRecord::to_stay)
            .collect())
    }
}

#[async_trait]
impl UserBookingSource for InMemoryCalendar {
    async fn user_stays(&self, user: UserId) -> Result<Vec<BookedStay>, FetchError> {
        if self.fail_next_user.swap(false, Ordering::SeqCst) {
            return Err(FetchError::Transport("injected failure".into()));
        }
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.user_id == user)
            .map(StayRecord::to_stay)
            .collect())
    }
}
