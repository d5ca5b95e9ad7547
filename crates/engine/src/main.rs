//! Demo: walk one booking flow end to end over the in-memory
//! collaborators.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use staybook_availability::{BookingStatus, RoomCalendarSource, UserBookingSource};
use staybook_cart::InMemorySessionStore;
use staybook_catalog::{Package, Room};
use staybook_composer::{BookingGateway, ParticipantPolicy};
use staybook_core::{CalendarDay, Money, MonthView, PackageId, RoomId, UserId};
use staybook_engine::BookingSession;
use staybook_infra::{InMemoryBookingDesk, InMemoryCalendar, StayRecord};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    staybook_observability::init();

    let cedar = Room::new(RoomId::new(), 4, Money::from_minor(120_00), "Cedar")?;
    let birch = Room::new(RoomId::new(), 2, Money::from_minor(90_00), "Birch")?;
    let full_board = Package::new(
        PackageId::new(),
        Money::from_minor(25_00),
        true,
        true,
        "Full board",
    );

    // Someone else already holds Cedar for the 10th through the 12th.
    let calendar = Arc::new(InMemoryCalendar::new());
    calendar.seed(StayRecord {
        room_id: cedar.room_id(),
        user_id: UserId::new(),
        status: BookingStatus::Paid,
        check_in: CalendarDay::from_ymd(2026, 6, 10)?,
        check_out: CalendarDay::from_ymd(2026, 6, 12)?,
    });
    let desk = Arc::new(InMemoryBookingDesk::new());

    let mut session = BookingSession::new(
        Arc::clone(&calendar) as Arc<dyn RoomCalendarSource>,
        Arc::clone(&calendar) as Arc<dyn UserBookingSource>,
        Arc::clone(&desk) as Arc<dyn BookingGateway>,
        Arc::new(InMemorySessionStore::new()),
        vec![full_board.clone()],
        ParticipantPolicy::default(),
        Some(UserId::new()),
    );

    session.add_room(cedar);
    session.add_room(birch);
    session.refresh_availability().await;

    let today = CalendarDay::from_ymd(2026, 6, 1)?;
    let june = MonthView { year: 2026, month: 6 };
    for day in [10u32, 15] {
        let date = CalendarDay::from_ymd(2026, 6, day)?;
        info!(%date, status = ?session.classify(date, today, june), "calendar cell");
    }

    session.set_dates(
        CalendarDay::from_ymd(2026, 6, 15)?,
        CalendarDay::from_ymd(2026, 6, 18)?,
    )?;
    session.set_event_name("Midsummer retreat")?;
    session.select_package(Some(full_board.package_id()))?;

    let quote = session.quote()?;
    info!(rooms = %quote.room_total, packages = %quote.package_total, total = %quote.total, "quoted");

    let response = session.submit().await?;
    info!(success = response.success, accepted = desk.accepted().len(), "submitted");

    Ok(())
}
