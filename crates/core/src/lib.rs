//! `staybook-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, calendar-day values, minor-unit money, and the
//! shared domain error model.

pub mod day;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use day::{CalendarDay, MonthView};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BookingId, PackageId, RoomId, UserId};
pub use money::Money;
pub use value_object::ValueObject;
