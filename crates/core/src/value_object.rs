//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two values
/// with the same attributes are interchangeable. [`crate::Money`] and
/// [`crate::CalendarDay`] are the canonical examples here: a blocked date is
/// a blocked date regardless of where it came from.
///
/// The bounds (`Clone + PartialEq + Debug`) are the minimum needed to treat
/// a type as a value: copyable, comparable, loggable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
