//! Room selection cart: ordered, duplicate-free, shared between views.
//!
//! The cart is the one shared mutable resource between the catalog view and
//! the booking-composition view. It is modelled as an explicitly-owned
//! [`CartStore`] handed to every consumer (no ambient global state), with
//! subscriber notifications for reactive UI updates, plus a serde snapshot
//! for session durability.

pub mod selection;
pub mod session;
pub mod store;

pub use selection::SelectionCart;
pub use session::{restore, CartSnapshot, InMemorySessionStore, SessionStore, SessionStoreError};
pub use store::{CartEvent, CartStore, Subscription};
