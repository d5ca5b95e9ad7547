//! Shared cart store with change notifications.
//!
//! One `Arc<CartStore>` instance is handed to every consumer (catalog view,
//! composer, session persistence). Mutations are synchronous and
//! immediately observable; subscribers receive a [`CartEvent`] per actual
//! change (an idempotent add publishes nothing).

use std::sync::{Mutex, mpsc};

use tracing::debug;

use staybook_catalog::Room;
use staybook_core::RoomId;

use crate::selection::SelectionCart;

/// A change to the shared cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    RoomAdded(RoomId),
    RoomRemoved(RoomId),
    Cleared,
}

/// A subscription to cart changes.
///
/// Designed for single-threaded consumption by one view; poll with
/// [`Subscription::try_recv`] from the host event loop.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: mpsc::Receiver<M>,
}

impl<M> Subscription<M> {
    fn new(receiver: mpsc::Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }
}

/// Explicitly-owned shared cart.
///
/// The internal lock exists for `Arc` sharing between views, not for true
/// parallelism (UI events are serialized by the host's event loop). A
/// poisoned lock falls back to a default (empty) cart view rather than
/// panicking a browsing flow.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Mutex<SelectionCart>,
    subscribers: Mutex<Vec<mpsc::Sender<CartEvent>>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room; no-op (and no event) if already present.
    pub fn add(&self, room: Room) -> bool {
        let id = room.room_id();
        let changed = self.with_cart(|cart| cart.add(room));
        if changed {
            self.publish(CartEvent::RoomAdded(id));
        }
        changed
    }

    /// Remove a room by id; no-op (and no event) if absent.
    pub fn remove(&self, id: RoomId) -> bool {
        let changed = self.with_cart(|cart| cart.remove(id));
        if changed {
            self.publish(CartEvent::RoomRemoved(id));
        }
        changed
    }

    /// Empty the cart (logout, successful submission).
    pub fn clear(&self) {
        let was_empty = self.with_cart(|cart| {
            let empty = cart.is_empty();
            cart.clear();
            empty
        });
        if !was_empty {
            self.publish(CartEvent::Cleared);
        }
    }

    /// Clone of the current selection.
    pub fn snapshot(&self) -> SelectionCart {
        self.with_cart(|cart| cart.clone())
    }

    pub fn aggregate_capacity(&self) -> u32 {
        self.with_cart(|cart| cart.aggregate_capacity())
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.with_cart(|cart| cart.room_ids())
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(|cart| cart.is_empty())
    }

    /// Replace the whole selection (session restore). Publishes a single
    /// `Cleared` followed by `RoomAdded` per entry.
    pub fn replace(&self, rooms: impl IntoIterator<Item = Room>) {
        self.clear();
        for room in rooms {
            self.add(room);
        }
    }

    pub fn subscribe(&self) -> Subscription<CartEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription::new(rx)
    }

    fn with_cart<T>(&self, f: impl FnOnce(&mut SelectionCart) -> T) -> T {
        match self.cart.lock() {
            Ok(mut cart) => f(&mut cart),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn publish(&self, event: CartEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            debug!("cart subscriber lock poisoned; dropping event");
            return;
        };
        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
