//! Session durability for the cart.
//!
//! The cart survives reloads but is not server state; what gets persisted
//! is only the selected room ids, re-resolved against the live catalog on
//! restore so stale ids from an old session silently drop out.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use staybook_catalog::Room;
use staybook_core::RoomId;

use crate::store::CartStore;

/// Persisted form of the cart: room ids in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub room_ids: Vec<RoomId>,
}

impl CartSnapshot {
    pub fn of(store: &CartStore) -> Self {
        Self {
            room_ids: store.room_ids(),
        }
    }
}

/// Storage failure for session snapshots. Non-fatal by policy: a session
/// that cannot be saved or loaded degrades to an empty cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt session snapshot: {0}")]
    Corrupt(String),
}

/// Where cart snapshots live between reloads. The mechanism is the host's
/// choice (browser storage, a file, a keychain); the engine only needs
/// save/load/clear.
pub trait SessionStore: Send + Sync {
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), SessionStoreError>;
    fn load(&self) -> Result<Option<CartSnapshot>, SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// In-memory session store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: std::sync::RwLock<Option<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".into()))?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<CartSnapshot>, SessionStoreError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".into()))?;
        slot.as_deref()
            .map(|json| {
                serde_json::from_str(json).map_err(|e| SessionStoreError::Corrupt(e.to_string()))
            })
            .transpose()
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| SessionStoreError::Unavailable("lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}

/// Rebuild the store's selection from a snapshot against the current
/// catalog. Ids no longer in the catalog are dropped (a stale session must
/// not break browsing).
pub fn restore(store: &CartStore, snapshot: &CartSnapshot, catalog: &[Room]) {
    let rooms: Vec<Room> = snapshot
        .room_ids
        .iter()
        .filter_map(|id| catalog.iter().find(|r| r.room_id() == *id).cloned())
        .collect();
    let dropped = snapshot.room_ids.len() - rooms.len();
    if dropped > 0 {
        debug!(dropped, "session snapshot referenced rooms no longer in the catalog");
    }
    store.replace(rooms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use staybook_core::Money;

    fn room(name: &str) -> Room {
        Room::new(RoomId::new(), 2, Money::from_minor(1000), name).unwrap()
    }

    #[test]
    fn snapshot_round_trips_through_the_store() {
        let a = room("a");
        let b = room("b");
        let store = CartStore::new();
        store.add(a.clone());
        store.add(b.clone());

        let session = InMemorySessionStore::new();
        session.save(&CartSnapshot::of(&store)).unwrap();

        let restored_store = CartStore::new();
        let snapshot = session.load().unwrap().unwrap();
        restore(&restored_store, &snapshot, &[a.clone(), b.clone()]);
        assert_eq!(restored_store.room_ids(), vec![a.room_id(), b.room_id()]);
    }

    #[test]
    fn restore_drops_rooms_gone_from_catalog() {
        let kept = room("kept");
        let gone = room("gone");
        let snapshot = CartSnapshot {
            room_ids: vec![gone.room_id(), kept.room_id()],
        };
        let store = CartStore::new();
        restore(&store, &snapshot, &[kept.clone()]);
        assert_eq!(store.room_ids(), vec![kept.room_id()]);
    }

    #[test]
    fn empty_session_loads_as_none() {
        let session = InMemorySessionStore::new();
        assert_eq!(session.load().unwrap(), None);
        session.save(&CartSnapshot::default()).unwrap();
        session.clear().unwrap();
        assert_eq!(session.load().unwrap(), None);
    }
}
