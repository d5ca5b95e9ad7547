use serde::{Deserialize, Serialize};

use staybook_core::{DomainError, DomainResult, Entity, Money, RoomId};

/// A bookable room as published by the catalog collaborator.
///
/// Immutable from this engine's perspective. Unknown display-only fields on
/// the wire are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    capacity: u32,
    /// Nightly price in minor currency units.
    price: Money,
    name: String,
}

impl Room {
    pub fn new(
        id: RoomId,
        capacity: u32,
        price: Money,
        name: impl Into<String>,
    ) -> DomainResult<Self> {
        if capacity == 0 {
            return Err(DomainError::validation("room capacity must be positive"));
        }
        Ok(Self {
            id,
            capacity,
            price,
            name: name.into(),
        })
    }

    pub fn room_id(&self) -> RoomId {
        self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn nightly_price(&self) -> Money {
        self.price
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Room {
    type Id = RoomId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
