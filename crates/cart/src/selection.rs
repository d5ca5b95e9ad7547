use staybook_catalog::Room;
use staybook_core::RoomId;

/// The in-progress set of selected rooms for one booking.
///
/// A set by id (adding an already-present room is a no-op) with insertion
/// order preserved for display ("+N others").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionCart {
    entries: Vec<Room>,
}

impl SelectionCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `room` if not already present. Returns whether the cart
    /// changed.
    pub fn add(&mut self, room: Room) -> bool {
        if self.contains(room.room_id()) {
            return false;
        }
        self.entries.push(room);
        true
    }

    /// Remove the entry with `id`. Returns whether the cart changed.
    pub fn remove(&mut self, id: RoomId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.room_id() != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.entries.iter().any(|r| r.room_id() == id)
    }

    /// Sum of room capacities; 0 for an empty cart.
    pub fn aggregate_capacity(&self) -> u32 {
        self.entries.iter().map(Room::capacity).sum()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.entries
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.entries.iter().map(Room::room_id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
