use serde::{Deserialize, Serialize};

use super::guest::Guest;
use super::ids::Id;
use super::table::Table;

/// How full a table is relative to its advisory capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityStatus {
    Open,
    Full,
    Over,
}

/// A table joined with the guests currently assigned to it.
/// Derived on every load and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct TableWithGuests {
    pub table: Table,
    pub guests: Vec<Guest>,
}

impl TableWithGuests {
    /// Each assigned guest plus one for each named plus-one.
    pub fn occupant_count(&self) -> usize {
        self.guests.iter().map(Guest::seat_count).sum()
    }

    pub fn free_seats(&self) -> i64 {
        i64::from(self.table.capacity) - self.occupant_count() as i64
    }

    pub fn capacity_status(&self) -> CapacityStatus {
        let occupants = self.occupant_count() as i64;
        let capacity = i64::from(self.table.capacity);
        if occupants < capacity {
            CapacityStatus::Open
        } else if occupants == capacity {
            CapacityStatus::Full
        } else {
            CapacityStatus::Over
        }
    }

    /// "occupants / capacity", e.g. "3 / 8".
    pub fn occupancy_label(&self) -> String {
        format!("{} / {}", self.occupant_count(), self.table.capacity)
    }

    pub fn contains(&self, guest_id: Id<Guest>) -> bool {
        self.guests.iter().any(|g| g.id == guest_id)
    }
}

/// What a guest element carries while being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub guest_id: Id<Guest>,
}
