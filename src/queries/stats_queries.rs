use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::error::SeatingResult;
use crate::model::{Guest, Id, Invitation};
use crate::ops::{assignment_ops, guest_ops};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestStats {
    pub total: usize,
    pub with_plus_one: usize,
    pub invited: usize,
    /// Distinct non-empty category -> number of guests in it.
    pub categories: BTreeMap<String, usize>,
}

impl GuestStats {
    pub fn from_guests(guests: &[Guest]) -> Self {
        let mut categories = BTreeMap::new();
        for category in guests.iter().filter_map(|g| g.category.as_deref()) {
            let category = category.trim();
            if !category.is_empty() {
                *categories.entry(category.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            total: guests.len(),
            with_plus_one: guests.iter().filter(|g| g.plus_one_allowed).count(),
            invited: guests.iter().filter(|g| g.invitation_sent).count(),
            categories,
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

pub fn guest_stats(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<GuestStats> {
    Ok(GuestStats::from_guests(&guest_ops::list_guests(conn, invitation_id)?))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatingStats {
    pub tables: usize,
    pub total_seats: i64,
    pub occupied_seats: usize,
    pub assigned_guests: usize,
    pub unassigned_guests: usize,
    /// Table numbers seated beyond their capacity.
    pub over_capacity: Vec<i32>,
}

pub fn seating_stats(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<SeatingStats> {
    let guests = guest_ops::list_guests(conn, invitation_id)?;
    let tables = assignment_ops::list_with_guests(conn, invitation_id)?;

    let assigned_guests: usize = tables.iter().map(|t| t.guests.len()).sum();

    Ok(SeatingStats {
        tables: tables.len(),
        total_seats: tables.iter().map(|t| i64::from(t.table.capacity)).sum(),
        occupied_seats: tables.iter().map(|t| t.occupant_count()).sum(),
        assigned_guests,
        unassigned_guests: guests.len().saturating_sub(assigned_guests),
        over_capacity: tables
            .iter()
            .filter(|t| t.free_seats() < 0)
            .map(|t| t.table.table_number)
            .collect(),
    })
}
