use std::collections::HashSet;

use rusqlite::Connection;

use crate::db::assignment_repo;
use crate::error::SeatingResult;
use crate::model::{Guest, Id, Invitation, TableWithGuests};
use crate::ops::guest_ops;

/// Client-side guest search. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestFilter {
    /// Case-insensitive substring over first name, last name, full name, and email.
    pub query: Option<String>,
    /// Case-insensitive exact category match.
    pub category: Option<String>,
}

impl GuestFilter {
    pub fn search(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            category: None,
        }
    }

    pub fn in_category(category: &str) -> Self {
        Self {
            query: None,
            category: Some(category.to_string()),
        }
    }

    pub fn matches(&self, guest: &Guest) -> bool {
        let query_ok = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                guest.first_name.to_lowercase().contains(&q)
                    || guest.last_name.to_lowercase().contains(&q)
                    || guest.full_name().to_lowercase().contains(&q)
                    || guest
                        .email
                        .as_ref()
                        .is_some_and(|e| e.to_lowercase().contains(&q))
            }
        };

        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) => guest
                .category
                .as_deref()
                .is_some_and(|gc| gc.eq_ignore_ascii_case(c)),
        };

        query_ok && category_ok
    }

    pub fn apply<'a>(&self, guests: &'a [Guest]) -> Vec<&'a Guest> {
        guests.iter().filter(|g| self.matches(g)).collect()
    }
}

pub fn find_guests(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    filter: &GuestFilter,
) -> SeatingResult<Vec<Guest>> {
    Ok(guest_ops::list_guests(conn, invitation_id)?
        .into_iter()
        .filter(|g| filter.matches(g))
        .collect())
}

/// Guests without a seat, straight from the store.
pub fn unassigned_guests(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Guest>> {
    let seated: HashSet<Id<Guest>> = assignment_repo::find_by_invitation(conn, invitation_id)?
        .into_iter()
        .map(|a| a.guest_id)
        .collect();

    Ok(guest_ops::list_guests(conn, invitation_id)?
        .into_iter()
        .filter(|g| !seated.contains(&g.id))
        .collect())
}

/// `all - seated`, by guest id, preserving the order of `all`.
pub fn unassigned_from(all: &[Guest], tables: &[TableWithGuests]) -> Vec<Guest> {
    let seated: HashSet<Id<Guest>> = tables
        .iter()
        .flat_map(|t| t.guests.iter().map(|g| g.id))
        .collect();

    all.iter()
        .filter(|g| !seated.contains(&g.id))
        .cloned()
        .collect()
}
