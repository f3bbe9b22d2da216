use std::collections::HashMap;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::config::SeatingPolicy;
use crate::db::{assignment_repo, guest_repo, table_repo};
use crate::error::{SeatingError, SeatingResult};
use crate::model::{Assignment, Guest, Id, Invitation, Table, TableWithGuests};

/// Seats the guest at the table, replacing any previous seat.
///
/// Both ids must belong to `invitation_id`, otherwise `ForeignKey`. With
/// `policy.enforce_capacity` the move is refused when the guest (and their
/// named plus-one) would not fit.
pub fn assign(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    guest_id: Id<Guest>,
    table_id: Id<Table>,
    policy: SeatingPolicy,
) -> SeatingResult<Assignment> {
    let guest = guest_in(conn, invitation_id, guest_id)?;
    let table = table_repo::find_by_id(conn, table_id)?
        .filter(|t| t.invitation_id == invitation_id)
        .ok_or_else(|| SeatingError::foreign_key("Table", table_id, invitation_id))?;

    if policy.enforce_capacity {
        ensure_fits(conn, &guest, &table)?;
    }

    let previous = assignment_repo::find_by_guest(conn, guest_id)?.map(|a| a.table_id);
    let assignment = Assignment::create(guest_id, table_id);
    assignment_repo::upsert(conn, &assignment)?;

    info!(
        guest = %guest_id,
        table = table.table_number,
        moved_from = ?previous,
        "assigned guest"
    );
    Ok(assignment)
}

/// Returns the guest to the unassigned pool. Returns whether a seat was freed;
/// an already unassigned guest is not an error.
pub fn unassign(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    guest_id: Id<Guest>,
) -> SeatingResult<bool> {
    guest_in(conn, invitation_id, guest_id)?;
    let removed = assignment_repo::delete_by_guest(conn, guest_id)?;
    if removed {
        info!(guest = %guest_id, "unassigned guest");
    } else {
        debug!(guest = %guest_id, "guest was not seated");
    }
    Ok(removed)
}

/// The table the guest currently sits at, if any.
pub fn table_of(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<Option<Id<Table>>> {
    Ok(assignment_repo::find_by_guest(conn, guest_id)?.map(|a| a.table_id))
}

/// Every table of the invitation, in number order, with its seated guests.
/// Unseated guests appear in no entry.
pub fn list_with_guests(
    conn: &Connection,
    invitation_id: Id<Invitation>,
) -> SeatingResult<Vec<TableWithGuests>> {
    let tables = table_repo::find_by_invitation(conn, invitation_id)?;
    let guests = guest_repo::find_by_invitation(conn, invitation_id)?;
    let assignments = assignment_repo::find_by_invitation(conn, invitation_id)?;
    Ok(join_tables(tables, &guests, &assignments))
}

/// Joins tables and guests through the assignment set. Guest order within a
/// table follows the order of `guests`.
pub fn join_tables(
    tables: Vec<Table>,
    guests: &[Guest],
    assignments: &[Assignment],
) -> Vec<TableWithGuests> {
    let seat_of: HashMap<Id<Guest>, Id<Table>> = assignments
        .iter()
        .map(|a| (a.guest_id, a.table_id))
        .collect();

    tables
        .into_iter()
        .map(|table| {
            let seated = guests
                .iter()
                .filter(|g| seat_of.get(&g.id) == Some(&table.id))
                .cloned()
                .collect();
            TableWithGuests {
                table,
                guests: seated,
            }
        })
        .collect()
}

fn guest_in(conn: &Connection, invitation_id: Id<Invitation>, guest_id: Id<Guest>) -> SeatingResult<Guest> {
    guest_repo::find_by_id(conn, guest_id)?
        .filter(|g| g.invitation_id == invitation_id)
        .ok_or_else(|| SeatingError::foreign_key("Guest", guest_id, invitation_id))
}

fn ensure_fits(conn: &Connection, guest: &Guest, table: &Table) -> SeatingResult<()> {
    let mut occupants = 0usize;
    for assignment in assignment_repo::find_by_table(conn, table.id)? {
        if assignment.guest_id == guest.id {
            continue;
        }
        if let Some(seated) = guest_repo::find_by_id(conn, assignment.guest_id)? {
            occupants += seated.seat_count();
        }
    }

    let needed = occupants + guest.seat_count();
    if needed as i64 > i64::from(table.capacity) {
        return Err(SeatingError::CapacityExceeded {
            table_number: table.table_number,
            occupants,
            capacity: table.capacity,
        });
    }
    Ok(())
}
