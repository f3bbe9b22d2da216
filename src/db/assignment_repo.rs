use rusqlite::{params, Connection};

use super::{parse_id, parse_timestamp};
use crate::error::SeatingResult;
use crate::model::{Assignment, Guest, Id, Invitation, Table};

/// Puts the assignment for `assignment.guest_id`, replacing any previous one.
/// Keyed by guest, so this is a single statement: there is never a moment
/// where the guest holds two seats or none.
pub fn upsert(conn: &Connection, assignment: &Assignment) -> SeatingResult<()> {
    conn.execute(
        "INSERT INTO assignments (guest_id, table_id, created_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(guest_id) DO UPDATE SET
             table_id = excluded.table_id,
             created_at = excluded.created_at",
        params![
            assignment.guest_id.value.to_string(),
            assignment.table_id.value.to_string(),
            assignment.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Removes the guest's assignment. Returns whether one existed.
pub fn delete_by_guest(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<bool> {
    let removed = conn.execute(
        "DELETE FROM assignments WHERE guest_id = ?1",
        params![guest_id.value.to_string()],
    )?;
    Ok(removed > 0)
}

/// Removes every assignment pointing at the table. Returns how many.
pub fn delete_by_table(conn: &Connection, table_id: Id<Table>) -> SeatingResult<usize> {
    let removed = conn.execute(
        "DELETE FROM assignments WHERE table_id = ?1",
        params![table_id.value.to_string()],
    )?;
    Ok(removed)
}

pub fn delete_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<usize> {
    let removed = conn.execute(
        "DELETE FROM assignments WHERE guest_id IN
             (SELECT id FROM guests WHERE invitation_id = ?1)",
        params![invitation_id.value.to_string()],
    )?;
    Ok(removed)
}

pub fn find_by_guest(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<Option<Assignment>> {
    let mut stmt = conn.prepare(
        "SELECT guest_id, table_id, created_at FROM assignments WHERE guest_id = ?1",
    )?;

    let result: rusqlite::Result<(String, String, String)> =
        stmt.query_row(params![guest_id.value.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        });

    match result {
        Ok(fields) => Ok(Some(to_assignment(fields)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_table(conn: &Connection, table_id: Id<Table>) -> SeatingResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(
        "SELECT guest_id, table_id, created_at FROM assignments
         WHERE table_id = ?1 ORDER BY created_at",
    )?;

    let rows: Vec<(String, String, String)> = stmt
        .query_map(params![table_id.value.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(to_assignment).collect()
}

/// All assignments whose guest belongs to the invitation.
pub fn find_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(
        "SELECT a.guest_id, a.table_id, a.created_at FROM assignments a
         JOIN guests g ON g.id = a.guest_id
         WHERE g.invitation_id = ?1
         ORDER BY a.created_at",
    )?;

    let rows: Vec<(String, String, String)> = stmt
        .query_map(params![invitation_id.value.to_string()], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(to_assignment).collect()
}

pub fn count_by_guest(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM assignments WHERE guest_id = ?1",
        params![guest_id.value.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn to_assignment(
    (guest_str, table_str, created_at): (String, String, String),
) -> SeatingResult<Assignment> {
    Ok(Assignment {
        guest_id: parse_id(&guest_str)?,
        table_id: parse_id(&table_str)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
