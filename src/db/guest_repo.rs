use rusqlite::{params, Connection};

use super::parse_id;
use crate::error::SeatingResult;
use crate::model::{Guest, Id, Invitation};

const SELECT_COLUMNS: &str = "id, invitation_id, first_name, last_name, email, phone, category,
    plus_one_allowed, plus_one_name, dietary_restrictions, notes, invitation_sent";

pub fn insert(conn: &Connection, guest: &Guest) -> SeatingResult<()> {
    conn.execute(
        "INSERT INTO guests (id, invitation_id, first_name, last_name, email, phone, category,
         plus_one_allowed, plus_one_name, dietary_restrictions, notes, invitation_sent)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            guest.id.value.to_string(),
            guest.invitation_id.value.to_string(),
            guest.first_name,
            guest.last_name,
            guest.email,
            guest.phone,
            guest.category,
            guest.plus_one_allowed as i32,
            guest.plus_one_name,
            guest.dietary_restrictions,
            guest.notes,
            guest.invitation_sent as i32,
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, guest: &Guest) -> SeatingResult<()> {
    conn.execute(
        "UPDATE guests SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, category = ?5,
         plus_one_allowed = ?6, plus_one_name = ?7, dietary_restrictions = ?8, notes = ?9,
         invitation_sent = ?10, updated_at = datetime('now')
         WHERE id = ?11",
        params![
            guest.first_name,
            guest.last_name,
            guest.email,
            guest.phone,
            guest.category,
            guest.plus_one_allowed as i32,
            guest.plus_one_name,
            guest.dietary_restrictions,
            guest.notes,
            guest.invitation_sent as i32,
            guest.id.value.to_string(),
        ],
    )?;
    Ok(())
}

/// Sets the invitation-sent flag on every guest of an invitation.
/// Returns the number of rows changed.
pub fn set_all_invitation_sent(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    sent: bool,
) -> SeatingResult<usize> {
    let changed = conn.execute(
        "UPDATE guests SET invitation_sent = ?1, updated_at = datetime('now')
         WHERE invitation_id = ?2 AND invitation_sent != ?1",
        params![sent as i32, invitation_id.value.to_string()],
    )?;
    Ok(changed)
}

/// Deletes the guest row. Returns whether a row was removed.
pub fn delete(conn: &Connection, id: Id<Guest>) -> SeatingResult<bool> {
    let removed = conn.execute(
        "DELETE FROM guests WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(removed > 0)
}

pub fn delete_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<usize> {
    let removed = conn.execute(
        "DELETE FROM guests WHERE invitation_id = ?1",
        params![invitation_id.value.to_string()],
    )?;
    Ok(removed)
}

pub fn find_by_id(conn: &Connection, id: Id<Guest>) -> SeatingResult<Option<Guest>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM guests WHERE id = ?1",
        SELECT_COLUMNS
    ))?;

    let result = stmt.query_row(params![id.value.to_string()], |row| Ok(row_to_guest(row)));

    match result {
        Ok(guest) => Ok(Some(guest?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Guest>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM guests WHERE invitation_id = ?1
         ORDER BY last_name COLLATE NOCASE, first_name COLLATE NOCASE",
        SELECT_COLUMNS
    ))?;

    let guests = stmt
        .query_map(params![invitation_id.value.to_string()], |row| {
            Ok(row_to_guest(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(guests)
}

pub fn count_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM guests WHERE invitation_id = ?1",
        params![invitation_id.value.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_guest(row: &rusqlite::Row) -> SeatingResult<Guest> {
    let id_str: String = row.get(0)?;
    let invitation_str: String = row.get(1)?;

    Ok(Guest {
        id: parse_id(&id_str)?,
        invitation_id: parse_id(&invitation_str)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        category: row.get(6)?,
        plus_one_allowed: row.get::<_, i32>(7)? != 0,
        plus_one_name: row.get(8)?,
        dietary_restrictions: row.get(9)?,
        notes: row.get(10)?,
        invitation_sent: row.get::<_, i32>(11)? != 0,
    })
}
