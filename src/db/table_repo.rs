use rusqlite::{params, Connection};

use super::parse_id;
use crate::error::SeatingResult;
use crate::model::{Id, Invitation, Table};

pub fn insert(conn: &Connection, table: &Table) -> SeatingResult<()> {
    conn.execute(
        "INSERT INTO seating_tables (id, invitation_id, table_number, name, capacity)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            table.id.value.to_string(),
            table.invitation_id.value.to_string(),
            table.table_number,
            table.name,
            table.capacity,
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, table: &Table) -> SeatingResult<()> {
    conn.execute(
        "UPDATE seating_tables SET table_number = ?1, name = ?2, capacity = ?3 WHERE id = ?4",
        params![
            table.table_number,
            table.name,
            table.capacity,
            table.id.value.to_string(),
        ],
    )?;
    Ok(())
}

/// Deletes the table row. Returns whether a row was removed.
pub fn delete(conn: &Connection, id: Id<Table>) -> SeatingResult<bool> {
    let removed = conn.execute(
        "DELETE FROM seating_tables WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(removed > 0)
}

pub fn delete_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<usize> {
    let removed = conn.execute(
        "DELETE FROM seating_tables WHERE invitation_id = ?1",
        params![invitation_id.value.to_string()],
    )?;
    Ok(removed)
}

pub fn find_by_id(conn: &Connection, id: Id<Table>) -> SeatingResult<Option<Table>> {
    let mut stmt = conn.prepare(
        "SELECT id, invitation_id, table_number, name, capacity FROM seating_tables WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.value.to_string()], |row| Ok(row_to_table(row)));

    match result {
        Ok(table) => Ok(Some(table?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Tables of an invitation, ascending by table number.
pub fn find_by_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Table>> {
    let mut stmt = conn.prepare(
        "SELECT id, invitation_id, table_number, name, capacity FROM seating_tables
         WHERE invitation_id = ?1 ORDER BY table_number, name",
    )?;

    let tables = stmt
        .query_map(params![invitation_id.value.to_string()], |row| {
            Ok(row_to_table(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tables)
}

pub fn find_by_number(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    table_number: i32,
) -> SeatingResult<Option<Table>> {
    Ok(find_by_invitation(conn, invitation_id)?
        .into_iter()
        .find(|t| t.table_number == table_number))
}

pub fn max_table_number(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Option<i32>> {
    let max = conn.query_row(
        "SELECT MAX(table_number) FROM seating_tables WHERE invitation_id = ?1",
        params![invitation_id.value.to_string()],
        |row| row.get(0),
    )?;
    Ok(max)
}

fn row_to_table(row: &rusqlite::Row) -> SeatingResult<Table> {
    let id_str: String = row.get(0)?;
    let invitation_str: String = row.get(1)?;

    Ok(Table {
        id: parse_id(&id_str)?,
        invitation_id: parse_id(&invitation_str)?,
        table_number: row.get(2)?,
        name: row.get(3)?,
        capacity: row.get(4)?,
    })
}
