use rusqlite::{params, Connection};

use super::{parse_id, parse_timestamp};
use crate::error::SeatingResult;
use crate::model::{Id, Invitation};

pub fn insert(conn: &Connection, invitation: &Invitation) -> SeatingResult<()> {
    conn.execute(
        "INSERT INTO invitations (id, title, created_at) VALUES (?1, ?2, ?3)",
        params![
            invitation.id.value.to_string(),
            invitation.title,
            invitation.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_title(conn: &Connection, id: Id<Invitation>, title: &str) -> SeatingResult<()> {
    conn.execute(
        "UPDATE invitations SET title = ?1 WHERE id = ?2",
        params![title, id.value.to_string()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Invitation>) -> SeatingResult<Option<Invitation>> {
    let mut stmt = conn.prepare("SELECT id, title, created_at FROM invitations WHERE id = ?1")?;

    let result = stmt.query_row(params![id.value.to_string()], |row| {
        let id_str: String = row.get(0)?;
        let title: String = row.get(1)?;
        let created_at: String = row.get(2)?;
        Ok((id_str, title, created_at))
    });

    match result {
        Ok(fields) => Ok(Some(to_invitation(fields)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_all(conn: &Connection) -> SeatingResult<Vec<Invitation>> {
    let mut stmt =
        conn.prepare("SELECT id, title, created_at FROM invitations ORDER BY created_at, title")?;

    let rows: Vec<(String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(to_invitation).collect()
}

pub fn exists(conn: &Connection, id: Id<Invitation>) -> SeatingResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM invitations WHERE id = ?1",
        params![id.value.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Deletes the invitation row only. Children must already be gone.
pub fn delete(conn: &Connection, id: Id<Invitation>) -> SeatingResult<()> {
    conn.execute(
        "DELETE FROM invitations WHERE id = ?1",
        params![id.value.to_string()],
    )?;
    Ok(())
}

fn to_invitation((id_str, title, created_at): (String, String, String)) -> SeatingResult<Invitation> {
    Ok(Invitation {
        id: parse_id(&id_str)?,
        title,
        created_at: parse_timestamp(&created_at)?,
    })
}
