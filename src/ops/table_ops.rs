use rusqlite::Connection;
use tracing::info;

use crate::db::{assignment_repo, table_repo};
use crate::error::{SeatingError, SeatingResult};
use crate::model::{Id, Invitation, Table, TableDraft, TablePatch};
use crate::ops::invitation_ops;
use crate::validation::{self, trim_optional};

/// Tables of the invitation, ascending by number.
pub fn list_tables(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Table>> {
    table_repo::find_by_invitation(conn, invitation_id)
}

/// The number offered for a new table: one past the highest in use.
pub fn next_table_number(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<i32> {
    Ok(table_repo::max_table_number(conn, invitation_id)?.map_or(1, |max| max + 1))
}

pub fn create_table(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    draft: TableDraft,
) -> SeatingResult<Table> {
    let capacity = validation::positive(draft.capacity, "capacity")?;
    invitation_ops::require(conn, invitation_id)?;

    let table_number = match draft.table_number {
        Some(n) => validation::positive(n, "table_number")?,
        None => next_table_number(conn, invitation_id)?,
    };
    ensure_number_free(conn, invitation_id, table_number, None)?;

    let table = Table {
        id: Id::generate(),
        invitation_id,
        table_number,
        name: trim_optional(draft.name.as_deref()),
        capacity,
    };

    table_repo::insert(conn, &table)?;
    info!(table = %table.id, number = table.table_number, capacity, "created table");
    Ok(table)
}

pub fn update_table(conn: &Connection, table_id: Id<Table>, patch: TablePatch) -> SeatingResult<Table> {
    let mut table = require(conn, table_id)?;

    if let Some(n) = patch.table_number {
        let n = validation::positive(n, "table_number")?;
        ensure_number_free(conn, table.invitation_id, n, Some(table.id))?;
        table.table_number = n;
    }
    if let Some(name) = patch.name {
        table.name = trim_optional(name.as_deref());
    }
    if let Some(capacity) = patch.capacity {
        table.capacity = validation::positive(capacity, "capacity")?;
    }

    table_repo::update(conn, &table)?;
    info!(table = %table.id, number = table.table_number, "updated table");
    Ok(table)
}

/// Deletes the table after releasing its guests back to the unassigned pool,
/// as one transaction. Returns how many guests were released.
pub fn delete_table(conn: &Connection, table_id: Id<Table>) -> SeatingResult<usize> {
    require(conn, table_id)?;

    let tx = conn.unchecked_transaction()?;
    let released = assignment_repo::delete_by_table(&tx, table_id)?;
    table_repo::delete(&tx, table_id)?;
    tx.commit()?;

    info!(table = %table_id, released, "deleted table");
    Ok(released)
}

pub fn require(conn: &Connection, table_id: Id<Table>) -> SeatingResult<Table> {
    table_repo::find_by_id(conn, table_id)?.ok_or_else(|| SeatingError::not_found("Table", table_id))
}

fn ensure_number_free(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    table_number: i32,
    except: Option<Id<Table>>,
) -> SeatingResult<()> {
    match table_repo::find_by_number(conn, invitation_id, table_number)? {
        Some(existing) if Some(existing.id) != except => Err(SeatingError::AlreadyExists {
            entity_type: "Table".into(),
            identifier: table_number.to_string(),
        }),
        _ => Ok(()),
    }
}
