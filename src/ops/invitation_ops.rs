use rusqlite::Connection;
use tracing::info;

use crate::db::{assignment_repo, guest_repo, invitation_repo, table_repo};
use crate::error::{SeatingError, SeatingResult};
use crate::model::{Id, Invitation};
use crate::validation;

pub fn create_invitation(conn: &Connection, title: &str) -> SeatingResult<Invitation> {
    let valid_title = validation::non_blank(title, "title")?;
    let invitation = Invitation::create(valid_title);
    invitation_repo::insert(conn, &invitation)?;
    info!(invitation = %invitation.id, title = %invitation.title, "created invitation");
    Ok(invitation)
}

pub fn rename_invitation(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    title: &str,
) -> SeatingResult<Invitation> {
    let mut invitation = require(conn, invitation_id)?;
    invitation.title = validation::non_blank(title, "title")?;
    invitation_repo::update_title(conn, invitation_id, &invitation.title)?;
    Ok(invitation)
}

/// Deletes an invitation with its assignments, guests, and tables, all or nothing.
pub fn delete_invitation(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<()> {
    require(conn, invitation_id)?;

    let tx = conn.unchecked_transaction()?;
    let assignments = assignment_repo::delete_by_invitation(&tx, invitation_id)?;
    let guests = guest_repo::delete_by_invitation(&tx, invitation_id)?;
    let tables = table_repo::delete_by_invitation(&tx, invitation_id)?;
    invitation_repo::delete(&tx, invitation_id)?;
    tx.commit()?;

    info!(
        invitation = %invitation_id,
        assignments, guests, tables,
        "deleted invitation"
    );
    Ok(())
}

/// Fetches the invitation or fails with `NotFound`.
pub fn require(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Invitation> {
    invitation_repo::find_by_id(conn, invitation_id)?
        .ok_or_else(|| SeatingError::not_found("Invitation", invitation_id))
}
