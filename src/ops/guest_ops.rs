use rusqlite::Connection;
use tracing::info;

use crate::db::{assignment_repo, guest_repo};
use crate::error::{SeatingError, SeatingResult};
use crate::model::{Guest, GuestDraft, GuestPatch, Id, Invitation};
use crate::ops::invitation_ops;
use crate::validation::{self, trim_optional};

pub fn list_guests(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<Vec<Guest>> {
    guest_repo::find_by_invitation(conn, invitation_id)
}

pub fn create_guest(
    conn: &Connection,
    invitation_id: Id<Invitation>,
    draft: GuestDraft,
) -> SeatingResult<Guest> {
    let guest = build_guest(Id::generate(), invitation_id, draft)?;
    invitation_ops::require(conn, invitation_id)?;

    guest_repo::insert(conn, &guest)?;
    info!(guest = %guest.id, name = %guest.full_name(), "created guest");
    Ok(guest)
}

pub fn update_guest(conn: &Connection, guest_id: Id<Guest>, patch: GuestPatch) -> SeatingResult<Guest> {
    let current = require(conn, guest_id)?;

    let draft = GuestDraft {
        first_name: patch.first_name.unwrap_or(current.first_name),
        last_name: patch.last_name.unwrap_or(current.last_name),
        email: patch.email.unwrap_or(current.email),
        phone: patch.phone.unwrap_or(current.phone),
        category: patch.category.unwrap_or(current.category),
        plus_one_allowed: patch.plus_one_allowed.unwrap_or(current.plus_one_allowed),
        plus_one_name: patch.plus_one_name.unwrap_or(current.plus_one_name),
        dietary_restrictions: patch
            .dietary_restrictions
            .unwrap_or(current.dietary_restrictions),
        notes: patch.notes.unwrap_or(current.notes),
        invitation_sent: patch.invitation_sent.unwrap_or(current.invitation_sent),
    };
    let updated = build_guest(current.id, current.invitation_id, draft)?;

    guest_repo::update(conn, &updated)?;
    info!(guest = %updated.id, "updated guest");
    Ok(updated)
}

pub fn set_invitation_sent(conn: &Connection, guest_id: Id<Guest>, sent: bool) -> SeatingResult<Guest> {
    update_guest(
        conn,
        guest_id,
        GuestPatch {
            invitation_sent: Some(sent),
            ..GuestPatch::default()
        },
    )
}

/// Flags every guest of the invitation as invited. Returns how many changed.
pub fn mark_all_invited(conn: &Connection, invitation_id: Id<Invitation>) -> SeatingResult<usize> {
    invitation_ops::require(conn, invitation_id)?;
    let changed = guest_repo::set_all_invitation_sent(conn, invitation_id, true)?;
    info!(invitation = %invitation_id, changed, "marked guests as invited");
    Ok(changed)
}

/// Deletes the guest's assignment and then the guest, as one transaction.
pub fn delete_guest(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<()> {
    require(conn, guest_id)?;

    let tx = conn.unchecked_transaction()?;
    let was_seated = assignment_repo::delete_by_guest(&tx, guest_id)?;
    guest_repo::delete(&tx, guest_id)?;
    tx.commit()?;

    info!(guest = %guest_id, was_seated, "deleted guest");
    Ok(())
}

pub fn require(conn: &Connection, guest_id: Id<Guest>) -> SeatingResult<Guest> {
    guest_repo::find_by_id(conn, guest_id)?.ok_or_else(|| SeatingError::not_found("Guest", guest_id))
}

/// Validates and normalizes a draft into a guest record.
///
/// Names are trimmed and required, optional text is trimmed with blanks
/// becoming `None`, and the plus-one name is dropped unless a plus-one is
/// allowed.
pub fn build_guest(
    id: Id<Guest>,
    invitation_id: Id<Invitation>,
    draft: GuestDraft,
) -> SeatingResult<Guest> {
    let first_name = validation::non_blank(&draft.first_name, "first_name")?;
    let last_name = validation::non_blank(&draft.last_name, "last_name")?;
    let email = validation::optional_email(draft.email.as_deref())?;

    let plus_one_name = if draft.plus_one_allowed {
        trim_optional(draft.plus_one_name.as_deref())
    } else {
        None
    };

    Ok(Guest {
        id,
        invitation_id,
        first_name,
        last_name,
        email,
        phone: trim_optional(draft.phone.as_deref()),
        category: trim_optional(draft.category.as_deref()),
        plus_one_allowed: draft.plus_one_allowed,
        plus_one_name,
        dietary_restrictions: trim_optional(draft.dietary_restrictions.as_deref()),
        notes: trim_optional(draft.notes.as_deref()),
        invitation_sent: draft.invitation_sent,
    })
}
