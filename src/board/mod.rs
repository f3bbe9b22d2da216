//! The seating board: composes the guest directory, table registry, and
//! assignment ledger for one invitation.
//!
//! Every mutation goes through [`SeatingBoard::dispatch`], which runs the
//! command, reloads the snapshot from the store, and turns the result into a
//! [`Notification`]. The snapshot is never edited locally; the store is the
//! source of truth after each command.

pub mod command;
pub mod notification;

use rusqlite::Connection;
use tracing::{debug, warn};

pub use command::BoardCommand;
pub use notification::{Level, Notification};

use crate::config::SeatingPolicy;
use crate::error::{ErrorKind, SeatingError, SeatingResult};
use crate::model::{DragPayload, Guest, Id, Invitation, Table, TableWithGuests};
use crate::ops::{assignment_ops, guest_ops, table_ops};
use crate::queries::guest_queries;
use crate::transfer;

/// Derived views of one invitation at the time of the last reload.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Every table in number order, with its seated guests.
    pub tables: Vec<TableWithGuests>,
    /// Guests with no seat.
    pub unassigned: Vec<Guest>,
    /// Every guest of the invitation.
    pub guests: Vec<Guest>,
}

impl BoardSnapshot {
    pub fn table(&self, table_id: Id<Table>) -> Option<&TableWithGuests> {
        self.tables.iter().find(|t| t.table.id == table_id)
    }

    pub fn table_by_number(&self, table_number: i32) -> Option<&TableWithGuests> {
        self.tables.iter().find(|t| t.table.table_number == table_number)
    }

    pub fn guest(&self, guest_id: Id<Guest>) -> Option<&Guest> {
        self.guests.iter().find(|g| g.id == guest_id)
    }

    /// The table the guest sits at, if any.
    pub fn seat_of(&self, guest_id: Id<Guest>) -> Option<&TableWithGuests> {
        self.tables.iter().find(|t| t.contains(guest_id))
    }

    pub fn is_unassigned(&self, guest_id: Id<Guest>) -> bool {
        self.unassigned.iter().any(|g| g.id == guest_id)
    }

    /// Number offered for the next table: highest in use plus one.
    pub fn suggested_table_number(&self) -> i32 {
        self.tables
            .iter()
            .map(|t| t.table.table_number)
            .max()
            .map_or(1, |max| max + 1)
    }
}

pub struct SeatingBoard<'c> {
    conn: &'c Connection,
    invitation_id: Id<Invitation>,
    policy: SeatingPolicy,
    snapshot: BoardSnapshot,
}

impl<'c> SeatingBoard<'c> {
    pub fn load(
        conn: &'c Connection,
        invitation_id: Id<Invitation>,
        policy: SeatingPolicy,
    ) -> SeatingResult<Self> {
        let mut board = Self {
            conn,
            invitation_id,
            policy,
            snapshot: BoardSnapshot::default(),
        };
        board.reload()?;
        Ok(board)
    }

    pub fn invitation_id(&self) -> Id<Invitation> {
        self.invitation_id
    }

    pub fn policy(&self) -> SeatingPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Re-reads tables, assignments, and guests and recomputes the
    /// unassigned pool.
    pub fn reload(&mut self) -> SeatingResult<()> {
        let tables = assignment_ops::list_with_guests(self.conn, self.invitation_id)?;
        let guests = guest_ops::list_guests(self.conn, self.invitation_id)?;
        let unassigned = guest_queries::unassigned_from(&guests, &tables);

        debug!(
            invitation = %self.invitation_id,
            tables = tables.len(),
            guests = guests.len(),
            unassigned = unassigned.len(),
            "reloaded seating board"
        );

        self.snapshot = BoardSnapshot {
            tables,
            unassigned,
            guests,
        };
        Ok(())
    }

    /// A guest element was dropped on a table element.
    pub fn on_drop(&mut self, payload: DragPayload, table_id: Id<Table>) -> Notification {
        self.dispatch(BoardCommand::drop_on(payload, table_id))
    }

    /// Runs a command and reports the outcome.
    ///
    /// On success the snapshot is reloaded. Stale references (`NotFound`,
    /// `ForeignKey`) also trigger a reload so the view catches up with the
    /// store. Validation and transport failures leave the snapshot as is.
    pub fn dispatch(&mut self, command: BoardCommand) -> Notification {
        let name = command.name();
        match self.execute(command) {
            Ok(notification) => match self.reload() {
                Ok(()) => notification,
                Err(e) => {
                    warn!(command = name, error = %e, "reload after command failed");
                    Notification::from_error(&e)
                }
            },
            Err(e) => {
                warn!(command = name, error = %e, "board command failed");
                if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::ForeignKey) {
                    if let Err(reload_err) = self.reload() {
                        warn!(error = %reload_err, "reload after stale reference failed");
                    }
                }
                Notification::from_error(&e)
            }
        }
    }

    fn execute(&self, command: BoardCommand) -> SeatingResult<Notification> {
        let conn = self.conn;
        let invitation_id = self.invitation_id;

        let notification = match command {
            BoardCommand::Assign { guest_id, table_id } => {
                assignment_ops::assign(conn, invitation_id, guest_id, table_id, self.policy)?;
                let guest = guest_ops::require(conn, guest_id)?;
                let table = table_ops::require(conn, table_id)?;
                Notification::info(format!("Seated {} at {}", guest.full_name(), table.label()))
            }
            BoardCommand::Unassign { guest_id } => {
                let freed = assignment_ops::unassign(conn, invitation_id, guest_id)?;
                let guest = guest_ops::require(conn, guest_id)?;
                if freed {
                    Notification::info(format!("Removed {} from their table", guest.full_name()))
                } else {
                    Notification::info(format!("{} was not seated", guest.full_name()))
                }
            }
            BoardCommand::CreateTable(draft) => {
                let table = table_ops::create_table(conn, invitation_id, draft)?;
                Notification::info(format!("Added {} (capacity {})", table.label(), table.capacity))
            }
            BoardCommand::UpdateTable { table_id, patch } => {
                self.table_here(table_id)?;
                let table = table_ops::update_table(conn, table_id, patch)?;
                Notification::info(format!("Updated {}", table.label()))
            }
            BoardCommand::DeleteTable { table_id } => {
                let table = self.table_here(table_id)?;
                let released = table_ops::delete_table(conn, table_id)?;
                Notification::info(format!(
                    "Deleted {}; {} guest(s) returned to unassigned",
                    table.label(),
                    released
                ))
            }
            BoardCommand::CreateGuest(draft) => {
                let guest = guest_ops::create_guest(conn, invitation_id, draft)?;
                Notification::info(format!("Added {}", guest.full_name()))
            }
            BoardCommand::UpdateGuest { guest_id, patch } => {
                self.guest_here(guest_id)?;
                let guest = guest_ops::update_guest(conn, guest_id, patch)?;
                Notification::info(format!("Updated {}", guest.full_name()))
            }
            BoardCommand::DeleteGuest { guest_id } => {
                let guest = self.guest_here(guest_id)?;
                guest_ops::delete_guest(conn, guest_id)?;
                Notification::info(format!("Deleted {}", guest.full_name()))
            }
            BoardCommand::SetInvitationSent { guest_id, sent } => {
                self.guest_here(guest_id)?;
                let guest = guest_ops::set_invitation_sent(conn, guest_id, sent)?;
                let state = if sent { "sent" } else { "not sent" };
                Notification::info(format!("{}: invitation {}", guest.full_name(), state))
            }
            BoardCommand::MarkAllInvited => {
                let changed = guest_ops::mark_all_invited(conn, invitation_id)?;
                Notification::info(format!("Marked {} guest(s) as invited", changed))
            }
            BoardCommand::ImportCsv { csv_text } => {
                let report = transfer::import_guests(conn, invitation_id, &csv_text)?;
                let summary = format!("Imported {} guest(s)", report.success);
                if report.errors.is_empty() {
                    Notification::info(summary)
                } else {
                    Notification::warning(
                        format!("{}, {} row(s) rejected", summary, report.errors.len()),
                        report.errors,
                    )
                }
            }
        };

        Ok(notification)
    }

    /// The guest, provided it belongs to this board's invitation.
    fn guest_here(&self, guest_id: Id<Guest>) -> SeatingResult<Guest> {
        let guest = guest_ops::require(self.conn, guest_id)?;
        if guest.invitation_id != self.invitation_id {
            return Err(SeatingError::foreign_key("Guest", guest_id, self.invitation_id));
        }
        Ok(guest)
    }

    fn table_here(&self, table_id: Id<Table>) -> SeatingResult<Table> {
        let table = table_ops::require(self.conn, table_id)?;
        if table.invitation_id != self.invitation_id {
            return Err(SeatingError::foreign_key("Table", table_id, self.invitation_id));
        }
        Ok(table)
    }
}
