use crate::model::{DragPayload, Guest, GuestDraft, GuestPatch, Id, Table, TableDraft, TablePatch};

/// A user action addressed to the seating board.
///
/// Gesture layers (drag-and-drop, forms, the terminal) build one of these
/// and hand it to `SeatingBoard::dispatch`; they never call the ops directly.
#[derive(Debug, Clone)]
pub enum BoardCommand {
    Assign { guest_id: Id<Guest>, table_id: Id<Table> },
    Unassign { guest_id: Id<Guest> },
    CreateTable(TableDraft),
    UpdateTable { table_id: Id<Table>, patch: TablePatch },
    DeleteTable { table_id: Id<Table> },
    CreateGuest(GuestDraft),
    UpdateGuest { guest_id: Id<Guest>, patch: GuestPatch },
    DeleteGuest { guest_id: Id<Guest> },
    SetInvitationSent { guest_id: Id<Guest>, sent: bool },
    MarkAllInvited,
    ImportCsv { csv_text: String },
}

impl BoardCommand {
    /// A guest element dropped on a table element.
    pub fn drop_on(payload: DragPayload, table_id: Id<Table>) -> Self {
        BoardCommand::Assign {
            guest_id: payload.guest_id,
            table_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoardCommand::Assign { .. } => "assign",
            BoardCommand::Unassign { .. } => "unassign",
            BoardCommand::CreateTable(_) => "create-table",
            BoardCommand::UpdateTable { .. } => "update-table",
            BoardCommand::DeleteTable { .. } => "delete-table",
            BoardCommand::CreateGuest(_) => "create-guest",
            BoardCommand::UpdateGuest { .. } => "update-guest",
            BoardCommand::DeleteGuest { .. } => "delete-guest",
            BoardCommand::SetInvitationSent { .. } => "set-invitation-sent",
            BoardCommand::MarkAllInvited => "mark-all-invited",
            BoardCommand::ImportCsv { .. } => "import-csv",
        }
    }
}
