//! The guest CSV column contract shared by import and export.
//!
//! Columns are exported in `GUEST_COLUMNS` order. On import, headers are
//! matched by name (case, spaces, `_` and `-` ignored), so column order is
//! free and unknown columns are skipped. New optional columns can be
//! appended here without breaking older files.

use crate::error::{SeatingError, SeatingResult};
use crate::model::{Guest, GuestDraft};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestField {
    FirstName,
    LastName,
    Email,
    Phone,
    Category,
    PlusOneAllowed,
    PlusOneName,
    DietaryRestrictions,
    Notes,
    InvitationSent,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub field: GuestField,
    pub required: bool,
}

pub static GUEST_COLUMNS: [Column; 10] = [
    Column { header: "First Name", field: GuestField::FirstName, required: true },
    Column { header: "Last Name", field: GuestField::LastName, required: true },
    Column { header: "Email", field: GuestField::Email, required: false },
    Column { header: "Phone", field: GuestField::Phone, required: false },
    Column { header: "Category", field: GuestField::Category, required: false },
    Column { header: "Plus One Allowed", field: GuestField::PlusOneAllowed, required: false },
    Column { header: "Plus One Name", field: GuestField::PlusOneName, required: false },
    Column { header: "Dietary Restrictions", field: GuestField::DietaryRestrictions, required: false },
    Column { header: "Notes", field: GuestField::Notes, required: false },
    Column { header: "Invitation Sent", field: GuestField::InvitationSent, required: false },
];

pub fn headers() -> Vec<&'static str> {
    GUEST_COLUMNS.iter().map(|c| c.header).collect()
}

/// "First Name", "first_name" and "firstName" all normalize to "firstname".
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn column_for_header(header: &str) -> Option<&'static Column> {
    let wanted = normalize_header(header);
    GUEST_COLUMNS
        .iter()
        .find(|c| normalize_header(c.header) == wanted)
}

impl Column {
    /// The cell text written on export.
    pub fn read(&self, guest: &Guest) -> String {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let flag = |b: bool| String::from(if b { "yes" } else { "no" });

        match self.field {
            GuestField::FirstName => guest.first_name.clone(),
            GuestField::LastName => guest.last_name.clone(),
            GuestField::Email => text(&guest.email),
            GuestField::Phone => text(&guest.phone),
            GuestField::Category => text(&guest.category),
            GuestField::PlusOneAllowed => flag(guest.plus_one_allowed),
            GuestField::PlusOneName => text(&guest.plus_one_name),
            GuestField::DietaryRestrictions => text(&guest.dietary_restrictions),
            GuestField::Notes => text(&guest.notes),
            GuestField::InvitationSent => flag(guest.invitation_sent),
        }
    }

    /// Validates one imported cell and stores it on the draft.
    pub fn write(&self, draft: &mut GuestDraft, raw: &str) -> SeatingResult<()> {
        let optional = |raw: &str| validation::trim_optional(Some(raw));

        match self.field {
            GuestField::FirstName => draft.first_name = validation::non_blank(raw, "first_name")?,
            GuestField::LastName => draft.last_name = validation::non_blank(raw, "last_name")?,
            GuestField::Email => draft.email = validation::optional_email(Some(raw))?,
            GuestField::Phone => draft.phone = optional(raw),
            GuestField::Category => draft.category = optional(raw),
            GuestField::PlusOneAllowed => {
                draft.plus_one_allowed = validation::flag(raw, "plus_one_allowed")?
            }
            GuestField::PlusOneName => draft.plus_one_name = optional(raw),
            GuestField::DietaryRestrictions => draft.dietary_restrictions = optional(raw),
            GuestField::Notes => draft.notes = optional(raw),
            GuestField::InvitationSent => {
                draft.invitation_sent = validation::flag(raw, "invitation_sent")?
            }
        }
        Ok(())
    }
}

/// Maps each position of a header row to its column, failing when a
/// required column is absent.
pub fn map_header(header_row: &[String]) -> SeatingResult<Vec<Option<&'static Column>>> {
    let mapping: Vec<Option<&'static Column>> =
        header_row.iter().map(|h| column_for_header(h)).collect();

    for required in GUEST_COLUMNS.iter().filter(|c| c.required) {
        let present = mapping
            .iter()
            .flatten()
            .any(|c| c.field == required.field);
        if !present {
            return Err(SeatingError::MissingColumn {
                header: required.header.to_string(),
            });
        }
    }

    Ok(mapping)
}
