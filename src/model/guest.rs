use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::invitation::Invitation;

/// A named individual invited to an event, optionally with a plus-one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: Id<Guest>,
    pub invitation_id: Id<Invitation>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub plus_one_allowed: bool,
    pub plus_one_name: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub notes: Option<String>,
    pub invitation_sent: bool,
}

impl Guest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether a named plus-one accompanies this guest.
    pub fn has_named_plus_one(&self) -> bool {
        self.plus_one_allowed
            && self
                .plus_one_name
                .as_deref()
                .is_some_and(|n| !n.trim().is_empty())
    }

    /// Seats this guest takes at a table: one, or two with a named plus-one.
    pub fn seat_count(&self) -> usize {
        if self.has_named_plus_one() {
            2
        } else {
            1
        }
    }
}

/// Input for creating a guest. Validated by `guest_ops::create_guest`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    pub plus_one_allowed: bool,
    pub plus_one_name: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub notes: Option<String>,
    pub invitation_sent: bool,
}

impl GuestDraft {
    pub fn named(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Self::default()
        }
    }
}

/// Partial update. `None` leaves a field untouched; `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct GuestPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub plus_one_allowed: Option<bool>,
    pub plus_one_name: Option<Option<String>>,
    pub dietary_restrictions: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub invitation_sent: Option<bool>,
}
