use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::invitation::Invitation;

/// A numbered seating unit with an advisory capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: Id<Table>,
    pub invitation_id: Id<Invitation>,
    pub table_number: i32,
    pub name: Option<String>,
    pub capacity: i32,
}

impl Table {
    /// "Table 3" or "Table 3 (Family)".
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("Table {} ({})", self.table_number, name),
            None => format!("Table {}", self.table_number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDraft {
    /// `None` takes the next free number (`max + 1`).
    pub table_number: Option<i32>,
    pub name: Option<String>,
    pub capacity: i32,
}

impl TableDraft {
    pub fn with_capacity(capacity: i32) -> Self {
        Self {
            table_number: None,
            name: None,
            capacity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TablePatch {
    pub table_number: Option<i32>,
    pub name: Option<Option<String>>,
    pub capacity: Option<i32>,
}
