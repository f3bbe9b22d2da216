use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::guest::Guest;
use super::ids::Id;
use super::table::Table;

/// "This guest sits at this table." Keyed by guest: a guest has at most one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub guest_id: Id<Guest>,
    pub table_id: Id<Table>,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn create(guest_id: Id<Guest>, table_id: Id<Table>) -> Self {
        Self {
            guest_id,
            table_id,
            created_at: Utc::now(),
        }
    }
}
