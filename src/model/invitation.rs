use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;

/// The event that owns a guest list and a seating plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Id<Invitation>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn create(title: String) -> Self {
        Self {
            id: Id::generate(),
            title,
            created_at: Utc::now(),
        }
    }
}
