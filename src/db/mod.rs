pub mod schema;
pub mod invitation_repo;
pub mod guest_repo;
pub mod table_repo;
pub mod assignment_repo;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{SeatingError, SeatingResult};
use crate::model::Id;

pub(crate) fn parse_id<T>(s: &str) -> SeatingResult<Id<T>> {
    Ok(Id::new(
        Uuid::parse_str(s).map_err(|e| SeatingError::Other(format!("Invalid UUID: {}", e)))?,
    ))
}

pub(crate) fn parse_timestamp(s: &str) -> SeatingResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SeatingError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}
