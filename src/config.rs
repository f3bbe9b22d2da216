use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SeatingResult;

/// Rules applied when placing guests at tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingPolicy {
    /// Reject an assignment that would push a table past its capacity.
    /// Off by default: capacity is shown, not enforced.
    pub enforce_capacity: bool,
}

/// Settings for the `seatplan` binary, read from an optional JSON file.
///
/// ```json
/// { "database_path": "wedding.db", "enforce_capacity": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingConfig {
    pub database_path: PathBuf,
    pub enforce_capacity: bool,
    pub log_filter: String,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(".data").join("seatplan.db"),
            enforce_capacity: false,
            log_filter: "seatplan=info".into(),
        }
    }
}

impl SeatingConfig {
    /// Reads a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> SeatingResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn policy(&self) -> SeatingPolicy {
        SeatingPolicy {
            enforce_capacity: self.enforce_capacity,
        }
    }
}
