use thiserror::Error;

/// Coarse classification used by the seating board to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    ForeignKey,
    Transport,
}

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("Invalid email address: {value}")]
    InvalidEmail { value: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidFlag { field: String, value: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Table {table_number} is full ({occupants}/{capacity})")]
    CapacityExceeded {
        table_number: i32,
        occupants: usize,
        capacity: i32,
    },

    #[error("Missing required column: {header}")]
    MissingColumn { header: String },

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} {id} does not belong to invitation {invitation_id}")]
    ForeignKey {
        entity_type: String,
        id: String,
        invitation_id: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SeatingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeatingError::BlankField { .. }
            | SeatingError::NonPositive { .. }
            | SeatingError::InvalidEmail { .. }
            | SeatingError::InvalidFlag { .. }
            | SeatingError::AlreadyExists { .. }
            | SeatingError::CapacityExceeded { .. }
            | SeatingError::MissingColumn { .. }
            | SeatingError::MalformedCsv { .. }
            | SeatingError::Json(_) => ErrorKind::Validation,
            SeatingError::NotFound { .. } => ErrorKind::NotFound,
            SeatingError::ForeignKey { .. } => ErrorKind::ForeignKey,
            SeatingError::Database(_) | SeatingError::Io(_) | SeatingError::Other(_) => {
                ErrorKind::Transport
            }
        }
    }

    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        SeatingError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub(crate) fn foreign_key(entity_type: &str, id: impl ToString, invitation_id: impl ToString) -> Self {
        SeatingError::ForeignKey {
            entity_type: entity_type.into(),
            id: id.to_string(),
            invitation_id: invitation_id.to_string(),
        }
    }
}

pub type SeatingResult<T> = Result<T, SeatingError>;
