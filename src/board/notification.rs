use std::fmt;

use crate::error::{ErrorKind, SeatingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// What the user is told after a board command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    /// Extra lines, e.g. rejected import rows.
    pub details: Vec<String>,
    pub error_kind: Option<ErrorKind>,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
            details: Vec::new(),
            error_kind: None,
        }
    }

    pub fn warning(message: impl Into<String>, details: Vec<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            details,
            error_kind: None,
        }
    }

    pub fn from_error(error: &SeatingError) -> Self {
        Self {
            level: Level::Error,
            message: error.to_string(),
            details: Vec::new(),
            error_kind: Some(error.kind()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.message)?,
            Level::Warning => write!(f, "Warning: {}", self.message)?,
            Level::Error => write!(f, "Error: {}", self.message)?,
        }
        for detail in &self.details {
            write!(f, "\n  {}", detail)?;
        }
        Ok(())
    }
}
