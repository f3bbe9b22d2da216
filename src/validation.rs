use crate::error::{SeatingError, SeatingResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> SeatingResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(SeatingError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that an integer is positive (> 0).
pub fn positive(value: i32, field: &str) -> SeatingResult<i32> {
    if value <= 0 {
        Err(SeatingError::NonPositive {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validates an optional email address. Blank input is treated as absent.
///
/// The check is structural only: exactly one `@`, a non-empty local part,
/// a dotted domain, and no whitespace.
pub fn optional_email(value: Option<&str>) -> SeatingResult<Option<String>> {
    let Some(email) = trim_optional(value) else {
        return Ok(None);
    };

    let invalid = || SeatingError::InvalidEmail {
        value: email.clone(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if local.is_empty() || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(Some(email))
}

/// Parses a yes/no style flag as written by spreadsheets. Blank means `false`.
pub fn flag(value: &str, field: &str) -> SeatingResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "no" | "n" | "false" | "0" => Ok(false),
        "yes" | "y" | "true" | "1" | "x" => Ok(true),
        _ => Err(SeatingError::InvalidFlag {
            field: field.to_string(),
            value: value.trim().to_string(),
        }),
    }
}
