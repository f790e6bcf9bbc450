//! Shared validation utilities
//!
//! Field validation for commands and queries, plus timestamp parsing for
//! ingested readings.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Minimum length of a project name.
pub const PROJECT_NAME_MIN_LEN: usize = 3;

/// Minimum length of a project description.
pub const PROJECT_DESCRIPTION_MIN_LEN: usize = 10;

/// Errors that can occur during project field validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectFieldError {
    #[error("project_name must be at least {PROJECT_NAME_MIN_LEN} characters")]
    NameTooShort,

    #[error("project_description must be at least {PROJECT_DESCRIPTION_MIN_LEN} characters")]
    DescriptionTooShort,
}

/// Validate a project name (length >= 3, whitespace-only rejected).
pub fn validate_project_name(name: &str) -> Result<(), ProjectFieldError> {
    if name.trim().chars().count() < PROJECT_NAME_MIN_LEN {
        return Err(ProjectFieldError::NameTooShort);
    }
    Ok(())
}

/// Validate a project description (length >= 10, whitespace-only rejected).
pub fn validate_project_description(description: &str) -> Result<(), ProjectFieldError> {
    if description.trim().chars().count() < PROJECT_DESCRIPTION_MIN_LEN {
        return Err(ProjectFieldError::DescriptionTooShort);
    }
    Ok(())
}

/// Error for unparseable reading timestamps
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid timestamp '{value}'")]
pub struct TimestampParseError {
    pub value: String,
}

/// Parse a client-supplied timestamp string.
///
/// Accepts ISO-8601 with a `T` separator (`2024-01-01T10:00:00`, with or
/// without fractional seconds) and the space-separated equivalent.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, TimestampParseError> {
    if let Ok(ts) = value.parse::<NaiveDateTime>() {
        return Ok(ts);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").map_err(|_| {
        TimestampParseError {
            value: value.to_string(),
        }
    })
}

/// Render a timestamp the way summary responses report it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
