//! Input validation helpers
//!
//! Centralized text length constants and validation functions, applied
//! before any transaction begins.

use crate::scheduling::ScheduleError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: workstation, staff, service, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: customer ids, service ids, operator names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// A booking may not span more than a full day
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &str,
    max_len: usize,
) -> Result<(), ScheduleError> {
    if value.trim().is_empty() {
        return Err(ScheduleError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if value.len() > max_len {
        return Err(ScheduleError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), ScheduleError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(ScheduleError::Validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate an appointment duration (non-negative by type, bounded above).
pub fn validate_duration(minutes: u32) -> Result<(), ScheduleError> {
    if minutes > MAX_DURATION_MINUTES {
        return Err(ScheduleError::Validation(format!(
            "duration exceeds maximum allowed ({MAX_DURATION_MINUTES} minutes), got {minutes}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Bay A", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".to_string()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("x".repeat(MAX_NOTE_LEN + 1)), "notes", MAX_NOTE_LEN)
                .is_err()
        );
    }

    #[test]
    fn test_duration_bounds() {
        assert!(validate_duration(0).is_ok());
        assert!(validate_duration(60).is_ok());
        assert!(validate_duration(MAX_DURATION_MINUTES).is_ok());
        assert!(validate_duration(MAX_DURATION_MINUTES + 1).is_err());
    }
}
