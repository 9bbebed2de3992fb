//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;
use shared::lottery::serial;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: store, game, bin, terminal, cashier
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: game code, pack number, state code
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
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
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a single 3-digit serial
pub fn validate_serial(value: &str, field: &str) -> Result<u32, AppError> {
    serial::to_int(value).map_err(|e| {
        AppError::validation(format!("{field}: {e}")).with_detail("field", field)
    })
}
