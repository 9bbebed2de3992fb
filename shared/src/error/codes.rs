//! Unified error codes for the lottery back office
//!
//! This module defines all error codes used by lotto-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Store errors
//! - 4xxx: Inventory errors (games, bins, packs)
//! - 5xxx: Shift errors
//! - 6xxx: Day-close errors
//! - 9xxx: System errors
//!
//! On the wire a code travels as its SCREAMING_SNAKE name (`"MISSING_PACKS"`),
//! the numeric value only drives category and status mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed (client-correctable input error)
    #[serde(rename = "VALIDATION_ERROR")]
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Store ====================
    /// Store timezone is not a valid IANA name
    StoreInvalidTimezone = 3001,

    // ==================== 4xxx: Inventory ====================
    /// Game not found
    GameNotFound = 4001,
    /// Game is inactive
    GameInactive = 4002,
    /// Bin not found
    BinNotFound = 4101,
    /// Bin already holds a pack
    BinOccupied = 4102,
    /// Bin is inactive
    BinInactive = 4103,
    /// Pack not found
    PackNotFound = 4201,
    /// Pack status does not allow the operation
    PackInvalidStatus = 4202,
    /// Pack number already exists for this game
    PackNumberExists = 4203,
    /// Serial outside the pack's range
    InvalidSerialRange = 4204,

    // ==================== 5xxx: Shift ====================
    /// Shift not found
    ShiftNotFound = 5001,
    /// Terminal already has an open shift
    ShiftAlreadyOpen = 5002,
    /// Shift is not open
    ShiftNotOpen = 5003,
    /// Opening serial already recorded for this pack in this shift
    OpeningAlreadyRecorded = 5004,

    // ==================== 6xxx: Day Close ====================
    /// Shifts other than the submitting shift are still open
    ShiftsStillOpen = 6001,
    /// Closings reference packs that do not exist or belong elsewhere
    InvalidPacks = 6002,
    /// Active bins were left out of the submission
    MissingPacks = 6003,
    /// A closing already exists for a submitted pack
    ClosingsAlreadyExist = 6004,
    /// Business day not found
    BusinessDayNotFound = 6101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Wire name, identical to the serde representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Success => "SUCCESS",
            ErrorCode::Unknown => "UNKNOWN",
            ErrorCode::ValidationFailed => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AlreadyExists => "ALREADY_EXISTS",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",

            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenInvalid => "TOKEN_INVALID",

            ErrorCode::PermissionDenied => "PERMISSION_DENIED",
            ErrorCode::AdminRequired => "ADMIN_REQUIRED",

            ErrorCode::StoreInvalidTimezone => "STORE_INVALID_TIMEZONE",

            ErrorCode::GameNotFound => "GAME_NOT_FOUND",
            ErrorCode::GameInactive => "GAME_INACTIVE",
            ErrorCode::BinNotFound => "BIN_NOT_FOUND",
            ErrorCode::BinOccupied => "BIN_OCCUPIED",
            ErrorCode::BinInactive => "BIN_INACTIVE",
            ErrorCode::PackNotFound => "PACK_NOT_FOUND",
            ErrorCode::PackInvalidStatus => "PACK_INVALID_STATUS",
            ErrorCode::PackNumberExists => "PACK_NUMBER_EXISTS",
            ErrorCode::InvalidSerialRange => "INVALID_SERIAL_RANGE",

            ErrorCode::ShiftNotFound => "SHIFT_NOT_FOUND",
            ErrorCode::ShiftAlreadyOpen => "SHIFT_ALREADY_OPEN",
            ErrorCode::ShiftNotOpen => "SHIFT_NOT_OPEN",
            ErrorCode::OpeningAlreadyRecorded => "OPENING_ALREADY_RECORDED",

            ErrorCode::ShiftsStillOpen => "SHIFTS_STILL_OPEN",
            ErrorCode::InvalidPacks => "INVALID_PACKS",
            ErrorCode::MissingPacks => "MISSING_PACKS",
            ErrorCode::ClosingsAlreadyExist => "CLOSINGS_ALREADY_EXIST",
            ErrorCode::BusinessDayNotFound => "BUSINESS_DAY_NOT_FOUND",

            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Store
            ErrorCode::StoreInvalidTimezone => "Store timezone is invalid",

            // Inventory
            ErrorCode::GameNotFound => "Game not found",
            ErrorCode::GameInactive => "Game is inactive",
            ErrorCode::BinNotFound => "Bin not found",
            ErrorCode::BinOccupied => "Bin already holds a pack",
            ErrorCode::BinInactive => "Bin is inactive",
            ErrorCode::PackNotFound => "Pack not found",
            ErrorCode::PackInvalidStatus => "Pack status does not allow this operation",
            ErrorCode::PackNumberExists => "Pack number already exists",
            ErrorCode::InvalidSerialRange => "Serial is outside the pack range",

            // Shift
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftAlreadyOpen => "Terminal already has an open shift",
            ErrorCode::ShiftNotOpen => "Shift is not open",
            ErrorCode::OpeningAlreadyRecorded => "Opening serial already recorded",

            // Day close
            ErrorCode::ShiftsStillOpen => "All shifts must be closed before closing the day",
            ErrorCode::InvalidPacks => "Closings reference invalid packs",
            ErrorCode::MissingPacks => "All active bins require a closing serial",
            ErrorCode::ClosingsAlreadyExist => "Closings already exist for this shift",
            ErrorCode::BusinessDayNotFound => "Business day not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::ShiftsStillOpen.code(), 6001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_wire_name_matches_serde() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::ShiftsStillOpen,
            ErrorCode::InvalidPacks,
            ErrorCode::MissingPacks,
            ErrorCode::ClosingsAlreadyExist,
            ErrorCode::PermissionDenied,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, code);
        }
    }

    #[test]
    fn test_validation_uses_short_name() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_unknown_name_rejected() {
        let result: Result<ErrorCode, _> = serde_json::from_str("\"NOT_A_CODE\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::MissingPacks.message(),
            "All active bins require a closing serial"
        );
        assert_eq!(ErrorCode::InternalError.message(), "Internal server error");
    }
}
