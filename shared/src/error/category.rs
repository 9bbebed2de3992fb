//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Store errors
/// - 4xxx: Inventory errors
/// - 5xxx: Shift errors
/// - 6xxx: Day-close errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Store errors (3xxx)
    Store,
    /// Inventory errors (4xxx)
    Inventory,
    /// Shift errors (5xxx)
    Shift,
    /// Day-close errors (6xxx)
    DayClose,
    /// System errors (7xxx-9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Store,
            4000..5000 => Self::Inventory,
            5000..6000 => Self::Shift,
            6000..7000 => Self::DayClose,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Store => "store",
            Self::Inventory => "inventory",
            Self::Shift => "shift",
            Self::DayClose => "day_close",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1004), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(4201), ErrorCategory::Inventory);
        assert_eq!(ErrorCategory::from_code(6003), ErrorCategory::DayClose);
        assert_eq!(ErrorCategory::from_code(9002), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ShiftsStillOpen.category(), ErrorCategory::DayClose);
        assert_eq!(ErrorCode::ShiftNotFound.category(), ErrorCategory::Shift);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::MissingPacks.category().name(), "day_close");
    }
}
