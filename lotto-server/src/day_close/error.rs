//! 日结错误
//!
//! Every rejection carries the data the caller needs to fix and resubmit.

use serde_json::json;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};
use shared::lottery::SerialError;
use shared::models::{MissingPack, OpenShiftInfo};

/// Why a submitted pack is not closable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPackReason {
    /// Unknown id or a pack of another store
    NotInStore,
    /// Pack exists but no active bin holds it
    NotInActiveBin,
}

impl InvalidPackReason {
    fn message(&self) -> &'static str {
        match self {
            Self::NotInStore => "Packs do not exist in this store",
            Self::NotInActiveBin => "Packs are not in an active bin",
        }
    }
}

#[derive(Debug, Error)]
pub enum DayCloseError {
    #[error("{} shift(s) must be closed before the day can be closed", .0.len())]
    ShiftsStillOpen(Vec<OpenShiftInfo>),

    #[error("{}", .reason.message())]
    InvalidPacks {
        pack_ids: Vec<i64>,
        reason: InvalidPackReason,
    },

    #[error("Packs submitted more than once")]
    DuplicateInBatch(Vec<i64>),

    #[error("All active bins require a closing serial ({} missing)", .0.len())]
    MissingPacks(Vec<MissingPack>),

    #[error("Closings already recorded for this shift")]
    ClosingsAlreadyExist { shift_id: i64, pack_ids: Vec<i64> },

    #[error("Business day {0} is already closed")]
    DayAlreadyClosed(String),

    #[error("No shift to record closings against")]
    NoShift,

    #[error("Shift {0} does not belong to this store")]
    ForeignShift(i64),

    #[error(
        "Latest shift {shift_id} is closed and already holds these closings; pass current_shift_id"
    )]
    StaleShift { shift_id: i64, pack_ids: Vec<i64> },

    #[error("Store {0} not found")]
    StoreNotFound(i64),

    #[error("Invalid store timezone: {0}")]
    InvalidTimezone(String),

    #[error("Pack {pack_id}: {source}")]
    MalformedSerial {
        pack_id: i64,
        #[source]
        source: SerialError,
    },

    #[error(
        "Pack {pack_id}: closing serial {closing_serial} must be between {starting_serial} and {serial_end}"
    )]
    SerialOutOfRange {
        pack_id: i64,
        starting_serial: String,
        serial_end: String,
        closing_serial: String,
    },

    #[error("Pack {pack_id}: a sold-out closing must be the last serial {serial_end}")]
    SoldOutNotAtEnd {
        pack_id: i64,
        serial_end: String,
        closing_serial: String,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<sqlx::Error> for DayCloseError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repo(err.into())
    }
}

impl From<DayCloseError> for AppError {
    fn from(err: DayCloseError) -> Self {
        let message = err.to_string();
        match err {
            DayCloseError::ShiftsStillOpen(shifts) => {
                AppError::with_message(ErrorCode::ShiftsStillOpen, message)
                    .with_detail("open_shifts", json!(shifts))
            }
            DayCloseError::InvalidPacks { pack_ids, .. } => {
                AppError::with_message(ErrorCode::InvalidPacks, message)
                    .with_detail("invalid_pack_ids", json!(pack_ids))
            }
            DayCloseError::DuplicateInBatch(pack_ids) => {
                AppError::with_message(ErrorCode::ClosingsAlreadyExist, message)
                    .with_detail("pack_ids", json!(pack_ids))
            }
            DayCloseError::MissingPacks(missing) => {
                AppError::with_message(ErrorCode::MissingPacks, message)
                    .with_detail("missing", json!(missing))
            }
            DayCloseError::ClosingsAlreadyExist { shift_id, pack_ids } => {
                AppError::with_message(ErrorCode::ClosingsAlreadyExist, message)
                    .with_detail("shift_id", shift_id)
                    .with_detail("pack_ids", json!(pack_ids))
            }
            DayCloseError::DayAlreadyClosed(date) => {
                AppError::with_message(ErrorCode::ClosingsAlreadyExist, message)
                    .with_detail("business_date", date)
            }
            DayCloseError::NoShift | DayCloseError::ForeignShift(_) => AppError::validation(message),
            DayCloseError::StaleShift { shift_id, pack_ids } => AppError::validation(message)
                .with_detail("field", "current_shift_id")
                .with_detail("shift_id", shift_id)
                .with_detail("pack_ids", json!(pack_ids)),
            DayCloseError::StoreNotFound(_) => {
                AppError::with_message(ErrorCode::NotFound, message)
            }
            DayCloseError::InvalidTimezone(_) => {
                AppError::with_message(ErrorCode::StoreInvalidTimezone, message)
            }
            DayCloseError::MalformedSerial { pack_id, .. } => {
                AppError::validation(message).with_detail("pack_id", pack_id)
            }
            DayCloseError::SerialOutOfRange {
                pack_id,
                starting_serial,
                serial_end,
                closing_serial,
            } => AppError::validation(message)
                .with_detail("pack_id", pack_id)
                .with_detail("starting_serial", starting_serial)
                .with_detail("serial_end", serial_end)
                .with_detail("closing_serial", closing_serial),
            DayCloseError::SoldOutNotAtEnd {
                pack_id,
                serial_end,
                closing_serial,
            } => AppError::validation(message)
                .with_detail("pack_id", pack_id)
                .with_detail("serial_end", serial_end)
                .with_detail("closing_serial", closing_serial),
            // 并发写入撞上唯一约束
            DayCloseError::Repo(RepoError::Duplicate(msg)) => {
                AppError::with_message(ErrorCode::ClosingsAlreadyExist, msg)
            }
            DayCloseError::Repo(other) => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ShiftStatus;

    #[test]
    fn test_open_shift_details() {
        let err: AppError = DayCloseError::ShiftsStillOpen(vec![OpenShiftInfo {
            id: 11,
            terminal_name: "Register 2".into(),
            cashier_name: "Ana".into(),
            status: ShiftStatus::Active,
            opened_at: 1_700_000_000_000,
        }])
        .into();

        assert_eq!(err.code, ErrorCode::ShiftsStillOpen);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        let shifts = &details["open_shifts"];
        assert_eq!(shifts[0]["terminal_name"], "Register 2");
        assert_eq!(shifts[0]["status"], "ACTIVE");
    }

    #[test]
    fn test_duplicate_paths_share_code() {
        let batch: AppError = DayCloseError::DuplicateInBatch(vec![3]).into();
        let existing: AppError = DayCloseError::ClosingsAlreadyExist {
            shift_id: 1,
            pack_ids: vec![3],
        }
        .into();
        let race: AppError = DayCloseError::Repo(RepoError::Duplicate("UNIQUE".into())).into();
        let closed: AppError = DayCloseError::DayAlreadyClosed("2024-05-01".into()).into();

        for e in [batch, existing, race, closed] {
            assert_eq!(e.code, ErrorCode::ClosingsAlreadyExist);
        }
    }

    #[test]
    fn test_stale_shift_asks_for_current_shift() {
        let err: AppError = DayCloseError::StaleShift {
            shift_id: 9,
            pack_ids: vec![3, 4],
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("current_shift_id"));
        let details = err.details.unwrap();
        assert_eq!(details["field"], "current_shift_id");
        assert_eq!(details["shift_id"], 9);
    }

    #[test]
    fn test_range_details() {
        let err: AppError = DayCloseError::SerialOutOfRange {
            pack_id: 5,
            starting_serial: "010".into(),
            serial_end: "029".into(),
            closing_serial: "005".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["starting_serial"], "010");
        assert_eq!(details["closing_serial"], "005");
    }

    #[test]
    fn test_missing_message_names_active_bins() {
        let err = DayCloseError::MissingPacks(vec![MissingPack {
            bin_id: 1,
            bin_number: 4,
            pack_id: 2,
            pack_number: "0012345".into(),
        }]);
        assert!(err.to_string().contains("active bins"));
    }
}
