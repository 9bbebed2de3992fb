//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 400 Bad Request
            // (day-close rejections all share 400, callers branch on `code`)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::InvalidSerialRange
            | Self::StoreInvalidTimezone
            | Self::ShiftsStillOpen
            | Self::InvalidPacks
            | Self::MissingPacks
            | Self::ClosingsAlreadyExist => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::TokenExpired | Self::TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired => StatusCode::FORBIDDEN,

            // 404 Not Found
            Self::NotFound
            | Self::GameNotFound
            | Self::BinNotFound
            | Self::PackNotFound
            | Self::ShiftNotFound
            | Self::BusinessDayNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::BinOccupied
            | Self::PackNumberExists
            | Self::ShiftAlreadyOpen
            | Self::OpeningAlreadyRecorded => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            Self::GameInactive | Self::BinInactive | Self::PackInvalidStatus | Self::ShiftNotOpen => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_close_codes_are_bad_request() {
        for code in [
            ErrorCode::ShiftsStillOpen,
            ErrorCode::InvalidPacks,
            ErrorCode::MissingPacks,
            ErrorCode::ClosingsAlreadyExist,
            ErrorCode::ValidationFailed,
        ] {
            assert_eq!(code.http_status(), StatusCode::BAD_REQUEST, "{code}");
        }
    }

    #[test]
    fn test_other_statuses() {
        assert_eq!(ErrorCode::PackNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::BinOccupied.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
