//! 统一错误处理
//!
//! Error types live in `shared::error`; this module adds the server-side
//! conversions and response helpers.
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Pack 42"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Wrap data in a success [`ApiResponse`]
pub fn ok<T>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let e: AppError = RepoError::NotFound("Pack 1".into()).into();
        assert_eq!(e.code, ErrorCode::NotFound);

        let e: AppError = RepoError::Duplicate("pack_number".into()).into();
        assert_eq!(e.code, ErrorCode::AlreadyExists);

        let e: AppError = RepoError::Validation("bad".into()).into();
        assert_eq!(e.code, ErrorCode::ValidationFailed);

        let e: AppError = RepoError::Database("locked".into()).into();
        assert_eq!(e.code, ErrorCode::DatabaseError);
        assert_eq!(e.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
