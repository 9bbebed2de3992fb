//! Shared types for the lottery back office
//!
//! Models, the unified error system, serial arithmetic and unscanned-bin
//! resolution used by the server and its clients.

pub mod error;
pub mod lottery;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
