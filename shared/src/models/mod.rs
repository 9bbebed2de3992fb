//! Data models
//!
//! Shared between lotto-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps Unix millis.

pub mod bin;
pub mod business_day;
pub mod day_close;
pub mod game;
pub mod pack;
pub mod shift;
pub mod shift_ledger;
pub mod store;

// Re-exports
pub use bin::*;
pub use business_day::*;
pub use day_close::*;
pub use game::*;
pub use pack::*;
pub use shift::*;
pub use shift_ledger::*;
pub use store::*;
