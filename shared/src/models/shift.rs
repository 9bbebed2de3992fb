//! Shift Model (班次管理)

use serde::{Deserialize, Serialize};

/// Shift status
///
/// `Open` and `Active` block the store's day close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ShiftStatus {
    /// Created on a terminal but not yet started
    NotStarted,
    #[default]
    Open,
    /// Open and has recorded sales activity
    Active,
    Closed,
}

impl ShiftStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, ShiftStatus::Closed)
    }
}

/// Shift record - a cashier's session on a terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Shift {
    pub id: i64,
    pub store_id: i64,
    pub terminal_name: String,
    pub cashier_id: i64,
    pub cashier_name: String,
    pub status: ShiftStatus,
    pub opened_at: i64,
    pub opened_by: i64,
    pub closed_at: Option<i64>,
    /// Cash counted at close
    pub closing_cash: Option<f64>,
}

/// Create shift payload (open shift)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub terminal_name: String,
    pub cashier_id: i64,
    pub cashier_name: String,
    /// Start as `NOT_STARTED` instead of `OPEN`
    #[serde(default)]
    pub deferred: bool,
}

/// Close shift payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ShiftClose {
    /// Cash counted at close
    pub closing_cash: Option<f64>,
}
