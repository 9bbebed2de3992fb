//! Shift Ledger (班次开/收记录)
//!
//! Per-shift, per-pack serial records. An opening captures where a pack
//! stood when the shift started; a closing captures where it stood when the
//! day was reconciled.

use serde::{Deserialize, Serialize};

/// How a closing serial was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EntryMethod {
    #[default]
    Scan,
    Manual,
}

/// Opening serial recorded for a pack at shift start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftOpening {
    pub id: i64,
    pub shift_id: i64,
    pub pack_id: i64,
    pub opening_serial: String,
    pub created_at: i64,
}

/// Record opening payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftOpeningCreate {
    pub pack_id: i64,
    pub opening_serial: String,
}

/// Closing serial recorded for a pack. Unique per (shift, pack).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShiftClosing {
    pub id: i64,
    pub shift_id: i64,
    pub pack_id: i64,
    pub closing_serial: String,
    pub entry_method: EntryMethod,
    /// Copied from the shift when the closing is written and never updated.
    /// Reports read it as-is; it does not follow later changes to the
    /// shift's cashier.
    pub cashier_id: i64,
    pub created_at: i64,
}
