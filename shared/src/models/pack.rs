//! Pack Model (彩票本)

use serde::{Deserialize, Serialize};

/// Pack status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PackStatus {
    /// Received into inventory, not on display
    Received,
    /// Activated and selling from a bin
    Active,
    /// Every ticket sold
    Depleted,
    /// Sent back to the lottery
    Returned,
}

impl PackStatus {
    /// Whether the pack can still be sent back to the lottery
    pub fn is_returnable(&self) -> bool {
        match self {
            PackStatus::Received | PackStatus::Active => true,
            PackStatus::Depleted | PackStatus::Returned => false,
        }
    }
}

/// A sellable book of tickets with a fixed inclusive serial range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Pack {
    pub id: i64,
    pub game_id: i64,
    pub store_id: i64,
    pub pack_number: String,
    /// First serial (3-digit, zero padded)
    pub serial_start: String,
    /// Last serial, inclusive
    pub serial_end: String,
    pub status: PackStatus,
    pub received_at: i64,
    pub activated_at: Option<i64>,
    pub depleted_at: Option<i64>,
    pub returned_at: Option<i64>,
    pub current_bin_id: Option<i64>,
}

/// Receive pack payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackReceive {
    pub game_id: i64,
    pub pack_number: String,
    pub serial_start: String,
    pub serial_end: String,
}

/// Activate pack payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackActivate {
    pub bin_id: i64,
}

/// Pack activated during the current business period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ActivatedPack {
    pub pack_id: i64,
    pub pack_number: String,
    pub game_name: String,
    pub game_price: f64,
    pub bin_id: Option<i64>,
    pub status: PackStatus,
    pub activated_at: i64,
}
