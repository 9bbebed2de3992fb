//! Bin Model (彩票格位)

use serde::{Deserialize, Serialize};

/// A physical display slot in a store.
///
/// `display_order` is 0-based; staff see `display_order + 1` as the bin
/// number. A bin holds at most one pack, referenced from the pack side via
/// `pack.current_bin_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Bin {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: i64,
}

impl Bin {
    /// User-facing bin number
    pub fn bin_number(&self) -> i64 {
        self.display_order + 1
    }
}

/// Create bin payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinCreate {
    pub name: String,
    pub display_order: i64,
}

/// One bin of the store's current (open) period.
///
/// `starting_serial` is carried forward from the last recorded ending serial;
/// `ending_serial` stays `None` until the period is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentBin {
    pub bin_id: i64,
    pub bin_number: i64,
    pub bin_name: String,
    pub pack: Option<CurrentBinPack>,
}

/// Pack currently sitting in a [`CurrentBin`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentBinPack {
    pub pack_id: i64,
    pub pack_number: String,
    pub game_name: String,
    pub game_price: f64,
    pub serial_start: String,
    pub serial_end: String,
    pub starting_serial: String,
    pub ending_serial: Option<String>,
}
