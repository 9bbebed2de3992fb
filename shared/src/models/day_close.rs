//! Day Close DTOs (日结)

use serde::{Deserialize, Serialize};

use super::{BusinessDay, EntryMethod, ShiftStatus};

/// One pack's closing in a day-close submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCloseItem {
    pub pack_id: i64,
    pub closing_serial: String,
    /// Falls back to the request-level method
    #[serde(default)]
    pub entry_method: Option<EntryMethod>,
    /// The whole pack sold through; `closing_serial` is the last serial
    #[serde(default)]
    pub is_sold_out: bool,
}

/// Day-close submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayCloseRequest {
    #[serde(default)]
    pub closings: Vec<DayCloseItem>,
    #[serde(default)]
    pub entry_method: EntryMethod,
    /// Shift to file closings under. Defaults to the store's latest shift.
    #[serde(default)]
    pub current_shift_id: Option<i64>,
}

impl DayCloseRequest {
    /// Closings with the request-level entry method applied to items that
    /// carry none
    pub fn into_closings(self) -> Vec<DayCloseItem> {
        let method = self.entry_method;
        self.closings
            .into_iter()
            .map(|mut item| {
                item.entry_method.get_or_insert(method);
                item
            })
            .collect()
    }
}

/// Bin summary returned after a successful close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinClosed {
    pub bin_number: i64,
    pub pack_number: String,
    pub game_name: String,
    pub closing_serial: String,
}

/// Successful day-close result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCloseResult {
    pub closings_created: usize,
    pub business_day: BusinessDay,
    pub bins_closed: Vec<BinClosed>,
    pub day_closed: bool,
}

/// Open shift reported when a close is blocked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OpenShiftInfo {
    pub id: i64,
    pub terminal_name: String,
    pub cashier_name: String,
    pub status: ShiftStatus,
    pub opened_at: i64,
}

/// Active-bin pack missing from a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingPack {
    pub bin_id: i64,
    pub bin_number: i64,
    pub pack_id: i64,
    pub pack_number: String,
}

/// Label for the open business period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodLabel {
    Today,
    CurrentPeriod,
}

/// The store's open business period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPeriod {
    /// Start of the period (Unix millis)
    pub started_at: i64,
    /// Date of the last closed business day
    pub last_closed_date: Option<String>,
    /// No day has ever been closed
    pub is_first_period: bool,
    /// Days between the last close and today, `None` for the first period
    pub days_since_last_close: Option<i64>,
    pub label: PeriodLabel,
}
