//! Business Day Model (营业日)

use serde::{Deserialize, Serialize};

/// Business day status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum BusinessDayStatus {
    #[default]
    Open,
    Closed,
}

/// The store's accounting day, keyed by calendar date in the store timezone.
/// At most one per (store, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BusinessDay {
    pub id: i64,
    pub store_id: i64,
    /// `YYYY-MM-DD`
    pub business_date: String,
    pub status: BusinessDayStatus,
    pub closed_by: Option<i64>,
    pub closed_at: Option<i64>,
    pub created_at: i64,
}

/// Per-pack totals for one business day. Unique per (business_day, pack).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DayPack {
    pub id: i64,
    pub business_day_id: i64,
    pub pack_id: i64,
    pub bin_id: Option<i64>,
    pub starting_serial: String,
    pub ending_serial: String,
    pub tickets_sold: i64,
    pub sales_amount: f64,
    pub created_at: i64,
}

/// Business day with its pack totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDayDetail {
    #[serde(flatten)]
    pub day: BusinessDay,
    pub packs: Vec<DayPack>,
    pub total_tickets_sold: i64,
    pub total_sales_amount: f64,
}
