//! Store Model (门店)

use serde::{Deserialize, Serialize};

/// A retail location selling lottery tickets.
///
/// `timezone` is an IANA name; business dates are always resolved in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    /// Lottery jurisdiction, e.g. `GA`. Selects state-scoped games.
    pub state_code: Option<String>,
    pub timezone: String,
    pub created_at: i64,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    #[serde(default)]
    pub state_code: Option<String>,
    /// IANA timezone name, e.g. `America/New_York`
    pub timezone: String,
}
