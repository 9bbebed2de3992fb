//! Game Model (彩票游戏)

use serde::{Deserialize, Serialize};

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GameStatus {
    #[default]
    Active,
    Inactive,
}

/// A lottery product definition.
///
/// A game with `store_id = None` is state-scoped and visible to every store
/// in `state_code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Game {
    pub id: i64,
    pub store_id: Option<i64>,
    pub state_code: Option<String>,
    pub game_code: String,
    pub name: String,
    /// Ticket price
    pub price: f64,
    /// Face value of a full pack
    pub pack_value: f64,
    pub tickets_per_pack: i64,
    pub status: GameStatus,
    pub created_at: i64,
}

/// Create game payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreate {
    pub game_code: String,
    pub name: String,
    pub price: f64,
    pub tickets_per_pack: i64,
    /// Create as a state-scoped game instead of a store game
    #[serde(default)]
    pub state_code: Option<String>,
}
