//! Game Repository

use super::{RepoError, RepoResult};
use rust_decimal::prelude::*;
use shared::models::{Game, GameCreate, GameStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, store_id, state_code, game_code, name, price, pack_value, tickets_per_pack, status, created_at";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Game>> {
    let game = sqlx::query_as::<_, Game>(&format!("SELECT {COLUMNS} FROM game WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(game)
}

/// Store games plus state-scoped games for `state_code`
pub async fn find_visible(
    pool: &SqlitePool,
    store_id: i64,
    state_code: Option<&str>,
) -> RepoResult<Vec<Game>> {
    let games = sqlx::query_as::<_, Game>(&format!(
        "SELECT {COLUMNS} FROM game WHERE store_id = ?1 OR (store_id IS NULL AND state_code = ?2) ORDER BY game_code"
    ))
    .bind(store_id)
    .bind(state_code)
    .fetch_all(pool)
    .await?;
    Ok(games)
}

pub async fn create(pool: &SqlitePool, store_id: i64, data: GameCreate) -> RepoResult<Game> {
    if data.tickets_per_pack <= 0 {
        return Err(RepoError::Validation(format!(
            "tickets_per_pack must be positive: {}",
            data.tickets_per_pack
        )));
    }
    let price = Decimal::from_f64(data.price)
        .ok_or_else(|| RepoError::Validation(format!("Invalid price: {}", data.price)))?;
    let pack_value = (price * Decimal::from(data.tickets_per_pack))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default();

    // State games are shared by every store in the state
    let owner = match data.state_code {
        Some(_) => None,
        None => Some(store_id),
    };

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO game (id, store_id, state_code, game_code, name, price, pack_value, tickets_per_pack, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .bind(id)
    .bind(owner)
    .bind(&data.state_code)
    .bind(&data.game_code)
    .bind(&data.name)
    .bind(data.price)
    .bind(pack_value)
    .bind(data.tickets_per_pack)
    .bind(GameStatus::Active)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create game".into()))
}
