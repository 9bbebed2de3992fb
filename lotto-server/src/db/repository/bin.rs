//! Bin Repository

use super::{RepoError, RepoResult};
use shared::models::{Bin, BinCreate};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, store_id, name, display_order, is_active, created_at";

/// An active bin joined with the active pack it holds
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OccupiedBin {
    pub bin_id: i64,
    pub bin_name: String,
    pub display_order: i64,
    pub pack_id: i64,
    pub pack_number: String,
    pub serial_start: String,
    pub serial_end: String,
    pub game_name: String,
    pub game_price: f64,
}

impl OccupiedBin {
    pub fn bin_number(&self) -> i64 {
        self.display_order + 1
    }
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Bin>> {
    let bin = sqlx::query_as::<_, Bin>(&format!("SELECT {COLUMNS} FROM bin WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(bin)
}

/// Active bins of a store in display order
pub async fn find_active(db: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<Bin>> {
    let bins = sqlx::query_as::<_, Bin>(&format!(
        "SELECT {COLUMNS} FROM bin WHERE store_id = ? AND is_active = 1 ORDER BY display_order, id"
    ))
    .bind(store_id)
    .fetch_all(db)
    .await?;
    Ok(bins)
}

/// Active bins currently holding an ACTIVE pack, in display order.
///
/// This is the set a day-close submission must cover exactly.
pub async fn find_occupied(db: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Vec<OccupiedBin>> {
    let rows = sqlx::query_as::<_, OccupiedBin>(
        "SELECT b.id AS bin_id, b.name AS bin_name, b.display_order, p.id AS pack_id, p.pack_number, p.serial_start, p.serial_end, g.name AS game_name, g.price AS game_price \
         FROM bin b \
         JOIN pack p ON p.current_bin_id = b.id AND p.status = 'ACTIVE' \
         JOIN game g ON g.id = p.game_id \
         WHERE b.store_id = ? AND b.is_active = 1 \
         ORDER BY b.display_order, b.id",
    )
    .bind(store_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, store_id: i64, data: BinCreate) -> RepoResult<Bin> {
    if data.display_order < 0 {
        return Err(RepoError::Validation(format!(
            "display_order cannot be negative: {}",
            data.display_order
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO bin (id, store_id, name, display_order, is_active, created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
    )
    .bind(id)
    .bind(store_id)
    .bind(&data.name)
    .bind(data.display_order)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create bin".into()))
}
