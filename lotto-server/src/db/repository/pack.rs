//! Pack Repository

use super::{RepoError, RepoResult};
use shared::models::{ActivatedPack, Pack, PackReceive, PackStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, game_id, store_id, pack_number, serial_start, serial_end, status, received_at, activated_at, depleted_at, returned_at, current_bin_id";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Pack>> {
    let pack = sqlx::query_as::<_, Pack>(&format!("SELECT {COLUMNS} FROM pack WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(pack)
}

/// Load every pack in `ids` that exists, regardless of store
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<Vec<Pack>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM pack WHERE id IN ("));
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let packs = qb.build_query_as::<Pack>().fetch_all(conn).await?;
    Ok(packs)
}

pub async fn find_by_store(
    pool: &SqlitePool,
    store_id: i64,
    status: Option<PackStatus>,
) -> RepoResult<Vec<Pack>> {
    let packs = sqlx::query_as::<_, Pack>(&format!(
        "SELECT {COLUMNS} FROM pack WHERE store_id = ?1 AND (?2 IS NULL OR status = ?2) ORDER BY received_at DESC, id"
    ))
    .bind(store_id)
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(packs)
}

/// Pack currently placed in a bin
pub async fn find_in_bin(db: impl SqliteExecutor<'_>, bin_id: i64) -> RepoResult<Option<Pack>> {
    let pack = sqlx::query_as::<_, Pack>(&format!(
        "SELECT {COLUMNS} FROM pack WHERE current_bin_id = ?"
    ))
    .bind(bin_id)
    .fetch_optional(db)
    .await?;
    Ok(pack)
}

/// Serial range must already be validated by the caller.
pub async fn insert(pool: &SqlitePool, store_id: i64, data: &PackReceive) -> RepoResult<Pack> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO pack (id, game_id, store_id, pack_number, serial_start, serial_end, status, received_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(data.game_id)
    .bind(store_id)
    .bind(&data.pack_number)
    .bind(&data.serial_start)
    .bind(&data.serial_end)
    .bind(PackStatus::Received)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to receive pack".into()))
}

/// RECEIVED -> ACTIVE, placed in `bin_id`
pub async fn activate(db: impl SqliteExecutor<'_>, id: i64, bin_id: i64, now: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE pack SET status = 'ACTIVE', activated_at = ?1, current_bin_id = ?2 WHERE id = ?3 AND status = 'RECEIVED'",
    )
    .bind(now)
    .bind(bin_id)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pack {id} not found or not RECEIVED")));
    }
    Ok(())
}

/// ACTIVE -> DEPLETED, releasing its bin
pub async fn mark_depleted(db: impl SqliteExecutor<'_>, id: i64, now: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE pack SET status = 'DEPLETED', depleted_at = ?1, current_bin_id = NULL WHERE id = ?2 AND status = 'ACTIVE'",
    )
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pack {id} not found or not ACTIVE")));
    }
    Ok(())
}

/// RECEIVED or ACTIVE -> RETURNED, releasing its bin
pub async fn mark_returned(db: impl SqliteExecutor<'_>, id: i64, now: i64) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE pack SET status = 'RETURNED', returned_at = ?1, current_bin_id = NULL WHERE id = ?2 AND status IN ('RECEIVED', 'ACTIVE')",
    )
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Pack {id} not found or already settled"
        )));
    }
    Ok(())
}

/// Packs activated at or after `since`, newest first
pub async fn find_activated_since(
    pool: &SqlitePool,
    store_id: i64,
    since: i64,
) -> RepoResult<Vec<ActivatedPack>> {
    let packs = sqlx::query_as::<_, ActivatedPack>(
        "SELECT p.id AS pack_id, p.pack_number, g.name AS game_name, g.price AS game_price, p.current_bin_id AS bin_id, p.status, p.activated_at \
         FROM pack p JOIN game g ON g.id = p.game_id \
         WHERE p.store_id = ? AND p.activated_at IS NOT NULL AND p.activated_at >= ? \
         ORDER BY p.activated_at DESC, p.id",
    )
    .bind(store_id)
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(packs)
}

pub async fn earliest_activation(pool: &SqlitePool, store_id: i64) -> RepoResult<Option<i64>> {
    let ts = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MIN(activated_at) FROM pack WHERE store_id = ?",
    )
    .bind(store_id)
    .fetch_one(pool)
    .await?;
    Ok(ts)
}
