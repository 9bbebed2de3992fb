//! Day Pack Repository

use super::RepoResult;
use shared::models::DayPack;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, business_day_id, pack_id, bin_id, starting_serial, ending_serial, tickets_sold, sales_amount, created_at";

pub async fn find_by_day(pool: &SqlitePool, business_day_id: i64) -> RepoResult<Vec<DayPack>> {
    let packs = sqlx::query_as::<_, DayPack>(&format!(
        "SELECT {COLUMNS} FROM day_pack WHERE business_day_id = ? ORDER BY created_at, id"
    ))
    .bind(business_day_id)
    .fetch_all(pool)
    .await?;
    Ok(packs)
}

/// Most recent ledger entry for a pack
pub async fn find_last_for_pack(
    db: impl SqliteExecutor<'_>,
    pack_id: i64,
) -> RepoResult<Option<DayPack>> {
    let pack = sqlx::query_as::<_, DayPack>(&format!(
        "SELECT {COLUMNS} FROM day_pack WHERE pack_id = ? ORDER BY created_at DESC, id DESC LIMIT 1"
    ))
    .bind(pack_id)
    .fetch_optional(db)
    .await?;
    Ok(pack)
}

pub async fn insert(db: impl SqliteExecutor<'_>, row: &DayPack) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO day_pack (id, business_day_id, pack_id, bin_id, starting_serial, ending_serial, tickets_sold, sales_amount, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(row.id)
    .bind(row.business_day_id)
    .bind(row.pack_id)
    .bind(row.bin_id)
    .bind(&row.starting_serial)
    .bind(&row.ending_serial)
    .bind(row.tickets_sold)
    .bind(row.sales_amount)
    .bind(row.created_at)
    .execute(db)
    .await?;
    Ok(())
}
