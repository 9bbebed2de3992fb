//! Shift Closing Repository

use super::RepoResult;
use shared::models::{EntryMethod, ShiftClosing};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, shift_id, pack_id, closing_serial, entry_method, cashier_id, created_at";

pub async fn find_by_shift(pool: &SqlitePool, shift_id: i64) -> RepoResult<Vec<ShiftClosing>> {
    let closings = sqlx::query_as::<_, ShiftClosing>(&format!(
        "SELECT {COLUMNS} FROM shift_closing WHERE shift_id = ? ORDER BY created_at, id"
    ))
    .bind(shift_id)
    .fetch_all(pool)
    .await?;
    Ok(closings)
}

/// Which of `pack_ids` already have a closing in `shift_id`
pub async fn find_closed_packs(
    conn: &mut SqliteConnection,
    shift_id: i64,
    pack_ids: &[i64],
) -> RepoResult<Vec<i64>> {
    if pack_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT pack_id FROM shift_closing WHERE shift_id = ");
    qb.push_bind(shift_id);
    qb.push(" AND pack_id IN (");
    let mut separated = qb.separated(", ");
    for id in pack_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY pack_id");

    let ids = qb.build_query_scalar::<i64>().fetch_all(conn).await?;
    Ok(ids)
}

/// Unique per (shift, pack); a violation surfaces as `RepoError::Duplicate`.
pub async fn insert(
    db: impl SqliteExecutor<'_>,
    shift_id: i64,
    pack_id: i64,
    closing_serial: &str,
    entry_method: EntryMethod,
    cashier_id: i64,
    now: i64,
) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO shift_closing (id, shift_id, pack_id, closing_serial, entry_method, cashier_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(shift_id)
    .bind(pack_id)
    .bind(closing_serial)
    .bind(entry_method)
    .bind(cashier_id)
    .bind(now)
    .execute(db)
    .await?;
    Ok(id)
}
