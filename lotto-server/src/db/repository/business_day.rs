//! Business Day Repository

use super::{RepoError, RepoResult};
use shared::models::BusinessDay;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, store_id, business_date, status, closed_by, closed_at, created_at";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<BusinessDay>> {
    let day = sqlx::query_as::<_, BusinessDay>(&format!(
        "SELECT {COLUMNS} FROM business_day WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(day)
}

pub async fn find_by_date(
    db: impl SqliteExecutor<'_>,
    store_id: i64,
    business_date: &str,
) -> RepoResult<Option<BusinessDay>> {
    let day = sqlx::query_as::<_, BusinessDay>(&format!(
        "SELECT {COLUMNS} FROM business_day WHERE store_id = ? AND business_date = ?"
    ))
    .bind(store_id)
    .bind(business_date)
    .fetch_optional(db)
    .await?;
    Ok(day)
}

/// Latest CLOSED day of a store
pub async fn find_last_closed(
    db: impl SqliteExecutor<'_>,
    store_id: i64,
) -> RepoResult<Option<BusinessDay>> {
    let day = sqlx::query_as::<_, BusinessDay>(&format!(
        "SELECT {COLUMNS} FROM business_day WHERE store_id = ? AND status = 'CLOSED' ORDER BY business_date DESC LIMIT 1"
    ))
    .bind(store_id)
    .fetch_optional(db)
    .await?;
    Ok(day)
}

pub async fn find_recent(pool: &SqlitePool, store_id: i64, limit: i64) -> RepoResult<Vec<BusinessDay>> {
    let days = sqlx::query_as::<_, BusinessDay>(&format!(
        "SELECT {COLUMNS} FROM business_day WHERE store_id = ? ORDER BY business_date DESC LIMIT ?"
    ))
    .bind(store_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(days)
}

/// Resolve the (store, date) row, creating it OPEN on first use
pub async fn get_or_create(
    conn: &mut SqliteConnection,
    store_id: i64,
    business_date: &str,
    now: i64,
) -> RepoResult<BusinessDay> {
    sqlx::query(
        "INSERT INTO business_day (id, store_id, business_date, status, created_at) VALUES (?1, ?2, ?3, 'OPEN', ?4) \
         ON CONFLICT (store_id, business_date) DO NOTHING",
    )
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(business_date)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    find_by_date(&mut *conn, store_id, business_date)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Failed to resolve business day {business_date}")))
}

/// OPEN -> CLOSED
pub async fn mark_closed(
    db: impl SqliteExecutor<'_>,
    id: i64,
    closed_by: i64,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE business_day SET status = 'CLOSED', closed_by = ?1, closed_at = ?2 WHERE id = ?3 AND status = 'OPEN'",
    )
    .bind(closed_by)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Duplicate(format!("Business day {id} is already closed")));
    }
    Ok(())
}
