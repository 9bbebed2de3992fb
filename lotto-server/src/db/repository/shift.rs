//! Shift Repository

use super::{RepoError, RepoResult};
use shared::models::{OpenShiftInfo, Shift, ShiftClose, ShiftCreate, ShiftStatus};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, store_id, terminal_name, cashier_id, cashier_name, status, opened_at, opened_by, closed_at, closing_cash";

fn validate_cash_amount(amount: f64, field_name: &str) -> RepoResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RepoError::Validation(format!(
            "{field_name} must be a non-negative number: {amount}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(&format!("SELECT {COLUMNS} FROM shift WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(shift)
}

/// Shifts that are not CLOSED, oldest first
pub async fn find_unclosed(pool: &SqlitePool, store_id: i64) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {COLUMNS} FROM shift WHERE store_id = ? AND status != 'CLOSED' ORDER BY opened_at, id"
    ))
    .bind(store_id)
    .fetch_all(pool)
    .await?;
    Ok(shifts)
}

/// OPEN or ACTIVE shifts that block a day close, excluding the submitting shift
pub async fn find_blocking(
    db: impl SqliteExecutor<'_>,
    store_id: i64,
    exclude_shift_id: Option<i64>,
) -> RepoResult<Vec<OpenShiftInfo>> {
    let shifts = sqlx::query_as::<_, OpenShiftInfo>(
        "SELECT id, terminal_name, cashier_name, status, opened_at FROM shift \
         WHERE store_id = ?1 AND status IN ('OPEN', 'ACTIVE') AND (?2 IS NULL OR id != ?2) \
         ORDER BY opened_at, id",
    )
    .bind(store_id)
    .bind(exclude_shift_id)
    .fetch_all(db)
    .await?;
    Ok(shifts)
}

/// Most recently opened shift of a store, any status
pub async fn find_latest(db: impl SqliteExecutor<'_>, store_id: i64) -> RepoResult<Option<Shift>> {
    let shift = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {COLUMNS} FROM shift WHERE store_id = ? ORDER BY opened_at DESC, id DESC LIMIT 1"
    ))
    .bind(store_id)
    .fetch_optional(db)
    .await?;
    Ok(shift)
}

/// Open a shift. One unclosed shift per terminal.
pub async fn create(
    pool: &SqlitePool,
    store_id: i64,
    opened_by: i64,
    data: ShiftCreate,
) -> RepoResult<Shift> {
    let mut tx = pool.begin().await?;

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM shift WHERE store_id = ? AND terminal_name = ? AND status != 'CLOSED' LIMIT 1",
    )
    .bind(store_id)
    .bind(&data.terminal_name)
    .fetch_optional(&mut *tx)
    .await?;
    if let Some(id) = existing {
        return Err(RepoError::Duplicate(format!(
            "Terminal '{}' already has shift {id} open",
            data.terminal_name
        )));
    }

    let status = if data.deferred {
        ShiftStatus::NotStarted
    } else {
        ShiftStatus::Open
    };
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO shift (id, store_id, terminal_name, cashier_id, cashier_name, status, opened_at, opened_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(store_id)
    .bind(&data.terminal_name)
    .bind(data.cashier_id)
    .bind(&data.cashier_name)
    .bind(status)
    .bind(now)
    .bind(opened_by)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create shift".into()))
}

/// NOT_STARTED -> OPEN
pub async fn start(pool: &SqlitePool, id: i64) -> RepoResult<Shift> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE shift SET status = 'OPEN', opened_at = ?1 WHERE id = ?2 AND status = 'NOT_STARTED'",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Shift {id} not found or already started"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {id} not found")))
}

/// OPEN -> ACTIVE on first recorded activity. No-op otherwise.
pub async fn mark_active(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE shift SET status = 'ACTIVE' WHERE id = ? AND status = 'OPEN'")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn close(pool: &SqlitePool, id: i64, data: ShiftClose) -> RepoResult<Shift> {
    if let Some(cash) = data.closing_cash {
        validate_cash_amount(cash, "Closing cash")?;
    }
    let now = shared::util::now_millis();

    let rows = sqlx::query(
        "UPDATE shift SET status = 'CLOSED', closed_at = ?1, closing_cash = ?2 WHERE id = ?3 AND status != 'CLOSED'",
    )
    .bind(now)
    .bind(data.closing_cash)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Shift {id} not found or already closed"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Shift {id} not found")))
}
