//! Shift Opening Repository

use super::{RepoError, RepoResult};
use shared::models::ShiftOpening;
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, shift_id, pack_id, opening_serial, created_at";

pub async fn find(
    db: impl SqliteExecutor<'_>,
    shift_id: i64,
    pack_id: i64,
) -> RepoResult<Option<ShiftOpening>> {
    let opening = sqlx::query_as::<_, ShiftOpening>(&format!(
        "SELECT {COLUMNS} FROM shift_opening WHERE shift_id = ? AND pack_id = ?"
    ))
    .bind(shift_id)
    .bind(pack_id)
    .fetch_optional(db)
    .await?;
    Ok(opening)
}

pub async fn find_by_shift(pool: &SqlitePool, shift_id: i64) -> RepoResult<Vec<ShiftOpening>> {
    let openings = sqlx::query_as::<_, ShiftOpening>(&format!(
        "SELECT {COLUMNS} FROM shift_opening WHERE shift_id = ? ORDER BY created_at, id"
    ))
    .bind(shift_id)
    .fetch_all(pool)
    .await?;
    Ok(openings)
}

/// Unique per (shift, pack); a second insert is [`RepoError::Duplicate`].
pub async fn insert(
    db: impl SqliteExecutor<'_>,
    shift_id: i64,
    pack_id: i64,
    opening_serial: &str,
    now: i64,
) -> RepoResult<ShiftOpening> {
    let opening = ShiftOpening {
        id: shared::util::snowflake_id(),
        shift_id,
        pack_id,
        opening_serial: opening_serial.to_string(),
        created_at: now,
    };
    sqlx::query(
        "INSERT INTO shift_opening (id, shift_id, pack_id, opening_serial, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(opening.id)
    .bind(opening.shift_id)
    .bind(opening.pack_id)
    .bind(&opening.opening_serial)
    .bind(opening.created_at)
    .execute(db)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!(
            "Opening already recorded for pack {pack_id} in shift {shift_id}"
        )),
        other => other,
    })?;
    Ok(opening)
}
