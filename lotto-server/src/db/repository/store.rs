//! Store Repository

use super::{RepoError, RepoResult};
use shared::models::{Store, StoreCreate};
use sqlx::{SqliteExecutor, SqlitePool};

const COLUMNS: &str = "id, company_id, name, state_code, timezone, created_at";

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Store>> {
    let store = sqlx::query_as::<_, Store>(&format!("SELECT {COLUMNS} FROM store WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(store)
}

pub async fn find_by_company(pool: &SqlitePool, company_id: i64) -> RepoResult<Vec<Store>> {
    let stores = sqlx::query_as::<_, Store>(&format!(
        "SELECT {COLUMNS} FROM store WHERE company_id = ? ORDER BY name"
    ))
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(stores)
}

/// Timezone must already be validated by the caller.
pub async fn create(pool: &SqlitePool, company_id: i64, data: StoreCreate) -> RepoResult<Store> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query("INSERT INTO store (id, company_id, name, state_code, timezone, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)")
        .bind(id)
        .bind(company_id)
        .bind(&data.name)
        .bind(&data.state_code)
        .bind(&data.timezone)
        .bind(now)
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store".into()))
}
