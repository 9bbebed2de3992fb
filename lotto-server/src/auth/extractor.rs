//! Store-scope extractor
//!
//! Every `/api/stores/{store_id}/...` handler takes a [`ScopedStore`]: the
//! authenticated user plus the store they are allowed to act on.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::store;
use crate::security_log;
use crate::utils::time;
use shared::models::Store;

/// Store resolved from the path and checked against the caller's company
#[derive(Debug, Clone)]
pub struct ScopedStore {
    pub user: CurrentUser,
    pub store: Store,
    pub tz: Tz,
}

impl ScopedStore {
    pub fn id(&self) -> i64 {
        self.store.id
    }
}

/// Load a store the user may act on.
///
/// A missing store and a store of another company produce the same
/// `PERMISSION_DENIED` so store ids cannot be probed.
pub async fn authorize_store(
    pool: &SqlitePool,
    user: &CurrentUser,
    store_id: i64,
) -> Result<Store, AppError> {
    match store::find_by_id(pool, store_id).await? {
        Some(s) if s.company_id == user.company_id => Ok(s),
        _ => {
            security_log!(
                "WARN",
                "store_access_denied",
                user_id = user.id,
                company_id = user.company_id,
                store_id = store_id
            );
            Err(AppError::forbidden("Access to this store is not allowed"))
        }
    }
}

impl FromRequestParts<ServerState> for ScopedStore {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::unauthorized())?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let store_id = params
            .get("store_id")
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| AppError::validation("Invalid store_id"))?;

        let store = authorize_store(&state.pool, &user, store_id).await?;
        let tz = time::parse_timezone(&store.timezone)?;

        Ok(Self { user, store, tz })
    }
}
