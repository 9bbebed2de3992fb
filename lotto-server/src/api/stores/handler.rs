//! Store API Handlers

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::{CurrentUser, ScopedStore};
use crate::core::ServerState;
use crate::db::repository::store;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use crate::utils::{ApiResponse, AppResult, ok, time};
use shared::models::{Store, StoreCreate};

/// GET /api/stores - 当前公司的门店
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<ApiResponse<Vec<Store>>> {
    let stores = store::find_by_company(&state.pool, user.company_id).await?;
    Ok(ok(stores))
}

/// GET /api/stores/:store_id
pub async fn get_by_id(scope: ScopedStore) -> AppResult<ApiResponse<Store>> {
    Ok(ok(scope.store))
}

/// POST /api/stores - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<ApiResponse<Store>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.state_code, "state_code", MAX_SHORT_TEXT_LEN)?;
    time::parse_timezone(&payload.timezone)?;

    let created = store::create(&state.pool, user.company_id, payload).await?;
    tracing::info!(
        store_id = created.id,
        company_id = created.company_id,
        timezone = %created.timezone,
        "Store created"
    );
    Ok(ok(created))
}
