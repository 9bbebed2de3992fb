//! Bin API Handlers

use axum::{Json, extract::State};

use crate::auth::ScopedStore;
use crate::core::ServerState;
use crate::db::repository::bin;
use crate::inventory;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppResult, ok};
use shared::models::{Bin, BinCreate, CurrentBin};

/// GET /api/stores/:store_id/bins - 启用中的格位
pub async fn list(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<Vec<Bin>>> {
    let bins = bin::find_active(&state.pool, scope.id()).await?;
    Ok(ok(bins))
}

/// GET /api/stores/:store_id/bins/current - 当前营业期间的格位及起始号
pub async fn current(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<Vec<CurrentBin>>> {
    let bins = inventory::current_bins(&state.pool, scope.id()).await?;
    Ok(ok(bins))
}

/// POST /api/stores/:store_id/bins
pub async fn create(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Json(payload): Json<BinCreate>,
) -> AppResult<ApiResponse<Bin>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let created = bin::create(&state.pool, scope.id(), payload).await?;
    tracing::info!(store_id = scope.id(), bin_id = created.id, "Bin created");
    Ok(ok(created))
}
