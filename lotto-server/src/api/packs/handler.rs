//! Pack API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::auth::ScopedStore;
use crate::core::ServerState;
use crate::db::repository::pack;
use crate::inventory;
use crate::utils::{ApiResponse, AppResult, ok};
use shared::models::{Pack, PackActivate, PackReceive, PackStatus};

/// Query params for listing packs
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<PackStatus>,
}

/// GET /api/stores/:store_id/packs?status=ACTIVE
pub async fn list(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<Pack>>> {
    let packs = pack::find_by_store(&state.pool, scope.id(), query.status).await?;
    Ok(ok(packs))
}

/// GET /api/stores/:store_id/packs/:pack_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, pack_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Pack>> {
    let found = inventory::store_pack(&state.pool, scope.id(), pack_id).await?;
    Ok(ok(found))
}

/// POST /api/stores/:store_id/packs - 入库
pub async fn receive(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Json(payload): Json<PackReceive>,
) -> AppResult<ApiResponse<Pack>> {
    let received = inventory::receive_pack(&state.pool, &scope.store, payload).await?;
    Ok(ok(received))
}

/// POST /api/stores/:store_id/packs/:pack_id/activate - 上架
pub async fn activate(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, pack_id)): Path<(i64, i64)>,
    Json(payload): Json<PackActivate>,
) -> AppResult<ApiResponse<Pack>> {
    let activated =
        inventory::activate_pack(&state.pool, scope.id(), pack_id, payload.bin_id).await?;
    Ok(ok(activated))
}

/// POST /api/stores/:store_id/packs/:pack_id/return - 退回
pub async fn return_pack(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, pack_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Pack>> {
    let returned = inventory::return_pack(&state.pool, scope.id(), pack_id).await?;
    Ok(ok(returned))
}
