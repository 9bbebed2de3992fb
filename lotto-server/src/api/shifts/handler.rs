//! Shift API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::ScopedStore;
use crate::core::ServerState;
use crate::db::repository::{RepoError, shift, shift_closing, shift_opening};
use crate::inventory;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok};
use shared::models::{
    Shift, ShiftClose, ShiftClosing, ShiftCreate, ShiftOpening, ShiftOpeningCreate, ShiftStatus,
};

/// GET /api/stores/:store_id/shifts - 未结班次
pub async fn list(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<Vec<Shift>>> {
    let shifts = shift::find_unclosed(&state.pool, scope.id()).await?;
    Ok(ok(shifts))
}

/// GET /api/stores/:store_id/shifts/:shift_id
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Shift>> {
    let found = inventory::store_shift(&state.pool, scope.id(), shift_id).await?;
    Ok(ok(found))
}

/// POST /api/stores/:store_id/shifts - 开班
pub async fn create(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<ApiResponse<Shift>> {
    validate_required_text(&payload.terminal_name, "terminal_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.cashier_name, "cashier_name", MAX_NAME_LEN)?;

    let opened = shift::create(&state.pool, scope.id(), scope.user.id, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::ShiftAlreadyOpen, msg),
            other => other.into(),
        })?;

    tracing::info!(
        store_id = scope.id(),
        shift_id = opened.id,
        terminal = %opened.terminal_name,
        opened_by = scope.user.id,
        "Shift opened"
    );
    Ok(ok(opened))
}

/// POST /api/stores/:store_id/shifts/:shift_id/start - NOT_STARTED -> OPEN
pub async fn start(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Shift>> {
    let current = inventory::store_shift(&state.pool, scope.id(), shift_id).await?;
    if current.status != ShiftStatus::NotStarted {
        return Err(AppError::with_message(
            ErrorCode::InvalidRequest,
            format!("Shift {shift_id} is already {:?}", current.status),
        ));
    }

    let started = shift::start(&state.pool, shift_id).await?;
    tracing::info!(store_id = scope.id(), shift_id, "Shift started");
    Ok(ok(started))
}

/// POST /api/stores/:store_id/shifts/:shift_id/close - 收班
pub async fn close(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
    Json(payload): Json<ShiftClose>,
) -> AppResult<ApiResponse<Shift>> {
    let current = inventory::store_shift(&state.pool, scope.id(), shift_id).await?;
    if current.status.is_closed() {
        return Err(AppError::with_message(
            ErrorCode::ShiftNotOpen,
            format!("Shift {shift_id} is already closed"),
        ));
    }

    let closed = shift::close(&state.pool, shift_id, payload).await?;
    tracing::info!(
        store_id = scope.id(),
        shift_id,
        closing_cash = ?closed.closing_cash,
        "Shift closed"
    );
    Ok(ok(closed))
}

/// GET /api/stores/:store_id/shifts/:shift_id/openings
pub async fn list_openings(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Vec<ShiftOpening>>> {
    inventory::store_shift(&state.pool, scope.id(), shift_id).await?;
    let openings = shift_opening::find_by_shift(&state.pool, shift_id).await?;
    Ok(ok(openings))
}

/// POST /api/stores/:store_id/shifts/:shift_id/openings - 记录开班号
pub async fn record_opening(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
    Json(payload): Json<ShiftOpeningCreate>,
) -> AppResult<ApiResponse<ShiftOpening>> {
    let opening = inventory::record_opening(&state.pool, scope.id(), shift_id, payload).await?;
    Ok(ok(opening))
}

/// GET /api/stores/:store_id/shifts/:shift_id/closings
pub async fn list_closings(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, shift_id)): Path<(i64, i64)>,
) -> AppResult<ApiResponse<Vec<ShiftClosing>>> {
    inventory::store_shift(&state.pool, scope.id(), shift_id).await?;
    let closings = shift_closing::find_by_shift(&state.pool, shift_id).await?;
    Ok(ok(closings))
}
