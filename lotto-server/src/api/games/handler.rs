//! Game API Handlers

use axum::{Json, extract::State};

use crate::auth::ScopedStore;
use crate::core::ServerState;
use crate::db::repository::game;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult, money, ok};
use shared::models::{Game, GameCreate};

/// GET /api/stores/:store_id/games - 门店游戏 + 州游戏
pub async fn list(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<Vec<Game>>> {
    let games =
        game::find_visible(&state.pool, scope.id(), scope.store.state_code.as_deref()).await?;
    Ok(ok(games))
}

/// POST /api/stores/:store_id/games
pub async fn create(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Json(payload): Json<GameCreate>,
) -> AppResult<ApiResponse<Game>> {
    validate_required_text(&payload.game_code, "game_code", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if !money::is_valid_price(payload.price) {
        return Err(AppError::validation(format!(
            "price must be positive and at most {}, got {}",
            money::MAX_TICKET_PRICE,
            payload.price
        ))
        .with_detail("field", "price"));
    }

    // 州游戏只能建在本店所属的州
    if let Some(code) = payload.state_code.as_deref() {
        if scope.store.state_code.as_deref() != Some(code) {
            return Err(AppError::validation(format!(
                "state_code {code} does not match the store's state"
            ))
            .with_detail("field", "state_code"));
        }
    }

    let created = game::create(&state.pool, scope.id(), payload).await?;
    tracing::info!(
        store_id = scope.id(),
        game_id = created.id,
        game_code = %created.game_code,
        "Game created"
    );
    Ok(ok(created))
}
