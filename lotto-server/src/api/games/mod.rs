//! Game API 模块 (彩票游戏)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/games", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(permissions::INVENTORY_MANAGE)));

    read_routes.merge(manage_routes)
}
