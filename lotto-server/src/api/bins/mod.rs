//! Bin API 模块 (格位)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/bins", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/current", get(handler::current));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission(permissions::INVENTORY_MANAGE)));

    read_routes.merge(manage_routes)
}
