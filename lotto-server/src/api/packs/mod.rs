//! Pack API 模块 (彩票本)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/packs", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{pack_id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", post(handler::receive))
        .route("/{pack_id}/activate", post(handler::activate))
        .route("/{pack_id}/return", post(handler::return_pack))
        .layer(middleware::from_fn(require_permission(permissions::INVENTORY_MANAGE)));

    read_routes.merge(manage_routes)
}
