//! Shift API 模块 (班次管理)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/shifts", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{shift_id}", get(handler::get_by_id))
        .route("/{shift_id}/openings", get(handler::list_openings))
        .route("/{shift_id}/closings", get(handler::list_closings));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{shift_id}/start", post(handler::start))
        .route("/{shift_id}/close", post(handler::close))
        .route("/{shift_id}/openings", post(handler::record_opening))
        .layer(middleware::from_fn(require_permission(permissions::SHIFTS_MANAGE)));

    read_routes.merge(manage_routes)
}
