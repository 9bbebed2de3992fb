//! Lottery day API 模块 (日结 / 营业期间)
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /day/close | POST | day:close |
//! | /day/period | GET | - |
//! | /day/activated-packs | GET | - |
//! | /days | GET | reports:view |
//! | /days/{date} | GET | reports:view |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{permissions, require_permission};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_id}/lottery", routes())
}

fn routes() -> Router<ServerState> {
    let period_routes = Router::new()
        .route("/day/period", get(handler::period))
        .route("/day/activated-packs", get(handler::activated_packs));

    let close_routes = Router::new()
        .route("/day/close", post(handler::close_day))
        .layer(middleware::from_fn(require_permission(permissions::DAY_CLOSE)));

    let report_routes = Router::new()
        .route("/days", get(handler::list_days))
        .route("/days/{date}", get(handler::get_day))
        .layer(middleware::from_fn(require_permission(permissions::REPORTS_VIEW)));

    period_routes.merge(close_routes).merge(report_routes)
}
