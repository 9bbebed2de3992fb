//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`stores`] - 门店
//! - [`games`] - 彩票游戏
//! - [`bins`] - 格位
//! - [`packs`] - 彩票本库存
//! - [`shifts`] - 班次与开班号
//! - [`lottery`] - 日结与营业期间
//!
//! 门店下的资源统一挂在 `/api/stores/{store_id}/...`，由
//! [`ScopedStore`](crate::auth::ScopedStore) 做门店归属校验。

pub mod middleware;

pub mod bins;
pub mod games;
pub mod health;
pub mod lottery;
pub mod packs;
pub mod shifts;
pub mod stores;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All resource routers, without middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(stores::router())
        .merge(games::router())
        .merge(bins::router())
        .merge(packs::router())
        .merge(shifts::router())
        .merge(lottery::router())
}

/// Router with the full middleware stack. Auth runs first.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::timeout_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
}
