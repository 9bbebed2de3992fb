//! 请求日志 / 超时中间件

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, ErrorCode};

/// 请求日志中间件
///
/// 记录请求 ID、方法、路由、认证用户、状态码和延迟
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let user_id = req.extensions().get::<CurrentUser>().map(|u| u.id);

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            user_id = ?user_id,
            status = status.as_u16(),
            latency_ms,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            user_id = ?user_id,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        );
    }

    response
}

/// 超时中间件 (`REQUEST_TIMEOUT_MS`)
pub async fn timeout_middleware(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let limit = Duration::from_millis(state.config.request_timeout_ms);
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(timeout_ms = state.config.request_timeout_ms, "Request timed out");
            AppError::with_message(ErrorCode::InternalError, "Request timed out").into_response()
        }
    }
}
