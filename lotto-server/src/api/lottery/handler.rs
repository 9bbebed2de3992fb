//! Lottery day API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::ScopedStore;
use crate::business_period;
use crate::core::ServerState;
use crate::day_close::{self, DayCloseContext};
use crate::db::repository::{business_day, day_pack};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, money, ok, time};
use shared::models::{
    ActivatedPack, BusinessDay, BusinessDayDetail, BusinessPeriod, DayCloseRequest,
    DayCloseResult,
};

const MAX_DAYS_LIMIT: i64 = 366;

/// POST /api/stores/:store_id/lottery/day/close - 日结
pub async fn close_day(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Json(payload): Json<DayCloseRequest>,
) -> AppResult<ApiResponse<DayCloseResult>> {
    let ctx = DayCloseContext {
        store_id: scope.id(),
        actor_id: scope.user.id,
        current_shift_id: payload.current_shift_id,
    };
    let result = day_close::close_day(&state.pool, ctx, payload.into_closings()).await?;
    Ok(ok(result))
}

/// GET /api/stores/:store_id/lottery/day/period - 当前营业期间
pub async fn period(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<BusinessPeriod>> {
    let period =
        business_period::current_period(&state.pool, &scope.store, scope.tz, Utc::now()).await?;
    Ok(ok(period))
}

/// GET /api/stores/:store_id/lottery/day/activated-packs - 本期上架的彩票本
pub async fn activated_packs(
    State(state): State<ServerState>,
    scope: ScopedStore,
) -> AppResult<ApiResponse<Vec<ActivatedPack>>> {
    let packs =
        business_period::activated_packs(&state.pool, &scope.store, scope.tz, Utc::now()).await?;
    Ok(ok(packs))
}

/// Query params for listing business days
#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    30
}

/// GET /api/stores/:store_id/lottery/days?limit=30
pub async fn list_days(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Query(query): Query<DaysQuery>,
) -> AppResult<ApiResponse<Vec<BusinessDay>>> {
    let limit = query.limit.clamp(1, MAX_DAYS_LIMIT);
    let days = business_day::find_recent(&state.pool, scope.id(), limit).await?;
    Ok(ok(days))
}

/// GET /api/stores/:store_id/lottery/days/:date - 营业日明细
pub async fn get_day(
    State(state): State<ServerState>,
    scope: ScopedStore,
    Path((_, date)): Path<(i64, String)>,
) -> AppResult<ApiResponse<BusinessDayDetail>> {
    let date = time::format_date(time::parse_date(&date)?);
    let day = business_day::find_by_date(&state.pool, scope.id(), &date)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::BusinessDayNotFound,
                format!("No business day for {date}"),
            )
        })?;

    let packs = day_pack::find_by_day(&state.pool, day.id).await?;
    let total_tickets_sold = packs.iter().map(|p| p.tickets_sold).sum();
    let total_sales: Decimal = packs.iter().map(|p| money::to_decimal(p.sales_amount)).sum();

    Ok(ok(BusinessDayDetail {
        day,
        packs,
        total_tickets_sold,
        total_sales_amount: money::to_f64(total_sales),
    }))
}
