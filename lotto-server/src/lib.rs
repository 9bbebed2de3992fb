//! Lotto Server - 彩票门店后台
//!
//! # 架构概述
//!
//! 门店的彩票库存、班次和日结对账服务：
//!
//! - **库存** (`inventory`): 彩票本入库、上架到格位、退回，开班号登记
//! - **日结** (`day_close`): 校验收班号并在单个事务内写入班次收班记录和营业日汇总
//! - **营业期间** (`business_period`): 由营业日账本推导出的当前期间
//! - **认证** (`auth`): JWT + 门店归属校验
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! 序号运算和未扫描格位处理在 `shared::lottery`。
//!
//! # 模块结构
//!
//! ```text
//! lotto-server/src/
//! ├── core/             # 配置、状态、错误、服务器
//! ├── auth/             # JWT 认证、权限、门店作用域
//! ├── api/              # HTTP 路由和处理器
//! ├── db/               # SQLite 连接池和仓储
//! ├── inventory/        # 彩票本/格位库存
//! ├── day_close/        # 日结编排
//! ├── business_period.rs
//! └── utils/            # 错误、日志、时间、金额、校验
//! ```

pub mod api;
pub mod auth;
pub mod business_period;
pub mod core;
pub mod day_close;
pub mod db;
pub mod inventory;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use day_close::{DayCloseContext, DayCloseError, close_day, close_day_at};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 日志保留天数
const LOG_RETENTION_DAYS: i64 = 30;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并初始化日志
///
/// | 变量 | 默认 |
/// |------|------|
/// | LOG_LEVEL | info |
/// | LOG_JSON | false |
/// | LOG_DIR | (仅控制台) |
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let json = std::env::var("LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let log_dir = std::env::var("LOG_DIR").ok();

    init_logger_with_file(&level, json, log_dir.as_deref())?;

    if let Some(dir) = log_dir.as_deref() {
        if let Err(e) = cleanup_old_logs(std::path::Path::new(dir), LOG_RETENTION_DAYS) {
            tracing::warn!(error = %e, "Failed to clean up old logs");
        }
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __          __  __
   / /   ____  / /_/ /_____
  / /   / __ \/ __/ __/ __ \
 / /___/ /_/ / /_/ /_/ /_/ /
/_____/\____/\__/\__/\____/
    "#
    );
}
