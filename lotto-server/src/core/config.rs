use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;

/// 服务器配置 - 门店后台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/lotto.db | SQLite 文件 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | 无 | 日志目录，未设置时只输出到控制台 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | JWT_SECRET / JWT_ISSUER / JWT_AUDIENCE / JWT_EXPIRATION_MINUTES | | 见 [`JwtConfig`] |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/lotto HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self, ServerError> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("database")
                .join("lotto.db")
                .to_string_lossy()
                .into_owned()
        });

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            jwt: JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            work_dir,
        })
    }

    /// 测试配置: 随机 JWT 密钥，内存数据库
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            database_path: ":memory:".into(),
            log_level: "debug".into(),
            log_dir: None,
            jwt: JwtConfig::with_random_secret(),
            environment: "test".into(),
            request_timeout_ms: 30000,
        }
    }

    /// 确保数据库所在目录存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if let Some(parent) = PathBuf::from(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_work_dir_creates_database_parent() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::for_tests();
        config.database_path = dir
            .path()
            .join("nested/database/lotto.db")
            .to_string_lossy()
            .into_owned();

        config.ensure_work_dir_structure().unwrap();
        assert!(dir.path().join("nested/database").is_dir());
    }

    #[test]
    fn test_environment_flags() {
        let mut config = Config::for_tests();
        assert!(!config.is_production());
        config.environment = "production".into();
        assert!(config.is_production());
        assert!(!config.is_development());
    }
}
