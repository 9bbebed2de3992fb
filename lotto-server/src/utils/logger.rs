//! Logging Infrastructure
//!
//! Structured logging for development and production:
//! - console output, plain or JSON
//! - daily rotating application logs under `<log_dir>/app`
//! - security events (`target: "security"`) kept apart under `<log_dir>/security`

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, filter, fmt, prelude::*};

/// Initialize the logger (console only, `info`)
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system with optional daily rotating files
///
/// `RUST_LOG` overrides `level` when set.
///
/// ```no_run
/// // Development setup (console only)
/// lotto_server::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// lotto_server::init_logger_with_file("info", true, Some("./work_dir/logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let (app_layer, security_layer) = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            let app_log_dir = log_dir.join("app");
            let security_log_dir = log_dir.join("security");
            fs::create_dir_all(&app_log_dir)?;
            fs::create_dir_all(&security_log_dir)?;

            let app_log = RollingFileAppender::new(Rotation::DAILY, app_log_dir, "app");
            let security_log = RollingFileAppender::new(Rotation::DAILY, security_log_dir, "security");

            let app_layer = fmt::layer()
                .json()
                .with_writer(app_log)
                .with_filter(filter::filter_fn(|meta| meta.target() != "security"));
            let security_layer = fmt::layer()
                .json()
                .with_writer(security_log)
                .with_filter(filter::filter_fn(|meta| meta.target() == "security"));
            (Some(app_layer), Some(security_layer))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(())
}

/// Delete application log files older than `days`.
///
/// Security logs are never deleted.
pub fn cleanup_old_logs(log_dir: &Path, days: i64) -> anyhow::Result<()> {
    let cutoff = chrono::Utc::now().date_naive() - chrono::Duration::days(days);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        // RollingFileAppender names files app.YYYY-MM-DD
        let Some(date_part) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix("app."))
        else {
            continue;
        };
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %path.display(), "Deleted old log file");
        }
    }

    Ok(())
}
