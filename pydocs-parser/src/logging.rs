use anyhow::Context;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

/// Normalize a configured level name; unknown names fall back to `info`.
fn resolve_level(level: &str) -> &str {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => "info",
    }
}

/// `<log_dir>/<prefix>.log`, rolled over once it reaches `max_log_bytes`,
/// keeping `max_log_files` backups (`.1` is the newest).
fn file_writer(
    log_dir: &Path,
    prefix: &str,
    max_log_bytes: u64,
    max_log_files: usize,
) -> anyhow::Result<BasicRollingFileAppender> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;
    let path = log_dir.join(format!("{}.log", prefix));
    BasicRollingFileAppender::new(
        &path,
        RollingConditionBasic::new().max_size(max_log_bytes),
        max_log_files.max(1),
    )
    .with_context(|| format!("Failed to open log file {:?}", path))
}

pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    max_log_bytes: u64,
    max_log_files: usize,
) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();
    let resolved = resolve_level(level);

    let builder = EnvFilter::builder().with_default_directive(resolved.parse()?);

    let console_filter = builder.clone().parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());
    let file_filter = builder.parse_lossy(std::env::var("RUST_LOG").unwrap_or_default());

    let file_appender = file_writer(&log_dir, prefix, max_log_bytes, max_log_files)?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    if resolved != level {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    Ok(LoggerGuard(guard))
}
