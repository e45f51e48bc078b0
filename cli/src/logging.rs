//! Tracing setup for a one-request process.
//!
//! Logging never decides the outcome of a request: any problem setting it up
//! is collected in [`LoggingSetup::problems`] and the process carries on with
//! whatever layers could be built.

use std::path::{Path, PathBuf};

use humanizer_core::api::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Daily files are named `humanizer.log.<YYYY-MM-DD>`.
pub const LOG_FILE_PREFIX: &str = "humanizer.log";

#[derive(Default)]
pub struct LoggingSetup {
    /// Flushes the file writer when dropped; hold it until the process exits.
    pub guard: Option<WorkerGuard>,
    pub problems: Vec<String>,
}

pub fn init_tracing(logging: &LoggingConfig) -> LoggingSetup {
    let mut setup = LoggingSetup::default();
    if !logging.enabled {
        return setup;
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level).unwrap_or_else(|e| {
            setup
                .problems
                .push(format!("invalid log level '{}': {}", logging.level, e));
            EnvFilter::new("info")
        }),
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = log_dir(logging);
        let keep = logging.max_files.max(1);
        match open_log_file(&dir, keep) {
            Ok(appender) => {
                if let Err(e) = prune_old_logs(&dir, keep) {
                    setup
                        .problems
                        .push(format!("pruning old logs in {} failed: {e}", dir.display()));
                }
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                setup.guard = Some(guard);
                maybe_writer = Some(non_blocking);
            }
            Err(e) => setup.problems.push(e),
        }
    }

    if !logging.console && maybe_writer.is_none() {
        return setup;
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        setup.problems.push(format!("tracing init failed: {e}"));
    }

    setup
}

fn log_dir(logging: &LoggingConfig) -> PathBuf {
    match logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        Some(d) => PathBuf::from(d),
        None => std::env::temp_dir().join("humanizer"),
    }
}

fn open_log_file(dir: &Path, keep: usize) -> Result<RollingFileAppender, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("create log dir {} failed: {e}", dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(keep)
        .build(dir)
        .map_err(|e| format!("open log file in {} failed: {e}", dir.display()))
}

/// Deletes all but the newest `keep` daily files. Returns how many were removed.
pub fn prune_old_logs(dir: &Path, keep: usize) -> std::io::Result<usize> {
    let dated_prefix = format!("{LOG_FILE_PREFIX}.");
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(&dated_prefix))
        .collect();

    // ISO dates sort chronologically as strings.
    names.sort();
    let excess = names.len().saturating_sub(keep);

    let mut removed = 0;
    for name in names.into_iter().take(excess) {
        std::fs::remove_file(dir.join(&name))?;
        removed += 1;
    }
    Ok(removed)
}
