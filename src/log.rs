//! Logging configuration for OpenCode SDK.
//!
//! Logs to both stdout and a file. Call [init_logger] before using the SDK and keep
//! the returned guard alive for as long as logs should reach the file.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "opencode-sdk.log";

/// Initializes logging to stdout and file.
///
/// Log file: `{dir}/opencode-sdk.log` (default: `$XDG_DATA_HOME/opencode-sdk`,
/// then `~/.local/share/opencode-sdk`, then the current directory).
///
/// Default level is `opencode_sdk=debug` when `RUST_LOG` is not set; set `RUST_LOG` to override
/// (e.g. `RUST_LOG=opencode_sdk=info` to reduce noise).
///
/// Returns `None` if the directory cannot be created or a global subscriber is
/// already installed.
pub fn init_logger(log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let dir = log_dir.unwrap_or_else(|| {
        default_log_dir(
            std::env::var("XDG_DATA_HOME").ok(),
            std::env::var("HOME").ok(),
        )
    });

    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("opencode-sdk: failed to create log dir {:?}: {}", dir, e);
        return None;
    }
    eprintln!("opencode-sdk: log file: {}", dir.join(LOG_FILE_NAME).display());

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("opencode_sdk=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;

    Some(guard)
}

/// Resolves the default log directory from `XDG_DATA_HOME` and `HOME`.
pub(crate) fn default_log_dir(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home.map(|h| PathBuf::from(h).join(".local/share")))
        .map(|p| p.join("opencode-sdk"))
        .unwrap_or_else(|| PathBuf::from("."))
}
