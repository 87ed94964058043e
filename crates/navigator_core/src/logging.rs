//! Core logging bootstrap and safety policy.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit stable, metadata-only diagnostic events from core.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and directory.
//! - Re-initialization with a different level or directory is rejected.
//! - Logging initialization must not panic.
//! - Value labels typed by the user never reach the log files.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "values_navigator";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: LogLevel,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Supported log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a case-insensitive level name; `warning` is accepted for `warn`.
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LoggingError::UnsupportedLevel(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Logging bootstrap failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
    CreateDir { dir: PathBuf, message: String },
    Backend(String),
    /// Already running with another level or directory.
    Conflict { active: String, requested: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{dir}`")
            }
            Self::CreateDir { dir, message } => write!(
                f,
                "failed to create log directory `{}`: {message}",
                dir.display()
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with `{active}`; refusing to switch to `{requested}`"
            ),
        }
    }
}

impl Error for LoggingError {}

/// Initializes core logging with level and directory.
///
/// # Errors
/// - `UnsupportedLevel` for unknown level names.
/// - `EmptyLogDir` / `RelativeLogDir` for unusable directories.
/// - `Conflict` when logging already runs with a different configuration.
/// - `CreateDir` / `Backend` when the file backend cannot start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), LoggingError> {
    let level = LogLevel::parse(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, &log_dir))?;
    ensure_same_config(state, level, &log_dir)
}

fn start_logger(level: LogLevel, log_dir: &Path) -> Result<LoggingState, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|err| LoggingError::CreateDir {
        dir: log_dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let logger = Logger::try_with_str(level.as_str())
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook_once();

    info!(
        "event=app_start module=core status=ok platform={} build_mode={} version={}",
        std::env::consts::OS,
        build_mode(),
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=core_init module=core status=ok level={} log_dir={}",
        level.as_str(),
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

fn ensure_same_config(
    state: &LoggingState,
    level: LogLevel,
    log_dir: &Path,
) -> Result<(), LoggingError> {
    if state.log_dir != log_dir {
        return Err(LoggingError::Conflict {
            active: state.log_dir.display().to_string(),
            requested: log_dir.display().to_string(),
        });
    }
    if state.level != level {
        return Err(LoggingError::Conflict {
            active: state.level.as_str().to_string(),
            requested: level.as_str().to_string(),
        });
    }
    Ok(())
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(LogLevel, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> LogLevel {
    if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, LoggingError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(LoggingError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(LoggingError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payloads may echo user labels: flatten and cap before logging.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
