//! Logging bootstrap for Springfield
//!
//! Library crates in this workspace only emit `tracing` events. Binaries and
//! test harnesses install a subscriber once at startup through [`LogConfig`].
//!
//! # Examples
//!
//! ```no_run
//! use springfield_log::*;
//!
//! // JSON to STDOUT at INFO, overridable through the environment
//! let _guard = LogConfig::from_env().init().ok();
//!
//! info!(locale = "en-US", "locale pipeline ready");
//! ```
//!
//! # Environment Variables
//!
//! - `SPRINGFIELD_DEBUG=1` - Force debug level
//! - `SPRINGFIELD_LOG_LEVEL=trace|debug|info|warn|error` - Set log level
//! - `SPRINGFIELD_LOG_FORMAT=json|plain|pretty|compact` - Set output format
//! - `RUST_LOG` - Standard `EnvFilter` directives, used when no explicit
//!   filter is configured

use std::io;
use thiserror::Error;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use tracing::{debug, error, info, trace, warn};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file could not be opened
    #[error("Failed to open log file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A global subscriber is already installed
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Result type for logging setup
pub type Result<T> = std::result::Result<T, LogError>;

/// Log level for filtering messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a level name, accepting `warning` as an alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Convert to tracing Level
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    /// Directive string for `EnvFilter`
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured, machine-readable (default)
    Json,
    Plain,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "plain" | "text" => Some(LogFormat::Plain),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Output destination for logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Append to a single file
    File(String),
}

/// Logging configuration
///
/// ```
/// use springfield_log::*;
///
/// let config = LogConfig::new()
///     .level(LogLevel::Debug)
///     .format(LogFormat::Compact)
///     .with_env_filter("springfield_l10n=trace");
/// assert_eq!(config.level, LogLevel::Debug);
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Include target (module path)
    pub targets: bool,
    pub thread_ids: bool,
    /// Enable ANSI colors for the human-readable formats
    pub colors: bool,
    /// Custom `EnvFilter` directives (overrides `level` if set)
    pub env_filter: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the `SPRINGFIELD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unknown level or format names are ignored and the defaults kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("SPRINGFIELD_LOG_LEVEL").and_then(|v| LogLevel::parse(&v)) {
            config.level = level;
        }
        if let Some(format) = lookup("SPRINGFIELD_LOG_FORMAT").and_then(|v| LogFormat::parse(&v)) {
            config.format = format;
        }
        if matches!(lookup("SPRINGFIELD_DEBUG").as_deref(), Some("1" | "true")) {
            config.level = LogLevel::Debug;
        }

        config
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.thread_ids = enable;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Set custom filter directives such as `"springfield_l10n=debug,tower=info"`
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directives) => {
                EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
        }
    }

    /// Install the global subscriber.
    ///
    /// The returned guard must be kept alive for the lifetime of the process;
    /// dropping it flushes buffered events.
    pub fn init(self) -> Result<WorkerGuard> {
        let filter = self.build_filter();

        let (writer, guard) = match &self.output {
            LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
            LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
            LogOutput::File(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LogError::File {
                        path: path.clone(),
                        source,
                    })?;
                tracing_appender::non_blocking(file)
            }
        };

        let registry = tracing_subscriber::registry().with(filter);
        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids),
                )
                .try_init(),
            LogFormat::Plain => registry
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_target(self.targets)
                        .with_thread_ids(self.thread_ids)
                        .with_ansi(self.colors),
                )
                .try_init(),
        };

        installed.map_err(|e| LogError::Init(e.to_string()))?;
        Ok(guard)
    }
}

impl Default for LogConfig {
    /// JSON to STDOUT at INFO level
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            targets: true,
            thread_ids: false,
            colors: false,
            env_filter: None,
        }
    }
}
