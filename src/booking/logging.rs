//! Logging and tracing configuration
//!
//! Console output always goes to stderr so stdout stays free for outcomes.
//! When a log directory is set, JSON lines are also written to daily-rolling
//! files there.

use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Error returned when the global subscriber cannot be installed
pub type LoggingError = Box<dyn std::error::Error + Send + Sync>;

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "hotel-room-allocator";

/// Console line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Where and how log lines are written
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Most verbose level emitted by this crate
    pub level: Level,
    /// Console line format
    pub console: ConsoleFormat,
    /// Directory for daily-rolling JSON log files
    pub log_directory: Option<PathBuf>,
    /// Emit a line when each instrumented booking operation closes
    pub span_events: bool,
    /// Colour console output
    pub ansi: bool,
    /// Filter directive replacing the level-based default, e.g. `hotel_room_allocator=trace`
    pub directive: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::at_level(Level::WARN)
    }
}

/// Keeps background log writers alive; drop it only at shutdown
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

impl LoggingConfig {
    /// Console logging at `level`
    pub fn at_level(level: Level) -> Self {
        Self {
            level,
            console: ConsoleFormat::Text,
            log_directory: None,
            span_events: false,
            ansi: true,
            directive: None,
        }
    }

    /// Level chosen by the command line flags
    ///
    /// `--debug` wins over `--verbose`; both turn on span close events so the
    /// time spent in each booking operation is visible.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        match (debug, verbose) {
            (true, _) => Self { span_events: true, ..Self::at_level(Level::DEBUG) },
            (false, true) => Self { span_events: true, ..Self::at_level(Level::INFO) },
            (false, false) => Self::at_level(Level::WARN),
        }
    }

    /// Also write JSON lines to daily files under `directory`
    pub fn with_log_directory(self, directory: impl Into<PathBuf>) -> Self {
        Self { log_directory: Some(directory.into()), ..self }
    }

    /// Switch the console to JSON lines
    pub fn json_console(self) -> Self {
        Self { console: ConsoleFormat::Json, ..self }
    }

    /// Plain console output without colours
    pub fn plain(self) -> Self {
        Self { ansi: false, ..self }
    }

    /// Replace the level-based filter with an explicit directive
    pub fn with_directive(self, directive: impl Into<String>) -> Self {
        Self { directive: Some(directive.into()), ..self }
    }

    /// Filter applied to every layer
    ///
    /// An explicit directive must parse; otherwise `RUST_LOG` is honoured and
    /// falls back to this crate at the configured level.
    fn filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Some(directive) = &self.directive {
            return Ok(EnvFilter::try_new(directive)?);
        }
        Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                self.level
            ))
        }))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global tracing subscriber
    pub fn init(self) -> Result<LoggingGuard, LoggingError> {
        let filter = self.filter()?;
        let mut guards = Vec::new();

        let console_layer = match self.console {
            ConsoleFormat::Json => fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(self.span_events())
                .boxed(),
            ConsoleFormat::Text => fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(self.ansi)
                .with_span_events(self.span_events())
                .boxed(),
        };

        let file_layer = self.log_directory.as_ref().map(|directory| {
            let (writer, guard) = non_blocking(rolling::daily(directory, LOG_FILE_PREFIX));
            guards.push(guard);
            fmt::layer().json().with_writer(writer).with_span_events(self.span_events()).boxed()
        });

        Registry::default().with(filter).with(console_layer).with(file_layer).try_init()?;

        info!(
            level = %self.level,
            log_directory = ?self.log_directory,
            "Logging initialized"
        );
        Ok(LoggingGuard { _guards: guards })
    }
}
