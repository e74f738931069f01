//! Logging setup for embedders
//!
//! The library itself only emits `tracing` events; hosts that want to see
//! them call [`init_logging`] once with a [`LogConfig`]. Writers are
//! non-blocking, so the returned guard must be kept alive until shutdown to
//! flush buffered output.

use std::io;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily-rotated file under `directory`
    File { directory: String, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Extra filter directives, e.g. `"mapikit=trace"`
    pub filter: Option<String>,
    pub span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            filter: None,
            span_events: false,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }
}

/// Install the global subscriber described by `config`.
///
/// Keep the returned [`WorkerGuard`] alive for the lifetime of the host;
/// dropping it flushes and stops the background writer.
pub fn init_logging(config: LogConfig) -> WorkerGuard {
    let (writer, guard) = match &config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(Box::new(io::stdout()) as Box<dyn io::Write + Send>),
        LogOutput::Stderr => tracing_appender::non_blocking(Box::new(io::stderr()) as Box<dyn io::Write + Send>),
        LogOutput::File { directory, prefix } => {
            let appender = rolling::daily(directory, prefix);
            tracing_appender::non_blocking(Box::new(appender) as Box<dyn io::Write + Send>)
        }
    };

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = fmt()
        .with_env_filter(build_filter(&config))
        .with_writer(writer)
        .with_span_events(span_events);

    match config.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }

    guard
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let base = EnvFilter::from_default_env().add_directive(config.level.into());

    match &config.filter {
        Some(directives) => directives.split(',').fold(base, |filter, directive| {
            match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(_) => {
                    eprintln!("mapikit: ignoring invalid log directive '{}'", directive);
                    filter
                }
            }
        }),
        None => base,
    }
}
