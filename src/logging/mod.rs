// Logging module - In-memory log capture for TUI display
//
// This module provides a custom tracing layer that captures log events
// in memory so the card's logs panel can show them. This prevents logs
// from breaking through the TUI's alternate screen buffer and garbling the display.
//
// `init` wires the whole subscriber: capture layer (TUI) or stderr (headless),
// plus an optional rotating JSON file.

use crate::config::{LogRotation, LoggingConfig};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::{Level, Metadata, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 500;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Trace,
        }
    }
}

impl LogLevel {
    /// Get the display string for this log level
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    /// Add a log entry to the buffer
    /// If the buffer is full, removes the oldest entry
    pub fn add(&self, entry: LogEntry) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<LogEntry> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom tracing layer that captures logs to a buffer
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        let mut visitor = MessageVisitor(&mut message);
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level: LogLevel::from(event.metadata().level()),
            message,
        });
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Enable all log levels - filtering happens at subscriber level
        true
    }
}

/// Visitor to extract the message from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Where console-bound log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Captured into the logs panel buffer
    Tui,
    /// Written to stderr (headless commands)
    Stderr,
}

/// Install the global subscriber
///
/// Precedence for the filter: RUST_LOG env var > config file > "info".
/// The returned guard must live as long as `main` so file logs flush.
pub fn init(config: &LoggingConfig, sink: LogSink, buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("bizcard={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let console = match sink {
        LogSink::Tui => TuiLogLayer::new(buffer.clone()).boxed(),
        LogSink::Stderr => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file_layer, guard) = if config.file_enabled {
        match std::fs::create_dir_all(&config.file_dir) {
            Ok(()) => {
                let appender = match config.file_rotation {
                    LogRotation::Hourly => {
                        tracing_appender::rolling::hourly(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Daily => {
                        tracing_appender::rolling::daily(&config.file_dir, &config.file_prefix)
                    }
                    LogRotation::Never => {
                        tracing_appender::rolling::never(&config.file_dir, &config.file_prefix)
                    }
                };
                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed();
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    guard
}
