//! Rolling Logger
//!
//! A `tracing` layer that formats every event as one line, mirrors it to
//! the console (browser devtools on wasm, stderr natively) and keeps the
//! most recent lines in a circular buffer for display inside the app.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Shared handle to the buffered lines
#[derive(Clone, Debug)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn push(&self, line: String) {
        // a poisoned lock only means a panic mid-push; the lines are still usable
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Oldest first
    pub fn recent(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Collects `message` plus `key=value` pairs
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

pub struct RollingLayer {
    app_name: String,
    buffer: LogBuffer,
    max_level: LevelFilter,
    mirror: bool,
}

impl RollingLayer {
    pub fn new(app_name: &str, buffer: LogBuffer) -> Self {
        Self {
            app_name: app_name.to_string(),
            buffer,
            max_level: LevelFilter::DEBUG,
            mirror: true,
        }
    }

    pub fn with_max_level(mut self, level: LevelFilter) -> Self {
        self.max_level = level;
        self
    }

    /// Keep lines in the buffer only, without echoing to the console
    pub fn without_console(mut self) -> Self {
        self.mirror = false;
        self
    }

    fn format(&self, event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        format!(
            "[{}] {} {:<5} {}: {}{}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            self.app_name,
            meta.level(),
            meta.target(),
            visitor.message,
            visitor.fields
        )
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.max_level >= *metadata.level()
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = self.format(event);
        if self.mirror {
            console(*event.metadata().level(), &line);
        }
        self.buffer.push(line);
    }
}

#[cfg(target_arch = "wasm32")]
fn console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&value),
        Level::WARN => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global subscriber. Returns the buffer the app can read
/// recent lines from.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<LogBuffer, LoggerError> {
    let buffer = LogBuffer::new(capacity);
    let max_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(RollingLayer::new(app_name, buffer.clone()).with_max_level(max_level))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;
    Ok(buffer)
}

pub fn info(message: &str) {
    tracing::info!("{}", message);
}

pub fn error(message: &str) {
    tracing::error!("{}", message);
}
