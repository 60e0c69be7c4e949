//! Log entry builder and record
//!
//! An `Entry` is a cheap value: cloning it copies a weak handle to its logger
//! and a handle to a shared, immutable field chain. Every field-adding method
//! returns a new `Entry` and leaves the receiver untouched, so a partially
//! built entry can serve as a template for any number of log calls.

use super::{
    dispatcher,
    duration::format_duration,
    field_chain::FieldChain,
    fields::{FieldValue, Fields},
    level::Level,
    logger::{Logger, WeakLogger, EXIT_CODE},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{self, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    #[serde(skip)]
    logger: WeakLogger,
    #[serde(skip)]
    start: Option<Instant>,
    #[serde(skip)]
    chain: FieldChain,

    pub level: Level,
    pub message: String,
    /// Stamped by the dispatcher right before each handler call
    pub timestamp: DateTime<Utc>,
    /// Flattened view of the field chain, filled in at dispatch
    pub fields: Fields,
}

macro_rules! typed_fields {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name(&self, key: impl Into<String>, val: $t) -> Entry {
                self.with_field(key, val)
            }
        )*
    };
}

macro_rules! severity {
    ($($(#[$doc:meta])* $name:ident, $name_fmt:ident => $level:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, msg: impl Into<String>) {
                self.log($level, msg);
            }

            $(#[$doc])*
            pub fn $name_fmt(&self, args: fmt::Arguments<'_>) {
                self.log_fmt($level, args);
            }
        )*
    };
}

impl Entry {
    /// New entry seeded with the logger's current default fields
    pub(crate) fn new(logger: &Logger) -> Self {
        Self {
            chain: logger.default_fields(),
            logger: logger.downgrade(),
            start: None,
            level: Level::default(),
            message: String::new(),
            timestamp: DateTime::<Utc>::default(),
            fields: Fields::new(),
        }
    }

    /// Logger this entry was built from, unless it has been torn down
    pub fn logger(&self) -> Option<Logger> {
        self.logger.upgrade()
    }

    /// Field layers attached so far, default fields first
    pub fn chain(&self) -> &FieldChain {
        &self.chain
    }

    /// Return a new entry with `fields` appended as one layer
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Entry {
        let mut entry = self.clone();
        entry.chain = self.chain.append(fields);
        entry
    }

    /// Return a new entry with `key` set to `value`
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        self.with_fields(Fields::new().with(key, value))
    }

    /// Return a new entry with an `error` field holding `err` and its sources
    #[must_use]
    pub fn with_error<E: Error + ?Sized>(&self, err: &E) -> Entry {
        self.with_field("error", render_error(err))
    }

    /// Like [`Entry::with_error`], but `None` leaves the entry unchanged
    #[must_use]
    pub fn with_error_opt<E: Error + ?Sized>(&self, err: Option<&E>) -> Entry {
        match err {
            Some(err) => self.with_error(err),
            None => self.clone(),
        }
    }

    typed_fields! {
        str: &str,
        bool: bool,
        int: isize,
        i8: i8,
        i16: i16,
        i32: i32,
        i64: i64,
        uint: usize,
        u8: u8,
        u16: u16,
        u32: u32,
        u64: u64,
        f32: f32,
        f64: f64,
    }

    /// Finalize at `level` and dispatch.
    ///
    /// `Panic` and `Fatal` run the logger's exit action once every handler
    /// has seen the entry.
    pub fn log(&self, level: Level, msg: impl Into<String>) {
        self.finalize(level, msg.into());
    }

    /// Finalize at `level` with a formatted message
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        self.finalize(level, args.to_string());
    }

    severity! {
        debug, debug_fmt => Level::Debug;
        info, info_fmt => Level::Info;
        warn, warn_fmt => Level::Warn;
        error, error_fmt => Level::Error;
        /// Dispatches, then runs the exit action
        panic, panic_fmt => Level::Panic;
        /// Dispatches, then runs the exit action
        fatal, fatal_fmt => Level::Fatal;
    }

    fn finalize(&self, level: Level, message: String) {
        let logger = self.logger.upgrade();
        if let Some(logger) = &logger {
            let mut entry = self.clone();
            entry.level = level;
            entry.message = message;
            dispatcher::dispatch(logger, entry);
        }

        if level.is_terminal() {
            match logger {
                Some(logger) => logger.terminate(level),
                // The injected exit action went away with the logger
                None => std::process::exit(EXIT_CODE),
            }
        }
    }

    /// Start timing. Nothing is logged until [`Entry::stop`].
    #[must_use = "a trace is only logged once stop() is called"]
    pub fn trace(&self, msg: impl Into<String>) -> Entry {
        let mut entry = self.clone();
        entry.message = msg.into();
        entry.start = Some(Instant::now());
        entry
    }

    /// Start timing and stop automatically when the guard is dropped
    #[must_use = "dropping the guard immediately stops the trace"]
    pub fn trace_guard(&self, msg: impl Into<String>) -> TraceGuard {
        TraceGuard {
            entry: Some(self.trace(msg)),
        }
    }

    /// Time since [`Entry::trace`], if this entry is being traced
    pub fn elapsed(&self) -> Option<Duration> {
        self.start.map(|start| start.elapsed())
    }

    /// Log the traced message at `Info` with a `duration` field.
    ///
    /// An entry that was never traced reports a zero duration.
    pub fn stop(&self) {
        let elapsed = self.elapsed().unwrap_or_default();
        self.with_field("duration", format_duration(elapsed))
            .info(self.message.clone());
    }
}

/// Stops its trace when dropped
///
/// # Example
///
/// ```
/// use rust_log_dispatch::Logger;
///
/// let logger = Logger::new();
/// {
///     let _trace = logger.entry().str("job", "reindex").trace_guard("reindex");
///     // work...
/// } // "reindex" logged at Info with a duration field
/// ```
#[derive(Debug)]
pub struct TraceGuard {
    entry: Option<Entry>,
}

impl TraceGuard {
    /// The traced entry, until the guard stops it
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    /// Stop now instead of at the end of the scope
    pub fn stop(mut self) {
        if let Some(entry) = self.entry.take() {
            entry.stop();
        }
    }
}

impl Drop for TraceGuard {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            entry.stop();
        }
    }
}

/// `err` followed by each of its sources, separated by `": "`
fn render_error<E: Error + ?Sized>(err: &E) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, ": {}", cause);
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::FieldValue;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryError {
        #[source]
        source: std::io::Error,
    }

    #[test]
    fn test_with_field_returns_new_entry() {
        let logger = Logger::new();
        let base = logger.entry().str("service", "api");
        let extended = base.int("attempt", 3);

        assert_eq!(base.chain().len(), 1);
        assert_eq!(extended.chain().len(), 2);
        assert!(!base.chain().merged().contains_key("attempt"));
    }

    #[test]
    fn test_typed_fields() {
        let logger = Logger::new();
        let merged = logger
            .entry()
            .bool("ok", true)
            .i8("small", -1)
            .u64("big", u64::MAX)
            .f32("ratio", 0.5)
            .uint("count", 9)
            .chain()
            .merged();

        assert_eq!(merged.get("ok"), Some(&FieldValue::Bool(true)));
        assert_eq!(merged.get("small"), Some(&FieldValue::Int(-1)));
        assert_eq!(merged.get("big"), Some(&FieldValue::Uint(u64::MAX)));
        assert_eq!(merged.get("ratio"), Some(&FieldValue::Float(0.5)));
        assert_eq!(merged.get("count"), Some(&FieldValue::Uint(9)));
    }

    #[test]
    fn test_with_error_renders_sources() {
        let logger = Logger::new();
        let err = QueryError {
            source: std::io::Error::new(std::io::ErrorKind::TimedOut, "socket timed out"),
        };
        let merged = logger.entry().with_error(&err).chain().merged();

        assert_eq!(
            merged.get("error").and_then(FieldValue::as_str),
            Some("query failed: socket timed out")
        );
    }

    #[test]
    fn test_with_error_none_is_unchanged() {
        let logger = Logger::new();
        let entry = logger.entry().str("k", "v");
        let same = entry.with_error_opt(None::<&std::io::Error>);
        assert_eq!(same.chain().len(), entry.chain().len());
    }

    #[test]
    fn test_trace_records_start_without_dispatch() {
        let logger = Logger::new();
        let traced = logger.entry().trace("job");
        assert_eq!(traced.message, "job");
        assert!(traced.elapsed().is_some());
        assert!(logger.entry().elapsed().is_none());
        assert_eq!(logger.metrics().entries_dispatched(), 0);
    }

    #[test]
    fn test_entry_does_not_keep_logger_alive() {
        let logger = Logger::new();
        let entry = logger.entry().str("k", "v");
        assert!(entry.logger().is_some());

        drop(logger);
        assert!(entry.logger().is_none());
        // Dispatching against a torn-down logger is a no-op
        entry.info("after teardown");
    }

    #[test]
    fn test_serialize_public_attributes() {
        let logger = Logger::new();
        let entry = logger.entry().str("k", "v");
        let value = serde_json::to_value(&entry).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["fields", "level", "message", "timestamp"]);
    }
}
