//! Logger: handler registry, default fields and exit action

use super::{
    context::{self, Context},
    dispatcher,
    entry::{Entry, TraceGuard},
    field_chain::FieldChain,
    fields::{FieldValue, Fields},
    handler::Handler,
    level::Level,
    metrics::DispatchMetrics,
    registry::HandlerRegistry,
};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, Weak};

/// Action run after a `Panic` or `Fatal` entry has been dispatched
pub type ExitAction = Arc<dyn Fn(Level) + Send + Sync>;

/// Exit code used by the default exit action
pub const EXIT_CODE: i32 = 1;

fn default_exit() -> ExitAction {
    Arc::new(|_level| std::process::exit(EXIT_CODE))
}

struct LoggerInner {
    registry: HandlerRegistry,
    default_fields: ArcSwap<FieldChain>,
    defaults_lock: Mutex<()>,
    metrics: DispatchMetrics,
    exit: ExitAction,
}

impl Drop for LoggerInner {
    fn drop(&mut self) {
        dispatcher::flush_all(self.registry.snapshot().all(), &self.metrics);
    }
}

/// Entry point for structured logging.
///
/// Cloning a `Logger` yields another handle to the same registry. Independent
/// loggers share nothing, which keeps tests isolated from each other and from
/// the process-wide default in [`crate::global`].
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

/// Non-owning handle held by entries.
///
/// Handlers may retain entries, and handlers are owned by the logger, so an
/// entry must not keep its logger alive. Once every [`Logger`] handle is
/// gone, entries built from it no longer dispatch.
#[derive(Clone)]
pub(crate) struct WeakLogger {
    inner: Weak<LoggerInner>,
}

impl WeakLogger {
    pub(crate) fn upgrade(&self) -> Option<Logger> {
        self.inner.upgrade().map(|inner| Logger { inner })
    }
}

impl fmt::Debug for WeakLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakLogger")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

macro_rules! delegate_typed_fields {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name(&self, key: impl Into<String>, val: $t) -> Entry {
                self.entry().$name(key, val)
            }
        )*
    };
}

macro_rules! delegate_severity {
    ($($name:ident, $name_fmt:ident;)*) => {
        $(
            #[inline]
            pub fn $name(&self, msg: impl Into<String>) {
                self.entry().$name(msg);
            }

            #[inline]
            pub fn $name_fmt(&self, args: fmt::Arguments<'_>) {
                self.entry().$name_fmt(args);
            }
        )*
    };
}

impl Logger {
    /// Create a logger with no handlers and the default exit action
    #[must_use]
    pub fn new() -> Self {
        Self::with_exit(default_exit())
    }

    fn with_exit(exit: ExitAction) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                registry: HandlerRegistry::new(),
                default_fields: ArcSwap::from_pointee(FieldChain::new()),
                defaults_lock: Mutex::new(()),
                metrics: DispatchMetrics::new(),
                exit,
            }),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_dispatch::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .default_fields(Fields::new().with("service", "billing"))
    ///     .build();
    /// assert_eq!(logger.default_fields().len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Route entries of each of `levels` to `handler`.
    pub fn register_handler(&self, handler: Arc<dyn Handler>, levels: &[Level]) {
        self.inner.registry.register(handler, levels);
    }

    /// Append a layer to the fields every new entry starts with.
    ///
    /// Entries created earlier are not affected.
    pub fn with_default_fields(&self, fields: Fields) {
        let _guard = self.inner.defaults_lock.lock();
        let next = self.inner.default_fields.load().append(fields);
        self.inner.default_fields.store(Arc::new(next));
    }

    /// Current default-field layers
    pub fn default_fields(&self) -> FieldChain {
        FieldChain::clone(&self.inner.default_fields.load())
    }

    /// Fresh entry seeded with the default fields
    #[must_use]
    pub fn entry(&self) -> Entry {
        Entry::new(self)
    }

    /// Flush every handler that can be flushed, best effort.
    pub fn flush(&self) {
        dispatcher::flush_all(self.inner.registry.snapshot().all(), &self.inner.metrics);
    }

    pub(crate) fn downgrade(&self) -> WeakLogger {
        WeakLogger {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Handler registry backing this logger
    pub fn registry(&self) -> &HandlerRegistry {
        &self.inner.registry
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_dispatch::Logger;
    ///
    /// let logger = Logger::new();
    /// logger.info("nobody is listening");
    ///
    /// let metrics = logger.metrics();
    /// assert_eq!(metrics.entries_dispatched(), 0);
    /// assert_eq!(metrics.handler_invocations(), 0);
    /// ```
    pub fn metrics(&self) -> &DispatchMetrics {
        &self.inner.metrics
    }

    /// Run the exit action for a terminal level.
    pub fn terminate(&self, level: Level) {
        (self.inner.exit)(level);
    }

    /// Entry stored in `ctx`, or a fresh entry from this logger
    #[must_use]
    pub fn from_context(&self, ctx: &Context) -> Entry {
        context::entry_from(ctx).unwrap_or_else(|| self.entry())
    }

    /// Log `msg` at `level` with only the default fields
    pub fn log(&self, level: Level, msg: impl Into<String>) {
        self.entry().log(level, msg);
    }

    /// Log a formatted message at `level`
    pub fn log_fmt(&self, level: Level, args: fmt::Arguments<'_>) {
        self.entry().log_fmt(level, args);
    }

    delegate_severity! {
        debug, debug_fmt;
        info, info_fmt;
        warn, warn_fmt;
        error, error_fmt;
        panic, panic_fmt;
        fatal, fatal_fmt;
    }

    /// Fresh entry with `fields` appended
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Entry {
        self.entry().with_fields(fields)
    }

    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
        self.entry().with_field(key, value)
    }

    /// Fresh entry with an `error` field
    #[must_use]
    pub fn with_error<E: Error + ?Sized>(&self, err: &E) -> Entry {
        self.entry().with_error(err)
    }

    #[must_use]
    pub fn with_error_opt<E: Error + ?Sized>(&self, err: Option<&E>) -> Entry {
        self.entry().with_error_opt(err)
    }

    delegate_typed_fields! {
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

    #[must_use = "a trace is only logged once stop() is called"]
    pub fn trace(&self, msg: impl Into<String>) -> Entry {
        self.entry().trace(msg)
    }

    #[must_use = "dropping the guard immediately stops the trace"]
    pub fn trace_guard(&self, msg: impl Into<String>) -> TraceGuard {
        self.entry().trace_guard(msg)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("registry", &self.inner.registry)
            .field("default_layers", &self.inner.default_fields.load().len())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_log_dispatch::prelude::*;
/// use std::sync::Arc;
///
/// let console = Arc::new(|entry: &Entry| -> rust_log_dispatch::Result<()> {
///     println!("{} {} {}", entry.level, entry.message, entry.fields);
///     Ok(())
/// });
///
/// let logger = Logger::builder()
///     .handler(console, &ALL_LEVELS)
///     .default_fields(Fields::new().with("service", "api"))
///     .exit_fn(Arc::new(|level| eprintln!("would exit after {}", level)))
///     .build();
///
/// logger.info("started");
/// ```
pub struct LoggerBuilder {
    handlers: Vec<(Arc<dyn Handler>, Vec<Level>)>,
    default_fields: Vec<Fields>,
    exit: Option<ExitAction>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            default_fields: Vec::new(),
            exit: None,
        }
    }

    /// Register a handler for the given levels
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, handler: Arc<dyn Handler>, levels: &[Level]) -> Self {
        self.handlers.push((handler, levels.to_vec()));
        self
    }

    /// Add a default-field layer
    #[must_use = "builder methods return a new value"]
    pub fn default_fields(mut self, fields: Fields) -> Self {
        self.default_fields.push(fields);
        self
    }

    /// Replace the action run after `Panic` and `Fatal` entries.
    ///
    /// Defaults to `std::process::exit(1)`.
    #[must_use = "builder methods return a new value"]
    pub fn exit_fn(mut self, exit: ExitAction) -> Self {
        self.exit = Some(exit);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::with_exit(self.exit.unwrap_or_else(default_exit));
        for fields in self.default_fields {
            logger.with_default_fields(fields);
        }
        for (handler, levels) in self.handlers {
            logger.register_handler(handler, &levels);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
