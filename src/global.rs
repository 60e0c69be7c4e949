//! Process-wide default logger and free-function conveniences
//!
//! Every function here forwards to [`default_logger`], which is created on
//! first use with no handlers, no default fields and the standard exit
//! action. Applications that need isolation (tests in particular) should
//! construct their own [`Logger`] instead.
//!
//! ```
//! use rust_log_dispatch::global as log;
//!
//! log::with_field("user", "ana").info("signed in");
//! log::warn("nobody registered a handler, so this is dropped");
//! ```

use crate::core::{
    context::Context,
    entry::{Entry, TraceGuard},
    fields::{FieldValue, Fields},
    handler::Handler,
    level::Level,
    logger::Logger,
};
use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::new)
}

/// Route entries of each of `levels` to `handler` on the default logger
pub fn register_handler(handler: Arc<dyn Handler>, levels: &[Level]) {
    default_logger().register_handler(handler, levels);
}

/// Append a default-field layer to the default logger
pub fn with_default_fields(fields: Fields) {
    default_logger().with_default_fields(fields);
}

/// Flush every flushable handler of the default logger
pub fn flush() {
    default_logger().flush();
}

/// Fresh entry seeded with the default logger's default fields
pub fn entry() -> Entry {
    default_logger().entry()
}

#[doc(inline)]
pub use crate::core::context::new_context;

/// Entry stored in `ctx`, or a fresh entry from the default logger
pub fn from_context(ctx: &Context) -> Entry {
    default_logger().from_context(ctx)
}

macro_rules! global_severity {
    ($($name:ident, $name_fmt:ident;)*) => {
        $(
            #[doc = concat!("Log `msg` at `", stringify!($name), "` on the default logger")]
            pub fn $name(msg: impl Into<String>) {
                default_logger().$name(msg);
            }

            #[doc = concat!("Log a formatted message at `", stringify!($name), "` on the default logger")]
            pub fn $name_fmt(args: fmt::Arguments<'_>) {
                default_logger().$name_fmt(args);
            }
        )*
    };
}

macro_rules! global_typed_fields {
    ($($name:ident: $t:ty),* $(,)?) => {
        $(
            #[doc = concat!("Entry from the default logger with a `", stringify!($t), "` field")]
            #[must_use]
            pub fn $name(key: impl Into<String>, val: $t) -> Entry {
                default_logger().$name(key, val)
            }
        )*
    };
}

global_severity! {
    debug, debug_fmt;
    info, info_fmt;
    warn, warn_fmt;
    error, error_fmt;
    panic, panic_fmt;
    fatal, fatal_fmt;
}

global_typed_fields! {
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

/// Log `msg` at `level` on the default logger
pub fn log(level: Level, msg: impl Into<String>) {
    default_logger().log(level, msg);
}

/// Entry from the default logger with `fields` appended
#[must_use]
pub fn with_fields(fields: Fields) -> Entry {
    default_logger().with_fields(fields)
}

/// Entry from the default logger with `key` set to `value`
#[must_use]
pub fn with_field(key: impl Into<String>, value: impl Into<FieldValue>) -> Entry {
    default_logger().with_field(key, value)
}

/// Entry from the default logger with an `error` field
#[must_use]
pub fn with_error<E: Error + ?Sized>(err: &E) -> Entry {
    default_logger().with_error(err)
}

/// Like [`with_error`], but `None` yields a plain entry
#[must_use]
pub fn with_error_opt<E: Error + ?Sized>(err: Option<&E>) -> Entry {
    default_logger().with_error_opt(err)
}

/// Start timing on the default logger; see [`Entry::trace`]
#[must_use = "a trace is only logged once stop() is called"]
pub fn trace(msg: impl Into<String>) -> Entry {
    default_logger().trace(msg)
}

/// Start timing and stop when the guard drops; see [`Entry::trace_guard`]
#[must_use = "dropping the guard immediately stops the trace"]
pub fn trace_guard(msg: impl Into<String>) -> TraceGuard {
    default_logger().trace_guard(msg)
}
