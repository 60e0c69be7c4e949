//! Formatting macros for the severity methods.
//!
//! Each macro takes anything with the matching `*_fmt` method (an [`Entry`],
//! a [`Logger`]) followed by `format!`-style arguments. Formatting happens
//! before dispatch.
//!
//! [`Entry`]: crate::Entry
//! [`Logger`]: crate::Logger
//!
//! # Examples
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//! use rust_log_dispatch::{fields, infof, warnf};
//!
//! let logger = Logger::new();
//!
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//!
//! let req = logger.with_fields(fields! { "method" => "GET", "status" => 503 });
//! warnf!(req, "upstream unavailable after {} retries", 3);
//! ```

/// Log at a runtime-chosen level with automatic formatting.
///
/// ```
/// # use rust_log_dispatch::prelude::*;
/// # let logger = Logger::new();
/// use rust_log_dispatch::logf;
/// logf!(logger, Level::Info, "Simple message");
/// logf!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($target:expr, $level:expr, $($arg:tt)+) => {
        $target.log_fmt($level, ::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($target:expr, $($arg:tt)+) => {
        $target.debug_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($target:expr, $($arg:tt)+) => {
        $target.info_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($target:expr, $($arg:tt)+) => {
        $target.warn_fmt(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($target:expr, $($arg:tt)+) => {
        $target.error_fmt(::std::format_args!($($arg)+))
    };
}

/// Log at `Panic` level, then run the logger's exit action.
#[macro_export]
macro_rules! panicf {
    ($target:expr, $($arg:tt)+) => {
        $target.panic_fmt(::std::format_args!($($arg)+))
    };
}

/// Log at `Fatal` level, then run the logger's exit action.
#[macro_export]
macro_rules! fatalf {
    ($target:expr, $($arg:tt)+) => {
        $target.fatal_fmt(::std::format_args!($($arg)+))
    };
}

/// Build a [`Fields`](crate::Fields) layer from `key => value` pairs.
///
/// ```
/// use rust_log_dispatch::fields;
///
/// let f = fields! { "user_id" => 42, "admin" => false };
/// assert_eq!(f.names(), vec!["admin", "user_id"]);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Fields::new()$(.with($key, $value))+
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{entry::Entry, error::Result, level::Level, logger::Logger};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capturing() -> (Logger, Arc<Mutex<Vec<(Level, String)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let logger = Logger::builder()
            .handler(
                Arc::new(move |entry: &Entry| -> Result<()> {
                    seen_clone.lock().push((entry.level, entry.message.clone()));
                    Ok(())
                }),
                &crate::core::level::ALL_LEVELS,
            )
            .exit_fn(Arc::new(|_| {}))
            .build();
        (logger, seen)
    }

    #[test]
    fn test_logf_macro() {
        let (logger, seen) = capturing();
        logf!(logger, Level::Warn, "Formatted: {}", 42);
        assert_eq!(seen.lock()[0], (Level::Warn, "Formatted: 42".to_string()));
    }

    #[test]
    fn test_severity_macros() {
        let (logger, seen) = capturing();
        debugf!(logger, "d{}", 1);
        infof!(logger, "i{}", 2);
        warnf!(logger.entry(), "w{}", 3);
        errorf!(logger, "e{}", 4);
        panicf!(logger, "p{}", 5);
        fatalf!(logger, "f{}", 6);

        let levels: Vec<Level> = seen.lock().iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, crate::core::level::ALL_LEVELS.to_vec());
        assert_eq!(seen.lock()[2].1, "w3");
    }

    #[test]
    fn test_fields_macro() {
        let empty = fields! {};
        assert!(empty.is_empty());

        let f = fields! { "a" => 1, "b" => "two", };
        assert_eq!(f.len(), 2);
    }
}
