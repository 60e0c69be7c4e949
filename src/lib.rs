//! # Rust Log Dispatch
//!
//! A structured logging core: leveled, field-annotated entries are fanned out
//! synchronously to pluggable handlers chosen per level.
//!
//! ## Features
//!
//! - **Level routing**: each handler receives exactly the levels it was registered for
//! - **Cheap entries**: fields are kept as an append-only chain and flattened only at dispatch
//! - **Lock-free reads**: the logging path reads an atomically published handler snapshot
//! - **Isolated handlers**: a failing or panicking handler never affects the others or the caller
//!
//! ## Example
//!
//! ```
//! use rust_log_dispatch::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::new();
//! logger.register_handler(
//!     Arc::new(|entry: &Entry| -> rust_log_dispatch::Result<()> {
//!         println!("[{}] {} {}", entry.level, entry.message, entry.fields);
//!         Ok(())
//!     }),
//!     &[Level::Info, Level::Error],
//! );
//!
//! let req = logger.str("request_id", "r-17");
//! req.info("accepted");
//! req.int("status", 500).error("upstream failed");
//! ```

pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        new_context, Context, DispatchMetrics, Entry, FieldValue, Fields, Flusher, Handler,
        Level, Logger, LoggerBuilder, LoggerError, Result, TraceGuard, ALL_LEVELS,
    };
}

pub use core::{
    format_duration, new_context, Context, DispatchMetrics, Entry, ExitAction, FieldChain,
    FieldValue, Fields, Flusher, Handler, HandlerRegistry, Level, LevelSnapshot, Logger,
    LoggerBuilder, LoggerError, Result, TraceGuard, ALL_LEVELS, EXIT_CODE,
};
pub use global::default_logger;
