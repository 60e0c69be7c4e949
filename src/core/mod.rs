//! Core logging types and traits

pub mod context;
pub mod dispatcher;
pub mod duration;
pub mod entry;
pub mod error;
pub mod field_chain;
pub mod fields;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod registry;

pub use context::{new_context, Context};
pub use duration::format_duration;
pub use entry::{Entry, TraceGuard};
pub use error::{LoggerError, Result};
pub use field_chain::FieldChain;
pub use fields::{FieldValue, Fields};
pub use handler::{Flusher, Handler};
pub use level::{Level, ALL_LEVELS};
pub use logger::{ExitAction, Logger, LoggerBuilder, EXIT_CODE};
pub use metrics::DispatchMetrics;
pub use registry::{HandlerRegistry, LevelSnapshot};
