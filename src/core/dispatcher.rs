//! Synchronous fan-out of finalized entries to handlers
//!
//! Each handler call is isolated: an error or a panic from one handler is
//! reported to stderr and counted, and the remaining handlers still run.
//! Nothing is ever propagated back to the code that logged.

use super::{
    entry::Entry,
    error::{LoggerError, Result},
    handler::Handler,
    logger::Logger,
    metrics::DispatchMetrics,
};
use chrono::Utc;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Deliver `entry` to every handler registered for its level.
///
/// The timestamp and flattened fields are recomputed immediately before
/// each handler call, so every handler sees the instant its own call began.
pub(crate) fn dispatch(logger: &Logger, mut entry: Entry) {
    let snapshot = logger.registry().snapshot();
    let handlers = snapshot.handlers(entry.level);
    let metrics = logger.metrics();

    if handlers.is_empty() {
        return;
    }
    metrics.record_dispatched();

    for (idx, handler) in handlers.iter().enumerate() {
        entry.timestamp = Utc::now();
        entry.fields = entry.chain().merged();
        metrics.record_invocation();

        if let Err(e) = invoke(handler.as_ref(), &entry) {
            metrics.record_handler_failure();
            report(idx, handler.as_ref(), &e, "failed");
        }
    }
}

/// Call the flush capability of every handler that has one, in registration
/// order. Failures are reported and do not stop the iteration.
pub(crate) fn flush_all(handlers: &[Arc<dyn Handler>], metrics: &DispatchMetrics) {
    for (idx, handler) in handlers.iter().enumerate() {
        let Some(flusher) = handler.as_flusher() else {
            continue;
        };

        let result = catch_unwind(AssertUnwindSafe(|| flusher.flush()))
            .unwrap_or_else(|panic| Err(panicked(handler.as_ref(), panic)));

        if let Err(e) = result {
            metrics.record_flush_failure();
            report(idx, handler.as_ref(), &e, "flush failed");
        }
    }
}

fn invoke(handler: &dyn Handler, entry: &Entry) -> Result<()> {
    catch_unwind(AssertUnwindSafe(|| handler.log(entry)))
        .unwrap_or_else(|panic| Err(panicked(handler, panic)))
}

fn panicked(handler: &dyn Handler, panic: Box<dyn Any + Send>) -> LoggerError {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    LoggerError::handler_panicked(handler.name(), message)
}

fn report(idx: usize, handler: &dyn Handler, err: &LoggerError, what: &str) {
    match err {
        LoggerError::HandlerPanicked { .. } => eprintln!(
            "[LOGGER CRITICAL] Handler #{} ({}) {}: {}. Other handlers continue to function.",
            idx,
            handler.name(),
            what,
            err
        ),
        _ => eprintln!(
            "[LOGGER ERROR] Handler #{} ({}) {}: {}",
            idx,
            handler.name(),
            what,
            err
        ),
    }
}
