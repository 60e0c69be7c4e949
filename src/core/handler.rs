//! Handler and flusher traits for log output destinations

use super::{entry::Entry, error::Result};

/// Consumer of finalized entries.
///
/// Handlers are shared between every level they are registered for and are
/// invoked concurrently from any thread that logs, hence `&self`.
pub trait Handler: Send + Sync {
    fn log(&self, entry: &Entry) -> Result<()>;

    /// The flush capability of this handler, if it buffers anything.
    fn as_flusher(&self) -> Option<&dyn Flusher> {
        None
    }

    fn name(&self) -> &str {
        "handler"
    }
}

/// Optional capability to push out buffered state.
pub trait Flusher: Send + Sync {
    fn flush(&self) -> Result<()>;
}

impl<F> Handler for F
where
    F: Fn(&Entry) -> Result<()> + Send + Sync,
{
    fn log(&self, entry: &Entry) -> Result<()> {
        self(entry)
    }

    fn name(&self) -> &str {
        "fn"
    }
}
