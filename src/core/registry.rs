//! Handler registry and its cached per-level snapshot
//!
//! Registration is write-rare and serialized by a mutex. Every registration
//! rebuilds an immutable [`LevelSnapshot`] and publishes it with an atomic
//! pointer swap before the mutex is released, so the logging path can read
//! handler lists without taking any lock and never observes a partial update.

use super::{handler::Handler, level::Level};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub type HandlerList = Arc<[Arc<dyn Handler>]>;

/// Immutable lookup table from level to handlers, plus the flat list of
/// every registered handler in registration order.
pub struct LevelSnapshot {
    by_level: [HandlerList; Level::COUNT],
    all: HandlerList,
}

impl LevelSnapshot {
    fn empty() -> Self {
        Self {
            by_level: std::array::from_fn(|_| Arc::from(Vec::new())),
            all: Arc::from(Vec::new()),
        }
    }

    fn build(state: &RegistryState) -> Self {
        Self {
            by_level: std::array::from_fn(|i| Arc::from(state.by_level[i].clone())),
            all: Arc::from(state.all.clone()),
        }
    }

    /// Handlers registered for `level`, in registration order
    #[inline]
    pub fn handlers(&self, level: Level) -> &[Arc<dyn Handler>] {
        &self.by_level[level.index()]
    }

    /// Every registered handler, once per registration call
    #[inline]
    pub fn all(&self) -> &[Arc<dyn Handler>] {
        &self.all
    }
}

impl fmt::Debug for LevelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (i, handlers) in self.by_level.iter().enumerate() {
            map.entry(&super::level::ALL_LEVELS[i], &handlers.len());
        }
        map.finish()
    }
}

#[derive(Default)]
struct RegistryState {
    by_level: [Vec<Arc<dyn Handler>>; Level::COUNT],
    all: Vec<Arc<dyn Handler>>,
}

/// Level-to-handlers store. Grows monotonically; there is no deregistration.
pub struct HandlerRegistry {
    state: Mutex<RegistryState>,
    snapshot: ArcSwap<LevelSnapshot>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            snapshot: ArcSwap::from_pointee(LevelSnapshot::empty()),
        }
    }

    /// Register `handler` for each of `levels`.
    ///
    /// No uniqueness check is made: registering the same handler twice for a
    /// level makes it receive each entry of that level twice.
    pub fn register(&self, handler: Arc<dyn Handler>, levels: &[Level]) {
        let mut state = self.state.lock();
        for level in levels {
            state.by_level[level.index()].push(Arc::clone(&handler));
        }
        state.all.push(handler);

        self.snapshot.store(Arc::new(LevelSnapshot::build(&state)));
    }

    /// Current snapshot. Holding it keeps that view alive even if handlers
    /// are registered meanwhile.
    #[inline]
    pub fn snapshot(&self) -> Arc<LevelSnapshot> {
        self.snapshot.load_full()
    }

    /// Number of registration calls made
    pub fn len(&self) -> usize {
        self.snapshot.load().all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("snapshot", &*self.snapshot.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{entry::Entry, error::Result, level::ALL_LEVELS};

    struct Named(&'static str);

    impl Handler for Named {
        fn log(&self, _entry: &Entry) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(handlers: &[Arc<dyn Handler>]) -> Vec<&str> {
        handlers.iter().map(|h| h.name()).collect()
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::new();
        let snapshot = registry.snapshot();
        assert!(registry.is_empty());
        for level in ALL_LEVELS {
            assert!(snapshot.handlers(level).is_empty());
        }
    }

    #[test]
    fn test_register_routes_by_level() {
        let registry = HandlerRegistry::new();
        registry.register(Arc::new(Named("errors")), &[Level::Error, Level::Fatal]);
        registry.register(Arc::new(Named("everything")), &ALL_LEVELS);

        let snapshot = registry.snapshot();
        assert_eq!(names(snapshot.handlers(Level::Debug)), vec!["everything"]);
        assert_eq!(names(snapshot.handlers(Level::Error)), vec!["errors", "everything"]);
        assert_eq!(names(snapshot.all()), vec!["errors", "everything"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_registration_kept() {
        let registry = HandlerRegistry::new();
        let handler: Arc<dyn Handler> = Arc::new(Named("dup"));
        registry.register(Arc::clone(&handler), &[Level::Info]);
        registry.register(handler, &[Level::Info]);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.handlers(Level::Info).len(), 2);
        assert_eq!(snapshot.all().len(), 2);
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let registry = HandlerRegistry::new();
        registry.register(Arc::new(Named("first")), &[Level::Warn]);
        let before = registry.snapshot();

        registry.register(Arc::new(Named("second")), &[Level::Warn]);

        assert_eq!(names(before.handlers(Level::Warn)), vec!["first"]);
        assert_eq!(
            names(registry.snapshot().handlers(Level::Warn)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_register_without_levels() {
        let registry = HandlerRegistry::new();
        registry.register(Arc::new(Named("flush-only")), &[]);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.all().len(), 1);
        for level in ALL_LEVELS {
            assert!(snapshot.handlers(level).is_empty());
        }
    }
}
