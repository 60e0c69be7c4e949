//! Request-scoped carrier for log entries
//!
//! A `Context` is an immutable chain of typed values. Deriving a context
//! never changes its parent; lookups walk from the newest value to the
//! oldest. Values are keyed by a type, so a private key type cannot collide
//! with keys defined anywhere else.

use super::entry::Entry;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Node {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

impl Context {
    /// Empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context holding `value` under key type `K`
    #[must_use]
    pub fn with_value<K: 'static, V: Any + Send + Sync>(&self, value: V) -> Self {
        Self {
            node: Some(Arc::new(Node {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.node.clone(),
            })),
        }
    }

    /// Nearest value stored under key type `K`, if it has type `V`
    pub fn value<K: 'static, V: Any>(&self) -> Option<&V> {
        let key = TypeId::of::<K>();
        let mut node = self.node.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return n.value.downcast_ref::<V>();
            }
            node = n.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut node = self.node.as_deref();
        while let Some(n) = node {
            depth += 1;
            node = n.parent.as_deref();
        }
        f.debug_struct("Context").field("depth", &depth).finish()
    }
}

struct EntryKey;

/// Derive a context carrying `entry`.
///
/// The entry is stored by value: extending it afterwards, or extending a copy
/// read back out, does not change what the context holds.
pub fn new_context(ctx: &Context, entry: Entry) -> Context {
    ctx.with_value::<EntryKey, Entry>(entry)
}

pub(crate) fn entry_from(ctx: &Context) -> Option<Entry> {
    ctx.value::<EntryKey, Entry>().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{fields::FieldValue, logger::Logger};

    struct OtherKey;

    #[test]
    fn test_background_has_no_entry() {
        assert!(entry_from(&Context::background()).is_none());
    }

    #[test]
    fn test_roundtrip_entry() {
        let logger = Logger::new();
        let ctx = new_context(&Context::background(), logger.entry().str("request_id", "r-1"));

        let entry = logger.from_context(&ctx);
        assert_eq!(
            entry.chain().merged().get("request_id").and_then(FieldValue::as_str),
            Some("r-1")
        );
    }

    #[test]
    fn test_extending_retrieved_entry_does_not_touch_context() {
        let logger = Logger::new();
        let ctx = new_context(&Context::background(), logger.entry().str("a", "1"));

        let extended = logger.from_context(&ctx).str("b", "2");
        assert_eq!(extended.chain().len(), 2);
        assert_eq!(logger.from_context(&ctx).chain().len(), 1);
    }

    #[test]
    fn test_child_shadows_parent() {
        let logger = Logger::new();
        let parent = new_context(&Context::background(), logger.entry().str("layer", "parent"));
        let child = new_context(&parent, logger.entry().str("layer", "child"));

        let layer = |ctx: &Context| {
            logger
                .from_context(ctx)
                .chain()
                .merged()
                .get("layer")
                .and_then(FieldValue::as_str)
                .map(str::to_string)
        };
        assert_eq!(layer(&parent).as_deref(), Some("parent"));
        assert_eq!(layer(&child).as_deref(), Some("child"));
    }

    #[test]
    fn test_keys_do_not_collide() {
        let ctx = Context::background()
            .with_value::<OtherKey, u32>(7)
            .with_value::<EntryKey, u32>(9);

        assert_eq!(ctx.value::<OtherKey, u32>(), Some(&7));
        assert!(entry_from(&ctx).is_none());
    }
}
