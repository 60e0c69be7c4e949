//! Append-only chain of field layers with deferred flattening
//!
//! A `FieldChain` is a persistent singly-linked list: appending a layer
//! allocates one node that points at the previous head, so two chains that
//! were derived from the same base share that base without copying it and
//! without being able to observe each other's later additions.

use super::fields::Fields;
use std::fmt;
use std::sync::Arc;

struct Layer {
    fields: Arc<Fields>,
    prev: Option<Arc<Layer>>,
}

impl Drop for Layer {
    // Unlink iteratively so that very long chains do not recurse on drop.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(node) = prev {
            match Arc::try_unwrap(node) {
                Ok(mut layer) => prev = layer.prev.take(),
                Err(_) => break,
            }
        }
    }
}

/// Ordered sequence of [`Fields`] layers
#[derive(Clone, Default)]
pub struct FieldChain {
    head: Option<Arc<Layer>>,
    len: usize,
}

impl FieldChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new chain with `fields` as its last layer.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn append(&self, fields: Fields) -> Self {
        self.append_shared(Arc::new(fields))
    }

    #[must_use]
    pub fn append_shared(&self, fields: Arc<Fields>) -> Self {
        Self {
            head: Some(Arc::new(Layer {
                fields,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Layers from oldest to newest
    pub fn layers(&self) -> Vec<&Fields> {
        let mut layers = Vec::with_capacity(self.len);
        let mut node = self.head.as_deref();
        while let Some(layer) = node {
            layers.push(layer.fields.as_ref());
            node = layer.prev.as_deref();
        }
        layers.reverse();
        layers
    }

    /// Flatten every layer into one map. Later layers win on key collision.
    pub fn merged(&self) -> Fields {
        let mut merged = Fields::new();
        for layer in self.layers() {
            merged.extend_from(layer);
        }
        merged
    }
}

impl fmt::Debug for FieldChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let merged = self.merged();
        f.debug_struct("FieldChain")
            .field("len", &self.len)
            .field("keys", &merged.names())
            .finish_non_exhaustive()
    }
}
