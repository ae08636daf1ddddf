//! Focusable Registry - ordered id → handle store.
//!
//! Insertion order is the traversal order:
//! - `register` inserts at the end, or replaces a handle in place
//! - `unregister` removes an entry and keeps the rest in order
//! - `ordered_ids` is the ring the focus coordinator walks
//!
//! The registry never triggers focus changes itself.

use indexmap::IndexMap;

// =============================================================================
// Registry
// =============================================================================

/// Ordered mapping of node ids to the handles that receive activation.
#[derive(Debug, Clone)]
pub struct Registry<H> {
    nodes: IndexMap<String, H>,
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Insert or overwrite the entry for `id`.
    ///
    /// An existing id keeps its traversal position; only its handle changes.
    /// Returns the handle that was replaced, if any.
    pub fn register(&mut self, id: impl Into<String>, handle: H) -> Option<H> {
        self.nodes.insert(id.into(), handle)
    }

    /// Remove the entry for `id`, returning its handle. Absent ids are a no-op.
    pub fn unregister(&mut self, id: &str) -> Option<H> {
        self.nodes.shift_remove(id)
    }

    pub fn lookup(&self, id: &str) -> Option<&H> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Ids in insertion order.
    pub fn ordered_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Borrowing iterator over ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Traversal position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Id at traversal position `index`.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(|(id, _)| id.as_str())
    }

    pub fn first_id(&self) -> Option<&str> {
        self.id_at(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}
