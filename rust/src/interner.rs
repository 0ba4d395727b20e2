//! Dense integer indices for string task ids.
//!
//! Indices are handed out in first-seen order, so iterating `0..len()` walks
//! tasks in the order the caller supplied them.

use rustc_hash::FxHashMap;

/// Interned task index (u32 for compact adjacency lists).
pub type TaskIdx = u32;

/// Maps task id strings to indices and back.
#[derive(Debug, Clone)]
pub struct TaskIdInterner {
    to_idx: FxHashMap<String, TaskIdx>,
    from_idx: Vec<String>,
}

impl TaskIdInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern an id, returning its index. Repeated ids keep their first index.
    pub fn intern(&mut self, s: &str) -> TaskIdx {
        if let Some(&idx) = self.to_idx.get(s) {
            return idx;
        }
        let idx = self.from_idx.len() as TaskIdx;
        self.from_idx.push(s.to_string());
        self.to_idx.insert(s.to_string(), idx);
        idx
    }

    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskIdx> {
        self.to_idx.get(s).copied()
    }

    #[inline]
    pub fn resolve(&self, idx: TaskIdx) -> Option<&str> {
        self.from_idx.get(idx as usize).map(|s| s.as_str())
    }

    /// All interned ids in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.from_idx.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}

impl Default for TaskIdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
