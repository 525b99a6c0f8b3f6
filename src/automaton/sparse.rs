// Tue Jan 13 2026 - Alex

use crate::automaton::nfa::StateId;

/// Insertion-ordered set of state ids with O(1) insert, lookup and clear.
#[derive(Debug, Clone)]
pub struct SparseSet {
    dense: Vec<StateId>,
    sparse: Vec<u32>,
    len: usize,
}

impl SparseSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    /// Grows to `capacity` and empties the set.
    pub fn resize(&mut self, capacity: usize) {
        self.dense.resize(capacity, 0);
        self.sparse.resize(capacity, 0);
        self.len = 0;
    }

    #[inline]
    pub fn contains(&self, id: StateId) -> bool {
        let index = self.sparse[id as usize] as usize;
        index < self.len && self.dense[index] == id
    }

    /// Returns false if `id` was already present.
    #[inline]
    pub fn insert(&mut self, id: StateId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.dense[self.len] = id;
        self.sparse[id as usize] = self.len as u32;
        self.len += 1;
        true
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.dense[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.as_slice().iter().copied()
    }
}
