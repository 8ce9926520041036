use heapless::{Deque, Vec};

use super::config::MAX_CAPACITY;

/// Fixed-capacity sliding window of recent samples.
///
/// Backed by a `heapless::Deque` sized for the largest allowed capacity,
/// so pushing is O(1) and never allocates. The front holds the most
/// recent sample and the back the oldest.
#[derive(Debug, Clone)]
pub struct Window<T> {
    samples: Deque<T, MAX_CAPACITY>,
    capacity: usize,
}

impl<T: Copy> Window<T> {
    /// Create an empty window. `capacity` is limited to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: Deque::new(),
            capacity: capacity.clamp(1, MAX_CAPACITY),
        }
    }

    /// Insert a sample as the most recent, returning the evicted oldest
    /// sample if the window was already full.
    pub fn push(&mut self, sample: T) -> Option<T> {
        let evicted = if self.is_full() {
            self.samples.pop_back()
        } else {
            None
        };
        // Never full here: len < capacity <= MAX_CAPACITY
        let _ = self.samples.push_front(sample);
        evicted
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Occupied slots, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.samples.iter().copied()
    }

    /// Copy of the occupied slots, most recent first, for the reducers.
    pub fn snapshot(&self) -> Vec<T, MAX_CAPACITY> {
        self.iter().collect()
    }
}
