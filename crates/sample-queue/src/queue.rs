//! Drop-Oldest Ring Buffer Implementation

use crate::Sample;

/// Bounded FIFO queue of samples with drop-oldest eviction.
///
/// Storage is preallocated once; `push` never fails and never grows the
/// buffer. When the queue is at capacity, the oldest sample is evicted and
/// returned so the caller can account for the loss. The structure itself is
/// not synchronized; the driver wraps it in a short-critical-section lock.
pub struct SampleQueue {
    /// Pre-allocated storage
    storage: Box<[Sample]>,
    /// Capacity of the queue
    capacity: usize,
    /// Index of the oldest element
    head: usize,
    /// Number of elements currently stored
    len: usize,
}

impl SampleQueue {
    /// Create a new queue with the given capacity (must be non-zero)
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sample queue capacity must be non-zero");
        let storage: Vec<Sample> = (0..capacity).map(|_| Sample::default()).collect();
        Self {
            storage: storage.into_boxed_slice(),
            capacity,
            head: 0,
            len: 0,
        }
    }

    /// Create a queue with the reference capacity (16 samples)
    pub fn with_default_capacity() -> Self {
        Self::new(crate::DEFAULT_CAPACITY)
    }

    /// Append a sample at the tail.
    ///
    /// If the queue was at capacity, the oldest sample is removed first and
    /// returned as `Some(evicted)`. The queue always reflects the most
    /// recent `capacity` samples.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        let evicted = if self.len == self.capacity {
            let oldest = self.storage[self.head];
            self.head = (self.head + 1) % self.capacity;
            self.len -= 1;
            Some(oldest)
        } else {
            None
        };

        let tail = (self.head + self.len) % self.capacity;
        self.storage[tail] = sample;
        self.len += 1;
        evicted
    }

    /// Remove and return the oldest sample, or `None` if empty.
    pub fn pop(&mut self) -> Option<Sample> {
        if self.len == 0 {
            return None;
        }
        let sample = self.storage[self.head];
        self.head = (self.head + 1) % self.capacity;
        self.len -= 1;
        Some(sample)
    }

    /// Number of samples currently queued
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Queue capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all queued samples
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: i16) -> Sample {
        Sample::new(n, -n, n * 2)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = SampleQueue::new(16);
        for i in 1..=10 {
            assert!(queue.push(numbered(i)).is_none());
        }
        for i in 1..=10 {
            assert_eq!(queue.pop(), Some(numbered(i)));
        }
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_drop_oldest_keeps_last_capacity() {
        // Reference scenario: capacity 16, push 20, queue holds 5..=20
        let mut queue = SampleQueue::new(16);
        let mut evicted = Vec::new();
        for i in 1..=20 {
            if let Some(old) = queue.push(numbered(i)) {
                evicted.push(old);
            }
        }
        assert_eq!(queue.len(), 16);
        assert_eq!(evicted, (1..=4).map(numbered).collect::<Vec<_>>());
        assert_eq!(queue.pop(), Some(numbered(5)));
        for i in 6..=20 {
            assert_eq!(queue.pop(), Some(numbered(i)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_len_and_is_empty_are_read_only() {
        let mut queue = SampleQueue::new(4);
        queue.push(numbered(1));
        queue.push(numbered(2));
        for _ in 0..5 {
            assert_eq!(queue.len(), 2);
            assert!(!queue.is_empty());
        }
        assert_eq!(queue.pop(), Some(numbered(1)));
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut queue = SampleQueue::new(16);
        let sample = Sample::new(100, -50, 3200);
        queue.push(sample);
        let popped = queue.pop().unwrap();
        assert_eq!(popped.to_le_bytes(), sample.to_le_bytes());
    }

    #[test]
    fn test_eviction_returns_oldest() {
        let mut queue = SampleQueue::new(2);
        assert!(queue.push(numbered(1)).is_none());
        assert!(queue.push(numbered(2)).is_none());
        assert_eq!(queue.push(numbered(3)), Some(numbered(1)));
        assert_eq!(queue.push(numbered(4)), Some(numbered(2)));
        assert_eq!(queue.pop(), Some(numbered(3)));
        assert_eq!(queue.pop(), Some(numbered(4)));
    }

    #[test]
    fn test_wraparound() {
        let mut queue = SampleQueue::new(3);
        for round in 0..10 {
            let base = round * 10;
            queue.push(numbered(base + 1));
            queue.push(numbered(base + 2));
            assert_eq!(queue.pop(), Some(numbered(base + 1)));
            assert_eq!(queue.pop(), Some(numbered(base + 2)));
            assert!(queue.is_empty());
        }
    }

    #[test]
    fn test_clear() {
        let mut queue = SampleQueue::new(4);
        queue.push(numbered(1));
        queue.push(numbered(2));
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
