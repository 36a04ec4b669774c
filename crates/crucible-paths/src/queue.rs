//! Generic min-priority queue.
//!
//! Entries are stored in a binary heap keyed by `(priority, insertion_order)`
//! so that the smallest priority is popped first. Among equal priorities
//! the current order is FIFO, but that is an implementation detail callers
//! must not rely on.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

#[derive(Debug)]
struct Entry<T, P> {
    payload: T,
    priority: P,
    seq: u64,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap wraps entries in `Reverse`.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue over arbitrary payloads.
///
/// The payload type needs no ordering of its own; only the priority is
/// compared.
pub struct MinQueue<T, P = u64> {
    heap: BinaryHeap<Reverse<Entry<T, P>>>,
    seq: u64,
}

impl<T, P: Ord> MinQueue<T, P> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Insert `payload` at `priority`.
    pub fn push(&mut self, payload: T, priority: P) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            payload,
            priority,
            seq,
        }));
    }

    /// Remove and return a minimum-priority entry.
    pub fn pop(&mut self) -> Result<(T, P), EmptyQueueError> {
        self.heap
            .pop()
            .map(|Reverse(e)| (e.payload, e.priority))
            .ok_or(EmptyQueueError)
    }

    /// Smallest priority currently queued.
    pub fn peek_priority(&self) -> Option<&P> {
        self.heap.peek().map(|Reverse(e)| &e.priority)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T, P: Ord> Default for MinQueue<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Extend<(T, P)> for MinQueue<T, P> {
    fn extend<I: IntoIterator<Item = (T, P)>>(&mut self, iter: I) {
        for (payload, priority) in iter {
            self.push(payload, priority);
        }
    }
}

/// Returned by [`MinQueue::pop`] when the queue has no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyQueueError;

impl fmt::Display for EmptyQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pop from an empty priority queue")
    }
}

impl std::error::Error for EmptyQueueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_priority_first() {
        let mut q = MinQueue::new();
        q.push("a", 3);
        q.push("b", 1);
        q.push("c", 2);

        assert_eq!(q.pop(), Ok(("b", 1)));
        assert_eq!(q.pop(), Ok(("c", 2)));
        assert_eq!(q.pop(), Ok(("a", 3)));
        assert_eq!(q.pop(), Err(EmptyQueueError));
    }

    #[test]
    fn pop_on_empty_is_an_error() {
        let mut q = MinQueue::<(), u32>::new();
        assert_eq!(q.pop(), Err(EmptyQueueError));
        assert_eq!(
            EmptyQueueError.to_string(),
            "pop from an empty priority queue"
        );
    }

    #[test]
    fn equal_priorities_all_come_out() {
        let mut q = MinQueue::new();
        q.push('x', 5u64);
        q.push('y', 5);
        q.push('z', 1);
        assert_eq!(q.pop().map(|(_, p)| p), Ok(1));
        let mut rest = vec![q.pop().unwrap(), q.pop().unwrap()];
        rest.sort();
        assert_eq!(rest, vec![('x', 5), ('y', 5)]);
        assert!(q.is_empty());
    }

    #[test]
    fn payload_needs_no_ordering() {
        struct Opaque(u8);
        let mut q = MinQueue::new();
        q.push(Opaque(1), 10u32);
        q.push(Opaque(2), 0);
        let (Opaque(v), p) = q.pop().unwrap();
        assert_eq!((v, p), (2, 0));
    }

    #[test]
    fn interleaved_push_pop_stays_sorted() {
        let mut q = MinQueue::new();
        let mut out = Vec::new();
        for (i, p) in [9u64, 4, 7, 1, 8, 2].into_iter().enumerate() {
            q.push(i, p);
            if i % 2 == 1 {
                out.push(q.pop().unwrap().1);
            }
        }
        while let Ok((_, p)) = q.pop() {
            out.push(p);
        }
        assert_eq!(out, vec![4, 1, 2, 7, 8, 9]);
    }

    #[test]
    fn peek_len_clear_extend() {
        let mut q = MinQueue::<&str, i32>::with_capacity(4);
        assert_eq!(q.peek_priority(), None);
        q.extend([("a", 2), ("b", -1)]);
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek_priority(), Some(&-1));
        q.clear();
        assert!(q.is_empty());
    }
}
