//! Min-priority queue used as the search frontier.
//!
//! Items are stored in a binary heap keyed by `(priority, insertion_order)`.
//! Lower priorities are dequeued first; ties are broken by insertion order
//! (FIFO), which keeps search output deterministic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An entry in the queue.
#[derive(Debug)]
struct Entry<T> {
    item: T,
    priority: i32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap: smaller priority first,
        // then smaller seq.
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue.
///
/// Items with lower priority are dequeued first. Among items with the same
/// priority, those enqueued earlier are dequeued first.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Insert `item` with the given priority.
    pub fn enqueue(&mut self, item: T, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    /// Remove and return the item with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Remove and return the item with the lowest priority, along with it.
    pub fn dequeue_with_priority(&mut self) -> Option<(T, i32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.priority))
    }

    /// Priority of the next item to be dequeued.
    pub fn peek_priority(&self) -> Option<i32> {
        self.heap.peek().map(|Reverse(entry)| entry.priority)
    }

    /// Remove every item. Keeps the allocated capacity.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of items in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
