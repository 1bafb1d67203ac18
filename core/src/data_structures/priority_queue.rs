//! Stable min-priority queue used as the search and scheduling frontier
//!
//! Entries are ordered by ascending priority; entries with equal priority
//! leave the queue in the order they entered it. Superseded entries are
//! never removed (lazy deletion), so the same element may be queued more
//! than once.
//!
//! # Complexity
//! - push: O(log n)
//! - pop: O(log n)
//! - peek: O(1)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry carrying the insertion sequence for stable tie-breaking
#[derive(Debug, Clone)]
struct HeapEntry<T> {
    priority: f64,
    sequence: u64,
    element: T,
}

impl<T> PartialEq for HeapEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for HeapEntry<T> {}

// Reverse ordering for min-heap (lower priority, then earlier insertion, pops first)
impl<T> Ord for HeapEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for HeapEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue with first-in-first-out ordering among equal priorities
#[derive(Debug, Clone)]
pub struct StablePriorityQueue<T> {
    heap: BinaryHeap<HeapEntry<T>>,
    next_sequence: u64,
}

impl<T> Default for StablePriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StablePriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Enqueues an element with the given priority
    pub fn push(&mut self, element: T, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(HeapEntry {
            priority,
            sequence,
            element,
        });
    }

    /// Dequeues the element with the lowest priority
    pub fn pop(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|entry| (entry.element, entry.priority))
    }

    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap.peek().map(|entry| (&entry.element, entry.priority))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
