//! Min-priority queue of events
//!
//! Entries are never removed or reordered except by extraction. Stale
//! predictions stay queued until they surface and are discarded by the
//! engine. Equal times pop in insertion order so replays are reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::event::Event;

#[derive(Debug)]
struct Entry {
    seq: u64,
    event: Event,
}

impl Entry {
    fn key(&self) -> (f64, u64) {
        (self.event.time, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        let (t1, s1) = self.key();
        let (t2, s2) = other.key();
        t1.total_cmp(&t2).then(s1.cmp(&s2))
    }
}

/// Events ordered by time ascending, ties by insertion sequence
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { seq, event }));
    }

    /// Remove and return the earliest event
    pub fn pop_min(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }

    /// Time of the earliest event without removing it
    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(entry)| entry.event.time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of events ever inserted
    pub fn inserted(&self) -> u64 {
        self.next_seq
    }
}
