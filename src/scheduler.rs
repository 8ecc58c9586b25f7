//! Removal deadlines for live particles.
//!
//! A single min-heap of `(deadline, id)` pairs replaces one timer per
//! particle. Cancelling everything on teardown is a single `clear`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::particle::ParticleId;

#[derive(Clone, Copy, Debug)]
struct Entry {
    deadline: f64,
    /// Insertion order; breaks deadline ties first-scheduled-first.
    seq: u64,
    id: ParticleId,
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
    // Reversed: BinaryHeap is a max-heap and we want the earliest deadline on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending removals, earliest first.
#[derive(Debug, Default)]
pub struct LifecycleScheduler {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl LifecycleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot removal of `id` at `now + after`.
    pub fn schedule_removal(&mut self, id: ParticleId, now: f64, after: f32) {
        self.schedule_at(id, now + after as f64);
    }

    /// Arm a one-shot removal of `id` at an absolute deadline.
    pub fn schedule_at(&mut self, id: ParticleId, deadline: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { deadline, seq, id });
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.deadline)
    }

    /// Pop the earliest entry if its deadline is at or before `now`.
    ///
    /// Each scheduled entry is returned exactly once.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, ParticleId)> {
        match self.heap.peek() {
            Some(entry) if entry.deadline <= now => {
                self.heap.pop().map(|e| (e.deadline, e.id))
            }
            _ => None,
        }
    }

    /// Drop every pending removal.
    pub fn cancel_all(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
