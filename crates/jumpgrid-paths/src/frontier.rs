//! The frontier: a min-priority queue of candidate jump points.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use jumpgrid_core::Point;

use crate::error::{FieldError, FieldResult};

/// Heap entry ordered by priority, then by insertion sequence.
#[derive(Clone, Copy)]
struct Entry {
    priority: f64,
    seq: u64,
    pos: Point,
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
        // Reverse on both keys so BinaryHeap (a max-heap) pops the lowest
        // priority first and breaks ties by earliest insertion.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue over grid coordinates with FIFO tie-breaking.
///
/// Not a set: the same coordinate may be queued more than once with
/// different priorities; stale entries are pruned by the cost-dominance
/// check when they are expanded.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` at `priority`.
    pub(crate) fn push(&mut self, pos: Point, priority: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { priority, seq, pos });
    }

    /// Remove and return the lowest-priority coordinate.
    ///
    /// Popping an empty frontier is a caller bug and surfaces as
    /// [`FieldError::ExhaustedFrontier`]; check [`is_empty`](Self::is_empty)
    /// first.
    pub(crate) fn pop(&mut self) -> FieldResult<Point> {
        self.heap
            .pop()
            .map(|e| e.pos)
            .ok_or(FieldError::ExhaustedFrontier)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
