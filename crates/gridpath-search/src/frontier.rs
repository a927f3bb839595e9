//! The priority-ordered exploration frontier.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use gridpath_core::Point;

/// Error returned by [`PriorityFrontier::pop_min`] on an empty frontier.
///
/// The search loop checks emptiness before popping, so seeing this error
/// indicates a defect in the loop structure, not a property of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyFrontier;

impl fmt::Display for EmptyFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("pop from an empty frontier")
    }
}

impl std::error::Error for EmptyFrontier {}

/// Heap entry, ordered by `(f, seq)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    f: i32,
    seq: u64,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the least (f, seq) first.
        // The sequence tie-break makes exploration order deterministic among
        // equal f costs: first pushed, first popped.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A multiset of positions ordered by `(f_cost, insertion sequence)`.
///
/// Duplicate pushes for the same position are allowed: `BinaryHeap` has no
/// decrease-key, so a position whose cost improves is simply pushed again
/// and the entry with the lower f wins; the stale entry is skipped by the
/// search when popped (its cell is already closed). Membership is therefore
/// counted, not flagged.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    members: HashMap<Point, u32>,
    seq: u64,
}

impl PriorityFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `pos` with the given f cost.
    pub fn push(&mut self, pos: Point, f_cost: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry {
            f: f_cost,
            seq,
            pos,
        });
        *self.members.entry(pos).or_insert(0) += 1;
    }

    /// Remove and return the position with the least `(f_cost, sequence)`.
    pub fn pop_min(&mut self) -> Result<(Point, i32), EmptyFrontier> {
        let entry = self.heap.pop().ok_or(EmptyFrontier)?;
        if let Some(count) = self.members.get_mut(&entry.pos) {
            *count -= 1;
            if *count == 0 {
                self.members.remove(&entry.pos);
            }
        }
        Ok((entry.pos, entry.f))
    }

    /// Whether `pos` is currently enqueued (any copy of it).
    pub fn contains(&self, pos: Point) -> bool {
        self.members.contains_key(&pos)
    }

    /// Number of enqueued entries, duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all entries. The insertion sequence keeps counting so ordering
    /// stays strict across reuse.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
    }
}
