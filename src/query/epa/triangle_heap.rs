use crate::math::Real;
use crate::query::epa::TrianglesStore;
use alloc::collections::BinaryHeap;
use core::cmp::Ordering;
use ordered_float::OrderedFloat;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct HeapEntry {
    dist_square: OrderedFloat<Real>,
    triangle: usize,
}

impl PartialOrd for HeapEntry {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so that the std max-heap pops the closest triangle first.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist_square
            .cmp(&self.dist_square)
            .then_with(|| other.triangle.cmp(&self.triangle))
    }
}

/// A min-heap of triangles keyed by their squared distance to the origin.
///
/// Obsolete triangles are not removed eagerly: they are skipped by [`TriangleHeap::pop_live`].
#[derive(Clone, Debug, Default)]
pub struct TriangleHeap {
    heap: BinaryHeap<HeapEntry>,
}

impl TriangleHeap {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the triangle `triangle` with the squared distance `dist_square`.
    pub fn push(&mut self, triangle: usize, dist_square: Real) {
        self.heap.push(HeapEntry {
            dist_square: OrderedFloat(dist_square),
            triangle,
        })
    }

    /// Removes and returns the closest triangle of `store` that is not obsolete.
    pub fn pop_live(&mut self, store: &TrianglesStore) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            match store.get(entry.triangle) {
                Some(tri) if !tri.is_obsolete() => return Some(entry.triangle),
                _ => {}
            }
        }

        None
    }

    /// The smallest squared distance of this heap, obsolete triangles included.
    pub fn peek_dist_square(&self) -> Option<Real> {
        self.heap.peek().map(|entry| entry.dist_square.0)
    }

    /// The number of entries of this heap, obsolete triangles included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is this heap empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
