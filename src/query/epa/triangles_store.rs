use crate::query::epa::{EdgeEPA, TriangleEPA};
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// The default maximum number of triangles of an EPA polytope.
pub const DEFAULT_MAX_TRIANGLES: usize = 200;

/// A bounded arena of the triangles of an EPA polytope.
///
/// Triangles are identified by their index, which never changes. Removing a triangle from the
/// polytope only marks it as obsolete; the only way to discard triangles is to [`truncate`]
/// the store, which is how a failed silhouette undoes its own allocations.
///
/// [`truncate`]: TrianglesStore::truncate
#[derive(Clone, Debug)]
pub struct TrianglesStore {
    triangles: Vec<TriangleEPA>,
    capacity: usize,
    overflowed: bool,
}

impl Default for TrianglesStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRIANGLES)
    }
}

impl TrianglesStore {
    /// Creates an empty store able to hold up to `capacity` triangles.
    pub fn new(capacity: usize) -> Self {
        TrianglesStore {
            triangles: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    /// Adds the unlinked triangle `(a, b, c)` and returns its index.
    ///
    /// Returns `None` if the store is full.
    pub fn new_triangle(&mut self, a: usize, b: usize, c: usize) -> Option<usize> {
        if self.is_full() {
            self.overflowed = true;
            return None;
        }

        self.triangles.push(TriangleEPA::new(a, b, c));
        Some(self.triangles.len() - 1)
    }

    /// The triangle with the index `i`, if it exists.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&TriangleEPA> {
        self.triangles.get(i)
    }

    /// The triangle with the index `i`, if it exists.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut TriangleEPA> {
        self.triangles.get_mut(i)
    }

    /// The number of triangles allocated so far, obsolete ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Is this store empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The maximum number of triangles of this store.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Can this store hold no more triangles?
    #[inline]
    pub fn is_full(&self) -> bool {
        self.triangles.len() >= self.capacity
    }

    /// Was a triangle ever refused because this store was full?
    #[inline]
    pub fn has_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Discards every triangle with an index greater or equal to `len`.
    pub fn truncate(&mut self, len: usize) {
        self.triangles.truncate(len)
    }

    /// Iterates through the indices of the triangles that are not obsolete.
    pub fn live_triangles(&self) -> impl Iterator<Item = usize> + '_ {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| !tri.is_obsolete())
            .map(|(i, _)| i)
    }

    /// Checks that the live triangles form a closed 2-manifold.
    ///
    /// Every edge of a live triangle must be linked to a live twin joining the same vertices in
    /// the opposite direction, and linked back to it.
    pub fn is_manifold(&self) -> bool {
        self.live_triangles().all(|i| {
            (0..3).all(|k| {
                let edge = EdgeEPA::new(i, k);
                let Some(twin) = self[i].adjacent_edge(k) else {
                    return false;
                };
                let Some(neighbor) = self.get(twin.owner()) else {
                    return false;
                };

                !neighbor.is_obsolete()
                    && neighbor.adjacent_edge(twin.index()) == Some(edge)
                    && twin.source(self) == edge.target(self)
                    && twin.target(self) == edge.source(self)
            })
        })
    }
}

impl Index<usize> for TrianglesStore {
    type Output = TriangleEPA;

    #[inline]
    fn index(&self, i: usize) -> &TriangleEPA {
        &self.triangles[i]
    }
}

impl IndexMut<usize> for TrianglesStore {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut TriangleEPA {
        &mut self.triangles[i]
    }
}
