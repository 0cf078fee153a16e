use crate::query::epa::{half_link, TrianglesStore};
use crate::query::gjk::CSOPoint;

/// A directed edge of a triangle of the EPA polytope.
///
/// The edge `index` of the triangle `owner` goes from its vertex `index` to its vertex
/// `(index + 1) % 3`. Edges refer to their triangle by its index in a [`TrianglesStore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeEPA {
    owner: usize,
    index: usize,
}

impl EdgeEPA {
    /// Creates the edge `index` (between 0 and 2) of the triangle `owner`.
    #[inline]
    pub fn new(owner: usize, index: usize) -> Self {
        debug_assert!(index < 3, "A triangle only has three edges.");
        EdgeEPA { owner, index }
    }

    /// The index of the triangle this edge belongs to.
    #[inline]
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// The local index of this edge in its triangle.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The vertex this edge starts from.
    #[inline]
    pub fn source(&self, store: &TrianglesStore) -> usize {
        store[self.owner].vertex(self.index)
    }

    /// The vertex this edge ends at.
    #[inline]
    pub fn target(&self, store: &TrianglesStore) -> usize {
        store[self.owner].vertex((self.index + 1) % 3)
    }

    /// Walks the polytope from this edge to find the silhouette seen from the vertex `index_w`.
    ///
    /// The owner of this edge is reached from a triangle already found visible. If the owner is
    /// not visible either, this edge is part of the silhouette and a new triangle joining it to
    /// the vertex is created. Otherwise the owner is marked obsolete and the walk continues
    /// through its two other edges.
    ///
    /// On failure, the triangles created by this call are discarded and `false` is returned.
    pub fn compute_silhouette(
        self,
        vertices: &[CSOPoint],
        index_w: usize,
        store: &mut TrianglesStore,
    ) -> bool {
        let first_new = store.len();

        if store[self.owner].is_obsolete() {
            return true;
        }

        if !store[self.owner].is_visible_from_vertex(vertices, index_w) {
            let source = self.source(store);
            let target = self.target(store);

            let Some(new_id) = store.new_triangle(index_w, target, source) else {
                log::debug!("EPA: the triangles store is full, cannot close the silhouette.");
                return false;
            };

            let _ = store[new_id].compute_closest_point(vertices);
            return half_link(store, EdgeEPA::new(new_id, 1), self);
        }

        store[self.owner].set_obsolete(true);

        let owner = &store[self.owner];
        let next = owner.adjacent_edge((self.index + 1) % 3);
        let prev = owner.adjacent_edge((self.index + 2) % 3);

        let found = match (next, prev) {
            (Some(next), Some(prev)) => {
                next.compute_silhouette(vertices, index_w, store)
                    && prev.compute_silhouette(vertices, index_w, store)
            }
            _ => false,
        };

        if !found {
            store[self.owner].set_obsolete(false);
            store.truncate(first_new);
        }

        found
    }
}
