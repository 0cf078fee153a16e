use crate::math::{Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::epa::{EdgeEPA, TrianglesStore};
use crate::query::gjk::{self, CSOPoint};
use crate::utils;

/// A triangular face of the polytope expanded by EPA.
///
/// Vertices are indices into the vertex buffer of the polytope, ordered counterclockwise when
/// seen from outside of the polytope. The adjacent edge `i` is the twin, on the neighbor
/// triangle, of the edge going from the vertex `i` to the vertex `(i + 1) % 3`.
#[derive(Clone, Debug)]
pub struct TriangleEPA {
    indices: [usize; 3],
    adjacent_edges: [Option<EdgeEPA>; 3],
    obsolete: bool,
    det: Real,
    lambda1: Real,
    lambda2: Real,
    closest_point: Vector<Real>,
    dist_square: Real,
}

impl TriangleEPA {
    /// Creates an unlinked triangle with the vertices `a`, `b`, `c`.
    ///
    /// Its closest point is unknown until [`Self::compute_closest_point`] is called.
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        TriangleEPA {
            indices: [a, b, c],
            adjacent_edges: [None; 3],
            obsolete: false,
            det: 0.0,
            lambda1: 0.0,
            lambda2: 0.0,
            closest_point: Vector::zeros(),
            dist_square: 0.0,
        }
    }

    /// The index of the `i`-th vertex of this triangle.
    #[inline]
    pub fn vertex(&self, i: usize) -> usize {
        self.indices[i]
    }

    /// The indices of the three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [usize; 3] {
        self.indices
    }

    /// The twin of the `i`-th edge of this triangle, if it was linked already.
    #[inline]
    pub fn adjacent_edge(&self, i: usize) -> Option<EdgeEPA> {
        self.adjacent_edges[i]
    }

    /// The twins of the three edges of this triangle.
    #[inline]
    pub fn adjacent_edges(&self) -> [Option<EdgeEPA>; 3] {
        self.adjacent_edges
    }

    /// Was this triangle removed from the polytope?
    #[inline]
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// Marks this triangle as removed from (or restored into) the polytope.
    #[inline]
    pub fn set_obsolete(&mut self, obsolete: bool) {
        self.obsolete = obsolete
    }

    /// The point of the supporting plane of this triangle closest to the origin.
    #[inline]
    pub fn closest_point(&self) -> Vector<Real> {
        self.closest_point
    }

    /// The squared distance between the origin and the supporting plane of this triangle.
    #[inline]
    pub fn dist_square(&self) -> Real {
        self.dist_square
    }

    /// Is this triangle flat, i.e., without a valid closest point?
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.det <= 0.0
    }

    /// Computes the point of the supporting plane of this triangle closest to the origin.
    ///
    /// Returns `false` if the triangle is degenerate, in which case nothing is cached.
    ///
    /// With `n = v1 × v2`, the weights `lambda1 = (v2 × p0) · n` and `lambda2 = (p0 × v1) · n`
    /// over `det = n · n` are the barycentric coordinates of the projection of the origin.
    /// They are equal to the Gram-matrix expressions but do not cancel out on long thin
    /// triangles.
    pub fn compute_closest_point(&mut self, vertices: &[CSOPoint]) -> bool {
        let p0 = vertices[self.indices[0]].point.coords;
        let v1 = vertices[self.indices[1]].point.coords - p0;
        let v2 = vertices[self.indices[2]].point.coords - p0;
        let n = v1.cross(&v2);

        self.det = n.norm_squared();
        self.lambda1 = v2.cross(&p0).dot(&n);
        self.lambda2 = p0.cross(&v1).dot(&n);

        if self.det > 0.0 {
            let normal = n / self.det.sqrt();
            let dist = p0.dot(&normal);
            self.closest_point = normal * dist;
            self.dist_square = dist * dist;
            true
        } else {
            false
        }
    }

    /// Does the closest point to the origin lie inside of this triangle?
    ///
    /// Points landing on an edge up to rounding errors are accepted.
    pub fn is_closest_point_internal_to_triangle(&self) -> bool {
        let slack = DEFAULT_EPSILON * 100.0 * self.det;
        !self.is_degenerate()
            && self.lambda1 >= -slack
            && self.lambda2 >= -slack
            && self.lambda1 + self.lambda2 <= self.det + slack
    }

    /// Is this triangle visible from the vertex `index`?
    ///
    /// Degenerate triangles are always considered visible.
    pub fn is_visible_from_vertex(&self, vertices: &[CSOPoint], index: usize) -> bool {
        if self.is_degenerate() {
            return true;
        }

        let w = vertices[index].point.coords;
        let eps_tol = gjk::eps_tol();

        if self.dist_square > eps_tol * eps_tol {
            (w - self.closest_point).dot(&self.closest_point) > 0.0
        } else {
            // The plane contains the origin: the closest point says nothing of the orientation.
            let p0 = &vertices[self.indices[0]].point;
            match self.outward_normal(vertices) {
                Some(n) => (w - p0.coords).dot(&n) > 0.0,
                None => true,
            }
        }
    }

    /// The unit normal of this triangle, pointing outside of the polytope.
    pub fn outward_normal(&self, vertices: &[CSOPoint]) -> Option<UnitVector<Real>> {
        utils::ccw_face_normal(self.indices.map(|i| &vertices[i].point))
    }

    /// The barycentric coordinates of the closest point to the origin.
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        let l1 = self.lambda1 / self.det;
        let l2 = self.lambda2 / self.det;
        [1.0 - l1 - l2, l1, l2]
    }

    /// Interpolates the per-vertex points `pts` with the barycentric coordinates of the closest
    /// point to the origin.
    pub fn compute_closest_point_of_object(&self, pts: [&Point<Real>; 3]) -> Point<Real> {
        let [w0, w1, w2] = self.barycentric_coordinates();
        pts[0] * w0 + pts[1].coords * w1 + pts[2].coords * w2
    }

    /// The points of the first and second shapes matching the closest point to the origin.
    pub fn witness_points(&self, vertices: &[CSOPoint]) -> (Point<Real>, Point<Real>) {
        let [a, b, c] = self.indices.map(|i| &vertices[i]);
        (
            self.compute_closest_point_of_object([&a.orig1, &b.orig1, &c.orig1]),
            self.compute_closest_point_of_object([&a.orig2, &b.orig2, &c.orig2]),
        )
    }
}

/// Records that `e1` is the twin of `e0`, leaving `e1`'s triangle untouched.
///
/// Returns `false` without modifying anything if the edges don't join the same vertices in
/// opposite directions.
pub fn half_link(store: &mut TrianglesStore, e0: EdgeEPA, e1: EdgeEPA) -> bool {
    let is_twin = e0.source(store) == e1.target(store) && e0.target(store) == e1.source(store);

    if is_twin {
        store[e0.owner()].adjacent_edges[e0.index()] = Some(e1);
    }

    is_twin
}

/// Makes `e0` and `e1` twins of each other.
///
/// Returns `false` without modifying anything if the edges don't join the same vertices in
/// opposite directions.
pub fn link(store: &mut TrianglesStore, e0: EdgeEPA, e1: EdgeEPA) -> bool {
    half_link(store, e0, e1) && half_link(store, e1, e0)
}

/// Removes the triangle `triangle` and every triangle visible from the vertex `index_w`, then
/// closes the hole with a fan of new triangles sharing this vertex.
///
/// The new triangles are appended to `store`. Returns `false` if the silhouette could not be
/// closed, e.g., because `store` is full.
pub fn compute_silhouette(
    store: &mut TrianglesStore,
    triangle: usize,
    vertices: &[CSOPoint],
    index_w: usize,
) -> bool {
    let first_new = store.len();
    store[triangle].set_obsolete(true);

    let edges = store[triangle].adjacent_edges();

    for edge in edges {
        match edge {
            Some(edge) if edge.compute_silhouette(vertices, index_w, store) => {}
            _ => return false,
        }
    }

    let end = store.len();

    if end == first_new {
        log::debug!("EPA: found an empty silhouette.");
        return false;
    }

    let mut prev = end - 1;

    for i in first_new..end {
        let Some(outside) = store[i].adjacent_edge(1) else {
            return false;
        };

        if !half_link(store, outside, EdgeEPA::new(i, 1))
            || !link(store, EdgeEPA::new(i, 0), EdgeEPA::new(prev, 2))
        {
            log::debug!("EPA: failed to link the new triangle {}.", i);
            return false;
        }

        prev = i;
    }

    true
}
