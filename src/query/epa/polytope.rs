use crate::math::{Isometry, Point, Real, Vector};
use crate::query::epa::{
    compute_silhouette, link, EdgeEPA, EpaFailure, TriangleHeap, TrianglesStore,
};
use crate::query::gjk::{self, CSOPoint, Simplex};
use crate::query::EpaOptions;
use crate::shape::SupportMap;
use crate::utils::{self, WBasis};
use alloc::vec::Vec;
use na::Unit;

const TETRAHEDRON: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
// Apexes 0 and 1 around the ring (2, 3, 4).
const BIPYRAMID: [[usize; 3]; 6] = [
    [0, 2, 3],
    [0, 3, 4],
    [0, 4, 2],
    [1, 3, 2],
    [1, 4, 3],
    [1, 2, 4],
];

/// The polytope expanded by one EPA run: its vertices, faces and candidate faces.
#[derive(Clone, Debug)]
pub(crate) struct Polytope {
    pub vertices: Vec<CSOPoint>,
    pub store: TrianglesStore,
    pub heap: TriangleHeap,
}

impl Polytope {
    /// Builds a polytope enclosing the origin from the GJK simplex `simplex`.
    ///
    /// Simplices with less than four points are completed with support points of the CSO. If
    /// the completed seed is degenerate, it is rebuilt from a subset of the simplex: its
    /// largest triangle, then its farthest pair, then a single point.
    pub fn new<G1, G2>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &Simplex,
        options: &EpaOptions,
    ) -> Result<Self, EpaFailure>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut points: Vec<CSOPoint> = Vec::with_capacity(4);

        for pt in simplex.points() {
            if !points.iter().any(|p| p.point == pt.point) {
                points.push(*pt);
            }
        }

        if points.is_empty() {
            return Err(EpaFailure::EmptySimplex);
        }

        loop {
            let seed = complete_seed(pos12, g1, g2, points.clone());
            let faces: &[[usize; 3]] = match seed.len() {
                4 => &TETRAHEDRON[..],
                5 => &BIPYRAMID[..],
                _ => return Err(EpaFailure::DegenerateSeed),
            };

            let mut polytope = Polytope {
                vertices: seed,
                store: TrianglesStore::new(options.max_triangles),
                heap: TriangleHeap::new(),
            };

            match polytope.add_seed_faces(faces) {
                Ok(()) => return Ok(polytope),
                Err(EpaFailure::DegenerateSeed) if points.len() > 1 => {
                    log::debug!(
                        "EPA: degenerate seed from {} simplex points, retrying with less.",
                        points.len()
                    );
                    points = match points.len() {
                        4 => largest_triangle(&points).to_vec(),
                        3 => farthest_pair(&points).to_vec(),
                        _ => points[..1].to_vec(),
                    };
                }
                Err(failure) => return Err(failure),
            }
        }
    }

    fn add_seed_faces(&mut self, faces: &[[usize; 3]]) -> Result<(), EpaFailure> {
        let pts: Vec<Point<Real>> = self.vertices.iter().map(|v| v.point).collect();
        let centroid = utils::center(&pts);
        let scale = pts
            .iter()
            .map(|p| (p - centroid).norm())
            .fold(1.0, Real::max);
        let tol = gjk::eps_tol() * scale;

        for &[a, mut b, mut c] in faces {
            let Some(mut n) = utils::ccw_face_normal([&pts[a], &pts[b], &pts[c]]) else {
                return Err(EpaFailure::DegenerateSeed);
            };

            if n.dot(&(pts[a] - centroid)) < 0.0 {
                core::mem::swap(&mut b, &mut c);
                n = -n;
            }

            if pts.iter().any(|p| n.dot(&(p - pts[a])) > tol) {
                // Not convex.
                return Err(EpaFailure::DegenerateSeed);
            }

            if n.dot(&pts[a].coords) < -tol {
                return Err(EpaFailure::NonEnclosingSeed);
            }

            let id = self
                .store
                .new_triangle(a, b, c)
                .ok_or(EpaFailure::CapacityExhausted)?;
            let _ = self.store[id].compute_closest_point(&self.vertices);
        }

        for i in 0..self.store.len() {
            for j in i + 1..self.store.len() {
                for ki in 0..3 {
                    if self.store[i].adjacent_edge(ki).is_some() {
                        continue;
                    }

                    for kj in 0..3 {
                        if self.store[j].adjacent_edge(kj).is_none()
                            && link(&mut self.store, EdgeEPA::new(i, ki), EdgeEPA::new(j, kj))
                        {
                            break;
                        }
                    }
                }
            }
        }

        if !self.store.is_manifold() {
            return Err(EpaFailure::DegenerateSeed);
        }

        for i in 0..self.store.len() {
            let tri = &self.store[i];

            if tri.is_closest_point_internal_to_triangle() {
                self.heap.push(i, tri.dist_square());
            }
        }

        if self.heap.is_empty() {
            return Err(EpaFailure::NoCandidateFace);
        }

        Ok(())
    }

    /// Pops the closest face that is still part of the polytope.
    pub fn pop_candidate(&mut self) -> Option<usize> {
        self.heap.pop_live(&self.store)
    }

    /// The direction EPA searches along to expand the face `triangle`.
    ///
    /// This is the direction of its closest point, or its outward normal if its plane contains
    /// the origin.
    pub fn search_direction(&self, triangle: usize) -> Option<Unit<Vector<Real>>> {
        let tri = &self.store[triangle];
        let eps_tol = gjk::eps_tol();

        if tri.dist_square() > eps_tol * eps_tol {
            Unit::try_new(tri.closest_point(), 0.0).filter(|n| n.iter().all(|e| e.is_finite()))
        } else {
            tri.outward_normal(&self.vertices)
        }
    }

    /// Replaces the faces visible from `support` by faces joining it to the silhouette of the
    /// face `accepted`.
    ///
    /// The new faces projecting the origin inside of themselves, and with a squared distance
    /// between the one of `accepted` and `upper_bound`, become candidates. Returns the number of
    /// new candidates, or `None` if the silhouette could not be closed.
    pub fn expand(
        &mut self,
        accepted: usize,
        support: CSOPoint,
        upper_bound: Real,
    ) -> Option<usize> {
        let lower_bound = self.store[accepted].dist_square();
        let index_w = self.vertices.len();
        let first_new = self.store.len();
        self.vertices.push(support);

        if !compute_silhouette(&mut self.store, accepted, &self.vertices, index_w) {
            return None;
        }

        let mut num_candidates = 0;

        for i in first_new..self.store.len() {
            let tri = &self.store[i];
            let dist_square = tri.dist_square();

            if tri.is_closest_point_internal_to_triangle()
                && dist_square >= lower_bound
                && dist_square <= upper_bound
            {
                self.heap.push(i, dist_square);
                num_candidates += 1;
            }
        }

        Some(num_candidates)
    }
}

/// Completes the non-empty set of CSO points `points` into the vertices of a tetrahedron or of
/// a triangular bipyramid, using support points of the CSO.
fn complete_seed<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    mut points: Vec<CSOPoint>,
) -> Vec<CSOPoint>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let support = |dir: &Vector<Real>| {
        let dir = Unit::new_normalize(*dir);
        CSOPoint::from_shapes_toward(pos12, g1, g2, &dir)
    };

    if points.len() == 4 && is_flat_tetrahedron(&points) {
        log::debug!("EPA: flat initial tetrahedron, falling back to its largest face.");
        points = largest_triangle(&points).to_vec();
    }

    if points.len() == 3 {
        let normal =
            utils::ccw_face_normal([&points[0].point, &points[1].point, &points[2].point]);

        match normal {
            Some(n) => {
                let apex1 = support(&n.into_inner());
                let apex2 = support(&-n.into_inner());
                points = [apex1, apex2, points[0], points[1], points[2]].to_vec();
            }
            None => {
                points = farthest_pair(&points).to_vec();
            }
        }
    }

    if points.len() == 2 {
        match Unit::try_new(points[1] - points[0], gjk::eps_tol()) {
            Some(axis) => {
                let [u, v] = axis.into_inner().orthonormal_basis();
                let (sin, cos) = (Real::sqrt(3.0) / 2.0, -0.5);
                let ring = [u, u * cos + v * sin, u * cos - v * sin].map(|dir| support(&dir));
                points.extend(ring);
            }
            None => points.truncate(1),
        }
    }

    if points.len() == 1 {
        points = [
            Vector::new(1.0, 1.0, 1.0),
            Vector::new(1.0, -1.0, -1.0),
            Vector::new(-1.0, 1.0, -1.0),
            Vector::new(-1.0, -1.0, 1.0),
        ]
        .iter()
        .map(support)
        .collect();
    }

    points
}

fn is_flat_tetrahedron(pts: &[CSOPoint]) -> bool {
    let ab = pts[1] - pts[0];
    let ac = pts[2] - pts[0];
    let ad = pts[3] - pts[0];
    let scale = ab.norm().max(ac.norm()).max(ad.norm());
    let volume = ab.cross(&ac).dot(&ad);

    volume.abs() <= gjk::eps_tol() * scale * scale * scale
}

fn largest_triangle(pts: &[CSOPoint]) -> [CSOPoint; 3] {
    let candidates = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    let area = |ids: &[usize; 3]| {
        (pts[ids[1]] - pts[ids[0]])
            .cross(&(pts[ids[2]] - pts[ids[0]]))
            .norm_squared()
    };
    let best = candidates
        .iter()
        .max_by(|a, b| area(a).total_cmp(&area(b)))
        .unwrap_or(&candidates[0]);

    best.map(|i| pts[i])
}

fn farthest_pair(pts: &[CSOPoint]) -> [CSOPoint; 2] {
    let candidates = [[0, 1], [0, 2], [1, 2]];
    let best = candidates
        .iter()
        .max_by(|a, b| {
            let la = (pts[a[1]] - pts[a[0]]).norm_squared();
            let lb = (pts[b[1]] - pts[b[0]]).norm_squared();
            la.total_cmp(&lb)
        })
        .unwrap_or(&candidates[0]);

    best.map(|i| pts[i])
}
