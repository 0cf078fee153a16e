use crate::math::{Point, Real, Vector};
use crate::query::gjk::CSOPoint;
use arrayvec::ArrayVec;

/// Local indices of the simplex vertices spanning the feature closest to the origin.
type Feature = ArrayVec<usize, 4>;

/// A simplex of at most four CSO points, used by GJK and seeding EPA.
///
/// Points are kept in insertion order: the most recently added point is the last one.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    points: ArrayVec<CSOPoint, 4>,
}

impl Simplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simplex from the first four points of `pts`.
    pub fn from_points(pts: &[CSOPoint]) -> Self {
        Simplex {
            points: pts.iter().take(4).copied().collect(),
        }
    }

    /// Removes every point of this simplex and replaces them by `pt`.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.points.clear();
        self.points.push(pt);
    }

    /// Appends a point to this simplex.
    ///
    /// Returns `false` and leaves the simplex unchanged if it already has four points.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        self.points.try_push(pt).is_ok()
    }

    /// The number of points of this simplex.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this simplex empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points of this simplex, oldest first.
    pub fn points(&self) -> &[CSOPoint] {
        &self.points
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        &self.points[i]
    }

    /// Checks if `pt` is (exactly) one of the vertices of this simplex.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.points.iter().any(|p| p.point == *pt)
    }

    /// Projects the origin on this simplex and drops every vertex that does not belong to the
    /// feature containing the projection.
    ///
    /// Returns the projection, or `None` if the simplex is empty. When the origin lies inside of
    /// a full tetrahedron, the projection is zero and all four points are kept.
    pub fn project_origin_and_reduce(&mut self) -> Option<Vector<Real>> {
        let pts: ArrayVec<Point<Real>, 4> = self.points.iter().map(|p| p.point).collect();

        let (proj, feature) = match pts.as_slice() {
            [] => return None,
            [a] => (a.coords, Feature::from_iter([0])),
            [a, b] => project_origin_on_segment(a, b),
            [a, b, c] => project_origin_on_triangle([a, b, c]),
            [a, b, c, d] => project_origin_on_tetrahedron([a, b, c, d]),
            _ => unreachable!(),
        };

        if feature.len() < self.points.len() {
            self.points = feature.iter().map(|i| self.points[*i]).collect();
        }

        Some(proj)
    }
}

fn project_origin_on_segment(a: &Point<Real>, b: &Point<Real>) -> (Vector<Real>, Feature) {
    let ab = b - a;
    let t = -a.coords.dot(&ab);

    if t <= 0.0 {
        return (a.coords, Feature::from_iter([0]));
    }

    let sq_len = ab.norm_squared();

    if t >= sq_len {
        (b.coords, Feature::from_iter([1]))
    } else {
        (a.coords + ab * (t / sq_len), Feature::from_iter([0, 1]))
    }
}

fn project_origin_on_edge(pts: [&Point<Real>; 3], i: usize, j: usize) -> (Vector<Real>, Feature) {
    let (proj, local) = project_origin_on_segment(pts[i], pts[j]);
    let ids = [i, j];
    (proj, local.iter().map(|k| ids[*k]).collect())
}

// Voronoi regions of the triangle, tested as in "Real-Time Collision Detection" (Ericson).
fn project_origin_on_triangle(pts: [&Point<Real>; 3]) -> (Vector<Real>, Feature) {
    let [a, b, c] = pts;
    let ab = b - a;
    let ac = c - a;

    let d1 = -ab.dot(&a.coords);
    let d2 = -ac.dot(&a.coords);
    if d1 <= 0.0 && d2 <= 0.0 {
        return (a.coords, Feature::from_iter([0]));
    }

    let d3 = -ab.dot(&b.coords);
    let d4 = -ac.dot(&b.coords);
    if d3 >= 0.0 && d4 <= d3 {
        return (b.coords, Feature::from_iter([1]));
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return project_origin_on_edge(pts, 0, 1);
    }

    let d5 = -ab.dot(&c.coords);
    let d6 = -ac.dot(&c.coords);
    if d6 >= 0.0 && d5 <= d6 {
        return (c.coords, Feature::from_iter([2]));
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return project_origin_on_edge(pts, 0, 2);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && d4 - d3 >= 0.0 && d5 - d6 >= 0.0 {
        return project_origin_on_edge(pts, 1, 2);
    }

    let denom = va + vb + vc;

    if denom <= 0.0 {
        // Flat triangle: keep the best edge.
        return [(0, 1), (0, 2), (1, 2)]
            .into_iter()
            .map(|(i, j)| project_origin_on_edge(pts, i, j))
            .min_by(|x, y| x.0.norm_squared().total_cmp(&y.0.norm_squared()))
            .unwrap_or_else(|| (a.coords, Feature::from_iter([0])));
    }

    let v = vb / denom;
    let w = vc / denom;
    (a.coords + ab * v + ac * w, Feature::from_iter([0, 1, 2]))
}

fn project_origin_on_tetrahedron(pts: [&Point<Real>; 4]) -> (Vector<Real>, Feature) {
    const FACES: [([usize; 3], usize); 4] = [
        ([0, 1, 2], 3),
        ([0, 1, 3], 2),
        ([0, 2, 3], 1),
        ([1, 2, 3], 0),
    ];

    let scale = pts[1..]
        .iter()
        .map(|p| (*p - pts[0]).norm())
        .fold(0.0, Real::max);
    let volume = (pts[1] - pts[0])
        .cross(&(pts[2] - pts[0]))
        .dot(&(pts[3] - pts[0]));
    let flat = volume.abs() <= crate::math::DEFAULT_EPSILON * scale * scale * scale;

    let mut best: Option<(Vector<Real>, Feature)> = None;

    for (face, opposite) in FACES {
        let [a, b, c] = face.map(|i| pts[i]);
        let n = (b - a).cross(&(c - a));
        let origin_side = -a.coords.dot(&n);
        let opposite_side = (pts[opposite] - a).dot(&n);

        // A flat tetrahedron has no reliable inside, so every face is a candidate.
        if flat || origin_side * opposite_side < 0.0 {
            let (proj, local) = project_origin_on_triangle([a, b, c]);
            let better = best
                .as_ref()
                .map(|(best_proj, _)| proj.norm_squared() < best_proj.norm_squared())
                .unwrap_or(true);

            if better {
                best = Some((proj, local.iter().map(|k| face[*k]).collect()));
            }
        }
    }

    best.unwrap_or_else(|| (Vector::zeros(), Feature::from_iter([0, 1, 2, 3])))
}
