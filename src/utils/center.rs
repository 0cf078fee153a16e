use crate::math::{Point, Real, Vector};

/// Computes the centroid of a set of points.
///
/// Returns the origin if `pts` is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    if pts.is_empty() {
        return Point::origin();
    }

    let sum = pts
        .iter()
        .fold(Vector::zeros(), |acc: Vector<Real>, pt| acc + pt.coords);
    Point::from(sum / pts.len() as Real)
}
