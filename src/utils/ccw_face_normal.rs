use crate::math::{Point, Real, UnitVector, DEFAULT_EPSILON};

/// Computes the unit normal of the triangle `pts`, oriented by its counter-clockwise winding.
///
/// Returns `None` if the three points are (nearly) collinear.
#[inline]
pub fn ccw_face_normal(pts: [&Point<Real>; 3]) -> Option<UnitVector<Real>> {
    let ab = *pts[1] - *pts[0];
    let ac = *pts[2] - *pts[0];
    let res = ab.cross(&ac);

    UnitVector::try_new(res, DEFAULT_EPSILON)
}
