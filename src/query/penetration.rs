use crate::math::{Isometry, Real, Vector};
use crate::query::epa::{PenetrationResult, EPA};
use crate::query::gjk::{self, CSOPoint, GJKResult, Simplex};
use crate::query::{EpaOptions, InvalidEpaOptions};
use crate::shape::SupportMap;
use na::Unit;

/// Computes the penetration of two convex shapes positioned in world-space.
///
/// Runs GJK to decide whether the shapes overlap, then EPA to measure their penetration.
/// Returns `Ok(None)` if the shapes are disjoint, and an error if `options` are invalid.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use epa3d::math::Isometry;
/// use epa3d::query::{self, EpaOptions, PenetrationResult};
/// use epa3d::shape::Ball;
///
/// let ball = Ball::new(1.0);
/// let pos1 = Isometry::identity();
/// let pos2 = Isometry::translation(1.5, 0.0, 0.0);
///
/// let res = query::penetration(&pos1, &ball, &pos2, &ball, &EpaOptions::default()).unwrap();
///
/// if let Some(PenetrationResult::Penetrating(pen)) = res {
///     assert!((pen.depth - 0.5).abs() < 1.0e-3);
///     assert!(pen.normal.x > 0.99);
/// }
/// # }
/// ```
pub fn penetration<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &EpaOptions,
) -> Result<Option<PenetrationResult>, InvalidEpaOptions>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    options.validate()?;

    let pos12 = pos1.inv_mul(pos2);
    let dir = Unit::try_new(pos12.translation.vector, crate::math::DEFAULT_EPSILON)
        .unwrap_or_else(Vector::x_axis);
    let mut simplex = Simplex::new();
    simplex.reset(CSOPoint::from_shapes_toward(&pos12, g1, g2, &dir));

    match gjk::intersection(&pos12, g1, g2, &mut simplex) {
        GJKResult::NoIntersection(_) => Ok(None),
        GJKResult::Intersection => {
            let res = EPA::new(*options).local_penetration(&pos12, g1, g2, &simplex);
            Ok(Some(res.transform_by(pos1)))
        }
    }
}
