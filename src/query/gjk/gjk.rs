//! The boolean Gilbert-Johnson-Keerthi algorithm.
//!
//! GJK decides whether two convex shapes overlap by searching the Minkowski difference of
//! their support maps (the CSO) for the origin. When they do, the final simplex encloses (or
//! touches) the origin and is the starting point of the EPA penetration query.

use na::Unit;

use crate::math::{Isometry, Real, Vector};
use crate::query::gjk::{CSOPoint, Simplex};
use crate::shape::SupportMap;

/// The maximum number of support queries performed by [`intersection`].
pub const MAX_ITERATIONS: usize = 100;

/// Results of the boolean GJK algorithm.
///
/// Everything is expressed in the local-space of the first shape.
#[derive(Clone, Debug, PartialEq)]
pub enum GJKResult {
    /// The shapes are intersecting or touching.
    ///
    /// The simplex passed to [`intersection`] then contains the origin, up to the GJK
    /// tolerance, and can seed EPA.
    Intersection,
    /// The shapes are disjoint.
    ///
    /// The vector is a separating axis: every point `p` of the CSO satisfies `p · axis < 0`.
    NoIntersection(Unit<Vector<Real>>),
}

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    let _eps = crate::math::DEFAULT_EPSILON;
    _eps * 10.0
}

/// Checks if the CSO of `g1` and `g2` contains the origin.
///
/// `pos12` is the position of `g2` relative to `g1`. If `simplex` is not empty, its points
/// are used as the starting point of the search; otherwise it is initialized with a support
/// point of the CSO. On return, it holds the simplex the decision was made with.
pub fn intersection<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &mut Simplex,
) -> GJKResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let eps_tol = eps_tol();

    if simplex.is_empty() {
        let init_dir =
            Unit::try_new(pos12.translation.vector, eps_tol).unwrap_or_else(Vector::x_axis);
        simplex.reset(CSOPoint::from_shapes_toward(pos12, g1, g2, &init_dir));
    }

    let mut proj = match simplex.project_origin_and_reduce() {
        Some(proj) => proj,
        None => return GJKResult::Intersection,
    };

    for niter in 0..MAX_ITERATIONS {
        let Some(dir) = Unit::try_new(-proj, eps_tol) else {
            log::trace!("GJK: origin reached after {} iterations.", niter);
            return GJKResult::Intersection;
        };

        let support = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);

        if support.point.coords.dot(&dir) < 0.0 {
            return GJKResult::NoIntersection(dir);
        }

        if simplex.contains_point(&support.point) || !simplex.add_point(support) {
            // The support point brings nothing new: the origin lies on the CSO boundary up to
            // rounding errors.
            log::debug!(
                "GJK: stalled at distance {} after {} iterations.",
                proj.norm(),
                niter
            );
            return GJKResult::Intersection;
        }

        proj = match simplex.project_origin_and_reduce() {
            Some(proj) => proj,
            None => return GJKResult::Intersection,
        };
    }

    log::debug!(
        "GJK: reached the iteration limit at distance {}.",
        proj.norm()
    );
    GJKResult::Intersection
}
