//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use crate::math::{Isometry, Real, Vector};
use crate::query::epa::{EpaFailure, Penetration, PenetrationResult, Polytope, Termination};
use crate::query::gjk::{CSOPoint, Simplex};
use crate::query::EpaOptions;
use crate::shape::SupportMap;
use na::Unit;

/// The Expanding Polytope Algorithm in 3D.
///
/// Given a simplex enclosing the origin of the Minkowski difference (CSO) of two overlapping
/// convex shapes, usually the one found by GJK, EPA grows a convex polytope inside of the CSO
/// until its face closest to the origin matches the CSO boundary. That face gives the
/// penetration depth, the contact normal and, through the barycentric coordinates of the
/// projection of the origin, one witness point on each shape.
///
/// Each iteration:
/// 1. pops the face closest to the origin,
/// 2. computes the support point of the CSO along its normal, and stops if that point is not
///    significantly farther than the face,
/// 3. removes every face visible from the support point, and fills the hole with faces
///    joining the support point to the boundary of the removed region (the silhouette).
///
/// An `EPA` only holds its [`EpaOptions`]: every run allocates its own polytope, so the same
/// instance can be shared between threads.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EPA {
    options: EpaOptions,
}

impl EPA {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    ///
    /// The options are not validated: a capacity too small to hold the seed polytope yields
    /// [`EpaFailure::CapacityExhausted`].
    pub fn new(options: EpaOptions) -> Self {
        EPA { options }
    }

    /// The options of this EPA.
    pub fn options(&self) -> &EpaOptions {
        &self.options
    }

    /// Computes the penetration of two shapes positioned in world-space.
    ///
    /// `simplex` must enclose the origin of the CSO of `g1` and `g2`, expressed in the
    /// local-space of `g1`: this is what [`gjk::intersection`](crate::query::gjk::intersection)
    /// produces when given `pos1.inv_mul(pos2)`. The result is expressed in world-space.
    pub fn penetration<G1, G2>(
        &self,
        pos1: &Isometry<Real>,
        g1: &G1,
        pos2: &Isometry<Real>,
        g2: &G2,
        simplex: &Simplex,
    ) -> PenetrationResult
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let pos12 = pos1.inv_mul(pos2);
        self.local_penetration(&pos12, g1, g2, simplex)
            .transform_by(pos1)
    }

    /// Computes the penetration of `g1` and `g2`, the latter being positioned by `pos12`
    /// relative to the former.
    ///
    /// `simplex` and the result, both witness points included, are expressed in the
    /// local-space of `g1`.
    pub fn local_penetration<G1, G2>(
        &self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &Simplex,
    ) -> PenetrationResult
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut polytope = match Polytope::new(pos12, g1, g2, simplex, &self.options) {
            Ok(polytope) => polytope,
            Err(failure) => {
                log::debug!("EPA: {}.", failure);
                return PenetrationResult::Degenerate(failure);
            }
        };

        let eps_rel = self.options.relative_tolerance;
        let eps_abs = self.options.absolute_tolerance;
        let mut upper_bound = Real::MAX;
        let mut best: Option<(usize, Unit<Vector<Real>>)> = None;
        let mut skipped_last = false;
        let mut niter = 0;

        let termination = loop {
            let Some(face_id) = polytope.pop_candidate() else {
                break if skipped_last {
                    Termination::NumericalBreakdown
                } else {
                    Termination::NoProgress
                };
            };

            let Some(dir) = polytope.search_direction(face_id) else {
                log::debug!("EPA: skipping face {} without a search direction.", face_id);
                skipped_last = true;
                continue;
            };

            skipped_last = false;
            best = Some((face_id, dir));
            niter += 1;

            let face = &polytope.store[face_id];
            let dist_square = face.dist_square();
            let dist = dist_square.sqrt();
            let support = CSOPoint::from_shapes_toward(pos12, g1, g2, &dir);
            let support_dist = support.point.coords.dot(&dir);
            upper_bound = upper_bound.min(support_dist * support_dist);

            log::trace!(
                "EPA iteration {}: face {} at distance {}, support at distance {}.",
                niter,
                face_id,
                dist,
                support_dist
            );

            if support_dist < dist - eps_abs {
                // The polytope left the CSO: rounding errors dominate.
                log::debug!(
                    "EPA: support point at {} behind the face at {}.",
                    support_dist,
                    dist
                );
                break Termination::NumericalBreakdown;
            }

            let support_is_vertex = face
                .vertices()
                .iter()
                .any(|i| polytope.vertices[*i].point == support.point);

            if support_dist * support_dist - dist_square <= eps_rel * dist_square
                || support_dist - dist <= eps_abs
                || support_is_vertex
            {
                break Termination::Converged;
            }

            if niter >= self.options.max_iterations {
                break Termination::IterationLimit;
            }

            if polytope.store.is_full() {
                break Termination::CapacityExhausted;
            }

            match polytope.expand(face_id, support, upper_bound) {
                Some(0) => {
                    log::debug!("EPA: no new face improves on face {}.", face_id);
                    break Termination::NoProgress;
                }
                Some(_) => {}
                None if polytope.store.has_overflowed() => break Termination::CapacityExhausted,
                None => break Termination::NumericalBreakdown,
            }
        };

        let Some((face_id, normal)) = best else {
            log::debug!("EPA: no face of the polytope could be expanded.");
            return PenetrationResult::Degenerate(EpaFailure::NoCandidateFace);
        };

        if termination != Termination::Converged {
            log::debug!(
                "EPA: stopped before convergence ({:?}) after {} iterations.",
                termination,
                niter
            );
        }

        let face = &polytope.store[face_id];
        let depth = face.dist_square().sqrt();

        if depth <= eps_abs {
            return PenetrationResult::Touching { normal };
        }

        let (witness1, witness2) = face.witness_points(&polytope.vertices);

        PenetrationResult::Penetrating(Penetration {
            depth,
            normal,
            witness1,
            witness2,
            termination,
            iterations: niter,
        })
    }
}
