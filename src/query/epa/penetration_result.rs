use crate::math::{Isometry, Point, Real, Vector};
use core::mem;
use na::Unit;

/// Why an EPA run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Termination {
    /// The closest face is within the requested tolerances of the CSO boundary.
    Converged,
    /// No face was left to expand, or the last expansion produced no closer candidate.
    NoProgress,
    /// The triangle capacity of the polytope was reached.
    CapacityExhausted,
    /// The maximum number of iterations was reached.
    IterationLimit,
    /// The polytope could not be expanded because of rounding errors.
    NumericalBreakdown,
}

/// The reasons why EPA could not measure a penetration.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum EpaFailure {
    /// The simplex given to EPA has no point.
    #[error("the simplex is empty")]
    EmptySimplex,
    /// The seed polytope is flat or its faces cannot be stitched together.
    #[error("the seed polytope is degenerate")]
    DegenerateSeed,
    /// The seed polytope does not contain the origin.
    #[error("the seed polytope does not enclose the origin")]
    NonEnclosingSeed,
    /// The origin does not project inside of any face of the seed polytope.
    #[error("no face of the seed polytope can be expanded")]
    NoCandidateFace,
    /// The seed polytope does not fit in the triangle capacity.
    #[error("the seed polytope exceeds the triangle capacity")]
    CapacityExhausted,
}

/// The penetration of two shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Penetration {
    /// The penetration depth, i.e., the length of the minimum translation vector.
    pub depth: Real,
    /// The contact normal, pointing from the first shape toward the second.
    ///
    /// Translating the second shape by `depth * normal` brings both shapes in touching contact.
    pub normal: Unit<Vector<Real>>,
    /// The deepest point of the first shape inside of the second one.
    pub witness1: Point<Real>,
    /// The deepest point of the second shape inside of the first one.
    ///
    /// `witness1 - witness2` is equal to `depth * normal`.
    pub witness2: Point<Real>,
    /// Why the computation stopped.
    pub termination: Termination,
    /// The number of expansion steps performed.
    pub iterations: usize,
}

impl Penetration {
    /// Swaps the roles of both shapes.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.witness1, &mut self.witness2);
        self.normal = -self.normal;
    }

    /// Returns this penetration with the roles of both shapes swapped.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Transforms the witness points and the normal of this penetration by `pos`.
    pub fn transform_by(mut self, pos: &Isometry<Real>) -> Self {
        self.normal = pos * self.normal;
        self.witness1 = pos * self.witness1;
        self.witness2 = pos * self.witness2;
        self
    }
}

/// The outcome of an EPA penetration query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum PenetrationResult {
    /// The shapes overlap.
    Penetrating(Penetration),
    /// The shapes touch without measurable penetration.
    Touching {
        /// The contact normal, pointing from the first shape toward the second.
        normal: Unit<Vector<Real>>,
    },
    /// The penetration could not be computed.
    Degenerate(EpaFailure),
}

impl PenetrationResult {
    /// The penetration, if the shapes overlap.
    pub fn penetration(&self) -> Option<&Penetration> {
        match self {
            PenetrationResult::Penetrating(pen) => Some(pen),
            _ => None,
        }
    }

    /// The contact normal, unless EPA failed.
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        match self {
            PenetrationResult::Penetrating(pen) => Some(pen.normal),
            PenetrationResult::Touching { normal } => Some(*normal),
            PenetrationResult::Degenerate(_) => None,
        }
    }

    /// The penetration depth, zero for touching shapes, unless EPA failed.
    pub fn depth(&self) -> Option<Real> {
        match self {
            PenetrationResult::Penetrating(pen) => Some(pen.depth),
            PenetrationResult::Touching { .. } => Some(0.0),
            PenetrationResult::Degenerate(_) => None,
        }
    }

    /// Returns this result with the roles of both shapes swapped.
    pub fn flipped(self) -> Self {
        match self {
            PenetrationResult::Penetrating(pen) => PenetrationResult::Penetrating(pen.flipped()),
            PenetrationResult::Touching { normal } => PenetrationResult::Touching { normal: -normal },
            degenerate => degenerate,
        }
    }

    /// Transforms the geometric data of this result by `pos`.
    pub fn transform_by(self, pos: &Isometry<Real>) -> Self {
        match self {
            PenetrationResult::Penetrating(pen) => {
                PenetrationResult::Penetrating(pen.transform_by(pos))
            }
            PenetrationResult::Touching { normal } => PenetrationResult::Touching {
                normal: pos * normal,
            },
            degenerate => degenerate,
        }
    }
}
