use crate::math::{Real, DEFAULT_EPSILON};
use crate::query::epa::DEFAULT_MAX_TRIANGLES;

/// The number of triangles of the largest EPA seed polytope.
pub const MIN_TRIANGLES: usize = 6;

/// Tuning parameters of the Expanding Polytope Algorithm.
///
/// EPA stops as soon as one of the two tolerances is met, so the relative tolerance governs deep
/// penetrations and the absolute one shallow contacts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct EpaOptions {
    /// Tolerance on the squared penetration depth, relative to that depth.
    ///
    /// EPA converges when `d² - v² <= relative_tolerance * v²` where `v` is the distance of the
    /// closest face and `d` the support distance along its normal.
    pub relative_tolerance: Real,
    /// Absolute tolerance on the penetration depth.
    ///
    /// EPA converges when `d - v <= absolute_tolerance`. Depths below it are reported as a
    /// touching contact.
    pub absolute_tolerance: Real,
    /// The maximum number of expansion steps.
    pub max_iterations: usize,
    /// The maximum number of triangles, obsolete ones included, of the polytope.
    pub max_triangles: usize,
}

impl Default for EpaOptions {
    fn default() -> Self {
        EpaOptions {
            relative_tolerance: 1.0e-4,
            absolute_tolerance: DEFAULT_EPSILON * 100.0,
            max_iterations: 200,
            max_triangles: DEFAULT_MAX_TRIANGLES,
        }
    }
}

impl EpaOptions {
    /// Sets the relative tolerance.
    pub fn with_relative_tolerance(mut self, relative_tolerance: Real) -> Self {
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Sets the absolute tolerance.
    pub fn with_absolute_tolerance(mut self, absolute_tolerance: Real) -> Self {
        self.absolute_tolerance = absolute_tolerance;
        self
    }

    /// Sets the maximum number of expansion steps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the maximum number of triangles of the polytope.
    pub fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Checks that these options can drive an EPA run.
    pub fn validate(&self) -> Result<(), InvalidEpaOptions> {
        if !self.relative_tolerance.is_finite() || self.relative_tolerance <= 0.0 {
            return Err(InvalidEpaOptions::RelativeTolerance(self.relative_tolerance));
        }

        if !self.absolute_tolerance.is_finite() || self.absolute_tolerance <= 0.0 {
            return Err(InvalidEpaOptions::AbsoluteTolerance(self.absolute_tolerance));
        }

        if self.max_iterations == 0 {
            return Err(InvalidEpaOptions::NoIteration);
        }

        if self.max_triangles < MIN_TRIANGLES {
            return Err(InvalidEpaOptions::TooFewTriangles(self.max_triangles));
        }

        Ok(())
    }
}

/// Errors raised by [`EpaOptions::validate`].
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum InvalidEpaOptions {
    /// The relative tolerance is not a positive number.
    #[error("the relative tolerance must be finite and positive, got {0}")]
    RelativeTolerance(Real),
    /// The absolute tolerance is not a positive number.
    #[error("the absolute tolerance must be finite and positive, got {0}")]
    AbsoluteTolerance(Real),
    /// The iteration cap is zero.
    #[error("at least one EPA iteration must be allowed")]
    NoIteration,
    /// The triangle capacity cannot hold a seed polytope.
    #[error("the polytope needs room for at least 6 triangles, got {0}")]
    TooFewTriangles(usize),
}
