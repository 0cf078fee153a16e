use alloc::vec::Vec;

use crate::math::{Point, Real, Vector};
use crate::shape::SupportMap;
use crate::utils;

/// The convex hull of a set of points, described only through its support function.
///
/// No hull is ever computed: interior points are allowed and are simply never returned
/// by the support function.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPointCloud {
    points: Vec<Point<Real>>,
}

impl ConvexPointCloud {
    /// Creates the implicit convex hull of `points`.
    ///
    /// Returns `None` if `points` is empty.
    pub fn new(points: Vec<Point<Real>>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(ConvexPointCloud { points })
        }
    }

    /// The points this convex hull is built from.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }
}

impl SupportMap for ConvexPointCloud {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, &self.points)
    }
}
