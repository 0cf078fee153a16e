use crate::math::{Isometry, Matrix, Point, Real, Rotation, Translation};

/// Builds a rigid transform from a position and an orientation given as a 3x3 rotation matrix.
///
/// The matrix is converted to the unit quaternion closest to it, so a matrix that drifted
/// slightly away from orthonormality is accepted.
pub fn transform_from_matrix(position: &Point<Real>, orientation: &Matrix<Real>) -> Isometry<Real> {
    let rotation = Rotation::from_matrix(orientation);
    Isometry::from_parts(Translation::from(position.coords), rotation)
}
