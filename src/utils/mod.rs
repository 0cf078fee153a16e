//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::center::center;
pub use self::point_cloud_support_point::{
    point_cloud_support_point, point_cloud_support_point_id,
};
pub use self::transform::transform_from_matrix;
pub use self::wops::{WBasis, WSign};

mod ccw_face_normal;
mod center;
mod point_cloud_support_point;
mod transform;
mod wops;
