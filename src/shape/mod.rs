//! Shapes usable by the GJK and EPA queries.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::convex_point_cloud::ConvexPointCloud;
pub use self::cuboid::Cuboid;
#[doc(inline)]
pub use self::support_map::SupportMap;
pub use self::tetrahedron::Tetrahedron;

mod ball;
mod capsule;
mod convex_point_cloud;
mod cuboid;
mod support_map;
mod tetrahedron;
