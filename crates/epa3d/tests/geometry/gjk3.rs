use epa3d::math::Point;
use epa3d::query::gjk::{self, CSOPoint, GJKResult, Simplex};
use epa3d::shape::{Ball, Capsule, ConvexPointCloud, Cuboid};
use na::{Isometry3, Vector3};

#[test]
fn capsule_ball_intersection() {
    let capsule = Capsule::new_y(1.0, 0.25);
    let ball = Ball::new(0.5);
    let mut simplex = Simplex::new();

    let pos12 = Isometry3::translation(0.7, 0.9, 0.0);
    assert_eq!(
        gjk::intersection(&pos12, &capsule, &ball, &mut simplex),
        GJKResult::Intersection
    );

    let pos12 = Isometry3::translation(0.8, 0.9, 0.0);
    let mut simplex = Simplex::new();
    match gjk::intersection(&pos12, &capsule, &ball, &mut simplex) {
        GJKResult::NoIntersection(axis) => assert!(axis.x > 0.0),
        GJKResult::Intersection => panic!("The shapes are disjoint."),
    }
}

#[test]
fn point_cloud_cuboid_intersection() {
    let cloud = ConvexPointCloud::new(vec![
        Point::new(0.0, 0.0, 1.0),
        Point::new(1.0, 0.0, -1.0),
        Point::new(-1.0, 1.0, -1.0),
        Point::new(-1.0, -1.0, -1.0),
    ])
    .unwrap();
    let cuboid = Cuboid::new(Vector3::repeat(0.25));

    for (x, intersecting) in [(0.0, true), (0.5, true), (3.0, false)] {
        let pos12 = Isometry3::translation(x, 0.0, 0.0);
        let mut simplex = Simplex::new();
        let res = gjk::intersection(&pos12, &cloud, &cuboid, &mut simplex);
        assert_eq!(res == GJKResult::Intersection, intersecting);
    }
}

#[test]
fn gjk_resumes_from_a_given_simplex() {
    let cuboid = Cuboid::new(Vector3::repeat(0.5));
    let pos12 = Isometry3::translation(0.9, 0.0, 0.0);
    let mut simplex = Simplex::new();
    simplex.reset(CSOPoint::from_shapes(&pos12, &cuboid, &cuboid, &Vector3::y()));

    assert_eq!(
        gjk::intersection(&pos12, &cuboid, &cuboid, &mut simplex),
        GJKResult::Intersection
    );
    assert!(!simplex.is_empty() && simplex.len() <= 4);
}
