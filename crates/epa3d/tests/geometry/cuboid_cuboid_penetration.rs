use epa3d::math::Real;
use epa3d::query::{self, EpaOptions, PenetrationResult, Termination};
use epa3d::shape::Cuboid;
use na::{Isometry3, UnitQuaternion, Vector3};

#[test]
fn cuboid_cuboid_epa() {
    let c = Cuboid::new(Vector3::new(2.0, 1.0, 1.0));
    let options = EpaOptions::default();
    let m1 = Isometry3::translation(3.5, 0.0, 0.0);
    let m2 = Isometry3::identity();

    let res = query::penetration(&m1, &c, &m2, &c, &options)
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().unwrap();
    assert_relative_eq!(pen.depth, 0.5, epsilon = 1.0e-4);
    assert_relative_eq!(pen.normal, -Vector3::x_axis(), epsilon = 1.0e-4);

    let m1 = Isometry3::translation(0.0, 0.2, 0.0);
    let res = query::penetration(&m1, &c, &m2, &c, &options)
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().unwrap();
    assert_relative_eq!(pen.depth, 1.8, epsilon = 1.0e-4);
    assert_relative_eq!(pen.normal, -Vector3::y_axis(), epsilon = 1.0e-4);
}

#[test]
fn unit_cubes_along_x() {
    let cube = Cuboid::new(Vector3::repeat(0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(0.8, 0.0, 0.0);

    let res = query::penetration(&pos1, &cube, &pos2, &cube, &EpaOptions::default())
        .unwrap()
        .expect("Penetration not found.");

    match res {
        PenetrationResult::Penetrating(pen) => {
            assert_relative_eq!(pen.depth, 0.2, epsilon = 1.0e-4);
            assert!(pen.normal.x > 0.9999);
            assert_relative_eq!(pen.witness1.x, 0.5, epsilon = 1.0e-4);
            assert_relative_eq!(pen.witness2.x, 0.3, epsilon = 1.0e-4);
            assert_eq!(pen.termination, Termination::Converged);
            assert!(pen.iterations > 0);
        }
        res => panic!("Unexpected result: {:?}", res),
    }
}

#[test]
fn cube_against_rotated_cube() {
    let cube = Cuboid::new(Vector3::repeat(0.5));
    let half_diagonal = (0.5 as Real) * (2.0 as Real).sqrt();
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::from_parts(
        Vector3::new(0.5 + half_diagonal - 0.1, 0.0, 0.0).into(),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_4 as Real),
    );

    let res = query::penetration(&pos1, &cube, &pos2, &cube, &EpaOptions::default())
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().unwrap();

    assert_relative_eq!(pen.depth, 0.1, epsilon = 1.0e-3);
    assert!(pen.normal.x > 0.99);
}
