use epa3d::math::{Isometry, Point, Real, Vector};
use epa3d::query::{self, EpaOptions, PenetrationResult, Termination};
use epa3d::shape::{Ball, Capsule, ConvexPointCloud, Cuboid, SupportMap};
use oorandom::Rand32;

fn rand_real(rng: &mut Rand32, min: Real, max: Real) -> Real {
    min + (max - min) * rng.rand_float() as Real
}

fn rand_vector(rng: &mut Rand32, min: Real, max: Real) -> Vector<Real> {
    Vector::new(
        rand_real(rng, min, max),
        rand_real(rng, min, max),
        rand_real(rng, min, max),
    )
}

fn rand_pose(rng: &mut Rand32) -> Isometry<Real> {
    Isometry::new(rand_vector(rng, -0.8, 0.8), rand_vector(rng, -3.0, 3.0))
}

fn rand_shape(rng: &mut Rand32) -> Box<dyn SupportMap> {
    match rng.rand_range(0..4) {
        0 => Box::new(Ball::new(rand_real(rng, 0.2, 1.0))),
        1 => Box::new(Cuboid::new(rand_vector(rng, 0.1, 1.0))),
        2 => Box::new(Capsule::new_z(
            rand_real(rng, 0.1, 1.0),
            rand_real(rng, 0.1, 0.5),
        )),
        _ => {
            let pts: Vec<Point<Real>> = (0..8)
                .map(|_| Point::from(rand_vector(rng, -1.0, 1.0)))
                .collect();
            Box::new(ConvexPointCloud::new(pts).unwrap())
        }
    }
}

#[test]
fn random_penetrations_are_consistent() {
    let mut rng = Rand32::new(42);
    let options = EpaOptions::default();
    let mut num_penetrations = 0;

    for _ in 0..200 {
        let g1 = rand_shape(&mut rng);
        let g2 = rand_shape(&mut rng);
        let pos1 = rand_pose(&mut rng);
        let pos2 = rand_pose(&mut rng);

        let res12 = query::penetration(&pos1, &*g1, &pos2, &*g2, &options).unwrap();
        let Some(res12) = res12 else {
            continue;
        };

        let PenetrationResult::Penetrating(pen12) = res12 else {
            continue;
        };

        num_penetrations += 1;

        // The normal is a unit vector and the witnesses realize the penetration.
        assert!(pen12.depth >= 0.0);
        assert_relative_eq!(pen12.normal.norm(), 1.0, epsilon = 1.0e-4);
        assert_relative_eq!(
            pen12.witness1 - pen12.witness2,
            *pen12.normal * pen12.depth,
            epsilon = 1.0e-3
        );
        assert!(pen12.iterations <= options.max_iterations);

        // Swapping the shapes gives the same depth.
        let res21 = query::penetration(&pos2, &*g2, &pos1, &*g1, &options).unwrap();

        if let Some(PenetrationResult::Penetrating(pen21)) = res21 {
            if pen12.termination == Termination::Converged
                && pen21.termination == Termination::Converged
            {
                let tolerance = 1.0e-2 * pen12.depth.max(1.0);
                assert_relative_eq!(pen12.depth, pen21.depth, epsilon = tolerance);
            }
        }
    }

    assert!(num_penetrations > 0);
}

#[test]
fn ball_ball_depth_matches_the_analytic_one() {
    let mut rng = Rand32::new(7);
    let options = EpaOptions::default()
        .with_max_iterations(1000)
        .with_max_triangles(2000);

    for _ in 0..50 {
        let r1 = rand_real(&mut rng, 0.3, 1.0);
        let r2 = rand_real(&mut rng, 0.3, 1.0);
        let dir = rand_vector(&mut rng, -1.0, 1.0);
        let Some(dir) = na::Unit::try_new(dir, 1.0e-3) else {
            continue;
        };
        let dist = rand_real(&mut rng, 0.2, 0.9) * (r1 + r2);

        let pos1 = rand_pose(&mut rng);
        let pos2 = Isometry::from_parts(
            (pos1.translation.vector + *dir * dist).into(),
            pos1.rotation,
        );

        let res = query::penetration(
            &pos1,
            &Ball::new(r1),
            &pos2,
            &Ball::new(r2),
            &options,
        )
        .unwrap()
        .expect("The balls intersect.");

        match res {
            PenetrationResult::Penetrating(pen) => {
                assert_relative_eq!(pen.depth, r1 + r2 - dist, epsilon = 1.0e-2);
                assert!(pen.normal.dot(&dir) > 0.99);
            }
            res => panic!("Unexpected result: {:?}", res),
        }
    }
}
