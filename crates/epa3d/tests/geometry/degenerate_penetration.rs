use epa3d::math::{Point, Real};
use epa3d::query::{
    self, EpaFailure, EpaOptions, InvalidEpaOptions, PenetrationResult, Termination,
};
use epa3d::shape::{Ball, Cuboid, Tetrahedron};
use na::{Isometry3, Vector3};
use oorandom::Rand32;

/// Penetration depth of two tetrahedra along their best separating axis.
///
/// Negative if the tetrahedra are disjoint.
fn tetrahedra_sat_depth(a: [Point<Real>; 4], b: [Point<Real>; 4]) -> f64 {
    let a = a.map(|p| p.cast::<f64>());
    let b = b.map(|p| p.cast::<f64>());
    let faces = [[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]];
    let edges = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
    let mut axes = Vec::new();

    for pts in [&a, &b] {
        for [i, j, k] in faces {
            let n = (pts[j] - pts[i]).cross(&(pts[k] - pts[i]));
            if let Some(n) = n.try_normalize(1.0e-12) {
                axes.push(n);
            }
        }
    }

    for [i1, j1] in edges {
        for [i2, j2] in edges {
            let e1 = (a[j1] - a[i1]).normalize();
            let e2 = (b[j2] - b[i2]).normalize();
            if let Some(n) = e1.cross(&e2).try_normalize(1.0e-6) {
                axes.push(n);
            }
        }
    }

    axes.iter()
        .map(|axis| {
            let (min1, max1) = a.iter().map(|p| p.coords.dot(axis)).fold(
                (f64::MAX, f64::MIN),
                |(min, max), x| (min.min(x), max.max(x)),
            );
            let (min2, max2) = b.iter().map(|p| p.coords.dot(axis)).fold(
                (f64::MAX, f64::MIN),
                |(min, max), x| (min.min(x), max.max(x)),
            );
            (max1 - min2).min(max2 - min1)
        })
        .fold(f64::MAX, f64::min)
}

fn rand_real(rng: &mut Rand32, min: Real, max: Real) -> Real {
    min + (max - min) * rng.rand_float() as Real
}

#[test]
fn long_thin_tetrahedra_match_separating_axes() {
    let tetra = Tetrahedron::new(
        Point::new(0.0, 0.0, 0.0),
        Point::new(10.0, 0.0, 0.0),
        Point::new(0.0, 0.05, 0.0),
        Point::new(0.0, 0.0, 0.05),
    );
    let pos1 = Isometry3::identity();
    let mut poses = vec![Isometry3::new(
        Vector3::new(4.4463, -0.0230, -0.0159),
        Vector3::new(-0.4965, -0.2613, -0.1695),
    )];

    let mut rng = Rand32::new(1234);
    for _ in 0..300 {
        let translation = Vector3::new(
            rand_real(&mut rng, 0.0, 10.0),
            rand_real(&mut rng, -0.05, 0.05),
            rand_real(&mut rng, -0.05, 0.05),
        );
        let rotation = Vector3::new(
            rand_real(&mut rng, -0.5, 0.5),
            rand_real(&mut rng, -0.5, 0.5),
            rand_real(&mut rng, -0.5, 0.5),
        );
        poses.push(Isometry3::new(translation, rotation));
    }

    let options = EpaOptions::default();
    let tolerance = 1.0e-3;
    let mut num_overlapping = 0;
    let mut num_converged = 0;
    let mut num_unreliable = 0;

    for pos2 in poses {
        let sat = tetrahedra_sat_depth(
            tetra.vertices().map(|p| pos1 * p),
            tetra.vertices().map(|p| pos2 * p),
        );
        let overlapping = sat > tolerance;
        if overlapping {
            num_overlapping += 1;
        }

        let res = query::penetration(&pos1, &tetra, &pos2, &tetra, &options).unwrap();

        match res {
            None | Some(PenetrationResult::Touching { .. }) => {
                assert!(sat <= tolerance, "missed a penetration of {} at {}", sat, pos2)
            }
            Some(PenetrationResult::Penetrating(pen)) => {
                let depth = pen.depth as f64;
                assert!(depth.is_finite() && depth > 0.0);

                match pen.termination {
                    Termination::Converged => {
                        num_converged += 1;
                        assert!(
                            (depth - sat).abs() <= tolerance,
                            "converged to {} instead of {} at {}",
                            depth,
                            sat,
                            pos2
                        );
                    }
                    Termination::NoProgress | Termination::CapacityExhausted => {
                        assert!(
                            depth <= sat + tolerance,
                            "depth {} exceeds {} at {}",
                            depth,
                            sat,
                            pos2
                        );
                    }
                    // The last face may lie outside of the CSO.
                    Termination::NumericalBreakdown if overlapping => num_unreliable += 1,
                    Termination::NumericalBreakdown => {}
                    Termination::IterationLimit => {
                        panic!("iteration limit reached at {}", pos2)
                    }
                }
            }
            Some(PenetrationResult::Degenerate(failure)) => {
                assert!(matches!(
                    failure,
                    EpaFailure::DegenerateSeed | EpaFailure::NonEnclosingSeed
                ));
                if overlapping {
                    num_unreliable += 1;
                }
            }
        }
    }

    assert!(num_overlapping > 0);
    assert!(num_converged > 0);
    assert!(num_unreliable * 2 <= num_overlapping);
}

#[test]
fn ball_touching_thin_box() {
    let ball = Ball::new(1.0);
    let thin_box = Cuboid::new(Vector3::new(0.5, 0.01, 0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(0.0, 1.01, 0.0);

    let options = EpaOptions::default();
    let res = query::penetration(&pos1, &ball, &pos2, &thin_box, &options).unwrap();

    match res {
        None => {}
        Some(PenetrationResult::Touching { normal }) => assert!(normal.y > 0.99),
        Some(PenetrationResult::Penetrating(pen)) => {
            assert!(pen.depth <= 1.0e-3);
            assert_ne!(pen.termination, Termination::IterationLimit);
        }
        // The origin lies on the boundary of the CSO.
        Some(PenetrationResult::Degenerate(EpaFailure::NonEnclosingSeed))
        | Some(PenetrationResult::Degenerate(EpaFailure::DegenerateSeed)) => {}
        Some(PenetrationResult::Degenerate(failure)) => {
            panic!("Unexpected failure: {:?}", failure)
        }
    }
}

#[test]
fn ball_barely_inside_thin_box() {
    let ball = Ball::new(1.0);
    let thin_box = Cuboid::new(Vector3::new(0.5, 0.01, 0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(0.0, 1.01 - 1.0e-4, 0.0);

    let res = query::penetration(&pos1, &ball, &pos2, &thin_box, &EpaOptions::default())
        .unwrap()
        .expect("Penetration not found.");

    match res {
        PenetrationResult::Penetrating(pen) => {
            assert_relative_eq!(pen.depth, 1.0e-4, epsilon = 5.0e-5);
            assert!(pen.normal.y > 0.99);
            assert_ne!(pen.termination, Termination::IterationLimit);
        }
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn ball_slightly_inside_thin_box() {
    let ball = Ball::new(1.0);
    let thin_box = Cuboid::new(Vector3::new(0.5, 0.01, 0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(0.0, 1.0, 0.0);

    let res = query::penetration(&pos1, &ball, &pos2, &thin_box, &EpaOptions::default())
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().expect("The ball penetrates the box.");

    assert_relative_eq!(pen.depth, 0.01, epsilon = 1.0e-3);
    assert!(pen.normal.y > 0.99);
    assert_ne!(pen.termination, Termination::IterationLimit);
}

#[test]
fn tiny_triangle_capacity() {
    let ball = Ball::new(1.0);
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(1.5, 0.0, 0.0);
    let options = EpaOptions::default().with_max_triangles(6);

    let res = query::penetration(&pos1, &ball, &pos2, &ball, &options)
        .unwrap()
        .expect("Penetration not found.");

    match res {
        PenetrationResult::Penetrating(pen) => {
            assert!(pen.depth <= 0.5 + 1.0e-3);
            assert_eq!(pen.termination, Termination::CapacityExhausted);
        }
        PenetrationResult::Degenerate(failure) => {
            assert_eq!(failure, EpaFailure::CapacityExhausted)
        }
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn triangle_capacity_reached_before_convergence() {
    let ball = Ball::new(1.0);
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(1.5, 0.0, 0.0);
    let options = EpaOptions::default().with_max_triangles(16);

    let res = query::penetration(&pos1, &ball, &pos2, &ball, &options)
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().expect("The balls are penetrating.");

    assert_eq!(pen.termination, Termination::CapacityExhausted);
    assert!(pen.depth > 0.0 && pen.depth <= 0.5 + 1.0e-3);
}

#[test]
fn iteration_limit() {
    let ball = Ball::new(1.0);
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(1.5, 0.0, 0.0);
    let options = EpaOptions::default()
        .with_max_iterations(1)
        .with_relative_tolerance(1.0e-7);

    let res = query::penetration(&pos1, &ball, &pos2, &ball, &options)
        .unwrap()
        .expect("Penetration not found.");
    let pen = res.penetration().expect("The balls are penetrating.");

    assert_eq!(pen.iterations, 1);
    assert_eq!(pen.termination, Termination::IterationLimit);
    assert!(pen.depth <= 0.5 + 1.0e-3);
}

#[test]
fn disjoint_shapes() {
    let ball = Ball::new(1.0);
    let cube = Cuboid::new(Vector3::repeat(0.5));
    let pos1 = Isometry3::identity();
    let pos2 = Isometry3::translation(0.0, 0.0, 1.6);

    let res = query::penetration(&pos1, &ball, &pos2, &cube, &EpaOptions::default());
    assert_eq!(res, Ok(None));
}

#[test]
fn invalid_options_are_rejected() {
    let ball = Ball::new(1.0);
    let pos = Isometry3::identity();
    let options = EpaOptions::default().with_absolute_tolerance(0.0 as Real);

    assert_eq!(
        query::penetration(&pos, &ball, &pos, &ball, &options),
        Err(InvalidEpaOptions::AbsoluteTolerance(0.0))
    );
}
