// navigator_core/tests/navigator_integration.rs

use approx::assert_abs_diff_eq;
use navigator_core::navigator::obstacle::distance_point_to_segment;
use navigator_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn open_field() -> Field {
    // Planning bounds of +-10 m on both axes.
    Field::new(20.0, 20.0, 0.0)
}

fn config() -> NavigatorConfig {
    NavigatorConfig {
        rrt: RrtConfig {
            max_iterations: 2000,
            step_size: 0.5,
            goal_bias: 0.1,
            goal_tolerance: 0.3,
            simplify_path: true,
        },
        ..Default::default()
    }
}

#[test]
fn planner_end_to_end_in_open_field() {
    let planner = RrtPlanner::new(config().rrt).unwrap();
    let bounds = open_field().planning_bounds();
    let request = PlanRequest {
        start: Point::new(0.0, 0.0),
        start_orientation: 0.0,
        goal: Point::new(5.0, 0.0),
        final_orientation: 0.0,
        final_speed: 0.0,
    };
    // A single robot sitting on the straight line forces the tree search.
    let obstacles = [Obstacle::new(Point::new(2.5, 0.0), 0.24)];

    for seed in 0..5 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let path = planner.plan_path(&request, &obstacles, &bounds, &mut rng).unwrap();

        assert!(path.iterations() < 2000);
        assert!(path.length() >= 5.0 - 0.3);
        assert!(path.length() <= 3.0 * 5.0);
        assert!(nalgebra::distance(path.end().unwrap(), &request.goal) <= 0.3);
        assert_eq!(path.start(), Some(&request.start));
        for pair in path.waypoints().windows(2) {
            let clearance = distance_point_to_segment(&obstacles[0].center, &pair[0], &pair[1]);
            assert!(clearance >= obstacles[0].radius - 1e-9);
        }
    }
}

#[test]
fn navigator_routes_around_teammate() {
    let t = Timestamp::from_secs(0.0);
    let friendly = Team::new(vec![
        Robot::with_state(0, Point::new(0.0, 0.0), Vector::zeros(), 0.0, 0.0, t),
        Robot::with_state(1, Point::new(2.5, 0.0), Vector::zeros(), 0.0, 0.0, t),
    ]);
    let world = World::new(open_field(), friendly, Team::default(), t);
    let navigator = Navigator::new(NavigatorConfig {
        path_expansion: PathExpansion::PerWaypoint,
        ..config()
    })
    .unwrap();

    let intents = vec![
        Intent::from(MoveIntent::new(0, Point::new(5.0, 0.0), 1.0, 0.5)),
        Intent::Unrecognized {
            name: "Pivot Intent".to_string(),
            robot_id: 1,
        },
    ];
    let report = navigator.assign_primitives(&world, &intents, &mut ChaCha8Rng::seed_from_u64(11));

    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0],
        DispatchError::UnrecognizedIntent { robot_id: 1, .. }
    ));
    // At least one intermediate waypoint plus the final one, all for robot 0.
    assert!(report.primitives.len() >= 2);
    assert!(report.primitives.iter().all(|p| p.robot_id() == 0));
    match report.primitives.last() {
        Some(Primitive::Move(last)) => {
            assert!(nalgebra::distance(&last.destination, &Point::new(5.0, 0.0)) <= 0.3);
            assert_abs_diff_eq!(last.final_angle, 1.0);
            assert_abs_diff_eq!(last.final_speed, 0.5);
        }
        other => panic!("expected a move primitive, got {other:?}"),
    }
}

#[test]
fn team_catches_up_robots_without_observations() {
    let t0 = Timestamp::from_secs(0.0);
    let t1 = Timestamp::from_secs(0.5);
    let mut team = Team::default();
    team.update_robot(&Robot::with_state(3, Point::new(0.0, 0.0), Vector::new(2.0, 0.0), 0.0, 0.0, t0))
        .unwrap();
    team.update_robot(&Robot::with_state(4, Point::new(1.0, 1.0), Vector::zeros(), 0.0, 0.0, t0))
        .unwrap();

    // Only robot 4 is seen at t1.
    team.update_robot(&Robot::with_state(4, Point::new(1.0, 2.0), Vector::zeros(), 0.0, 0.0, t1))
        .unwrap();
    team.update_to_predicted_state(t1).unwrap();

    let predicted = team.robot(3).unwrap();
    assert_abs_diff_eq!(predicted.position().x, 1.0, epsilon = 1e-12);
    assert_eq!(predicted.last_update_timestamp(), t1);
    assert_eq!(team.robot(4).unwrap().position(), Point::new(1.0, 2.0));

    // A late observation for robot 3 is rejected and changes nothing.
    let stale = Robot::with_state(3, Point::new(9.0, 9.0), Vector::zeros(), 0.0, 0.0, t0);
    assert!(matches!(
        team.update_robot(&stale),
        Err(StateError::StaleTimestamp { .. })
    ));
    assert_abs_diff_eq!(team.robot(3).unwrap().position().x, 1.0, epsilon = 1e-12);
}

#[test]
fn primitives_survive_message_round_trip() {
    let primitives = vec![
        Primitive::Move(MovePrimitive {
            robot_id: 5,
            destination: Point::new(-1.0, 2.5),
            final_angle: normalize_angle(4.0),
            final_speed: 0.0,
        }),
        StopPrimitive::hold(5).into(),
    ];
    for primitive in &primitives {
        let msg = PrimitiveMsg::from(primitive);
        assert_eq!(Primitive::try_from(&msg).as_ref(), Ok(primitive));
    }
}
