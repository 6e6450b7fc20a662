use approx::assert_abs_diff_eq;
use crate::dynamics::{CollisionSolver, RigidBody};
use crate::models::{Body, Shape};
use crate::registry::CollisionManager;
use crate::utils::DEFAULT_PHYSICS_CONSTANTS;
use crate::world::BodySet;

fn sphere(position: (f64, f64, f64), velocity: (f64, f64, f64), mass: f64, elasticity: f64) -> RigidBody {
    let mut rb = RigidBody::new(Body::new(Shape::new_sphere(1.0)), mass, elasticity, false, false).unwrap();
    rb.translate_by(position);
    rb.set_linear_velocity(velocity);
    rb
}

fn ground() -> RigidBody {
    RigidBody::new(Body::new(Shape::new_box((5.0, 5.0, 0.5))), 1.0e6, 0.0, true, false).unwrap()
}

fn setup(rigid_bodies: Vec<RigidBody>) -> (CollisionManager, BodySet) {
    let mut manager = CollisionManager::new(DEFAULT_PHYSICS_CONSTANTS);
    let mut bodies = BodySet::new();
    for rb in rigid_bodies {
        let handle = bodies.insert_rigid_body(rb);
        manager.add_body(handle);
    }
    (manager, bodies)
}

#[test]
fn test_head_on_elastic_spheres_swap_velocities() {
    let (mut manager, mut bodies) = setup(vec![
        sphere((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), 1.0, 1.0),
        sphere((1.5, 0.0, 0.0), (-1.0, 0.0, 0.0), 1.0, 1.0),
    ]);
    let handles: Vec<_> = bodies.iter().map(|(h, _)| h).collect();

    let resolved = CollisionSolver::default().solve(&mut manager, &mut bodies);
    assert_eq!(resolved, 1);

    let a = bodies.rigid_body(handles[0]).unwrap();
    let b = bodies.rigid_body(handles[1]).unwrap();
    assert_abs_diff_eq!(a.next_linear_velocity().0, -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b.next_linear_velocity().0, 1.0, epsilon = 1e-12);
    assert_eq!(a.next_angular_momentum(), (0.0, 0.0, 0.0));

    // Overlap of 0.5 shared equally.
    assert_abs_diff_eq!(a.position().0, -0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(b.position().0, 1.75, epsilon = 1e-12);
}

#[test]
fn test_ball_bounces_off_kinematic_ground() {
    let (mut manager, mut bodies) = setup(vec![ground(), sphere((0.0, 0.0, 1.25), (0.0, 0.0, -1.0), 2.0, 0.5)]);
    let handles: Vec<_> = bodies.iter().map(|(h, _)| h).collect();

    CollisionSolver::default().solve(&mut manager, &mut bodies);

    let floor = bodies.rigid_body(handles[0]).unwrap();
    assert_eq!(floor.position(), (0.0, 0.0, 0.0));
    assert_eq!(floor.next_linear_velocity(), (0.0, 0.0, 0.0));

    let ball = bodies.rigid_body(handles[1]).unwrap();
    assert_abs_diff_eq!(ball.next_linear_velocity().2, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(ball.position().2, 1.5, epsilon = 1e-12);
}

#[test]
fn test_separating_bodies_only_get_positional_correction() {
    let (mut manager, mut bodies) = setup(vec![
        sphere((0.0, 0.0, 0.0), (-1.0, 0.0, 0.0), 1.0, 1.0),
        sphere((1.5, 0.0, 0.0), (1.0, 0.0, 0.0), 1.0, 1.0),
    ]);
    let handles: Vec<_> = bodies.iter().map(|(h, _)| h).collect();
    let solver = CollisionSolver::default();

    let collisions = manager.collisions_for_all(&bodies);
    let pair = collisions[&handles[0]][&handles[1]];
    let resolution = solver.resolve_pair(&mut bodies, handles[0], handles[1], &pair).unwrap();

    assert_eq!(resolution.impulse, 0.0);
    assert_abs_diff_eq!(resolution.correction, 0.5, epsilon = 1e-12);
    assert_eq!(bodies.rigid_body(handles[0]).unwrap().next_linear_velocity(), (-1.0, 0.0, 0.0));
}

#[test]
fn test_static_colliders_are_not_resolved_against() {
    let mut manager = CollisionManager::new(DEFAULT_PHYSICS_CONSTANTS);
    let mut bodies = BodySet::new();
    let wall = bodies.insert_body(Body::new(Shape::new_box((1.0, 1.0, 1.0))));
    let ball = bodies.insert_rigid_body(sphere((1.5, 0.0, 0.0), (-1.0, 0.0, 0.0), 1.0, 1.0));
    manager.add_body(wall);
    manager.add_body(ball);

    let resolved = CollisionSolver::default().solve(&mut manager, &mut bodies);

    assert_eq!(resolved, 0);
    assert_eq!(bodies.rigid_body(ball).unwrap().next_linear_velocity(), (-1.0, 0.0, 0.0));
}

#[test]
fn test_correction_factor_is_clamped() {
    let (mut manager, mut bodies) = setup(vec![ground(), sphere((0.0, 0.0, 1.25), (0.0, 0.0, 0.0), 1.0, 0.0)]);
    let handles: Vec<_> = bodies.iter().map(|(h, _)| h).collect();

    CollisionSolver::new(5.0).solve(&mut manager, &mut bodies);

    assert_abs_diff_eq!(bodies.rigid_body(handles[1]).unwrap().position().2, 1.5, epsilon = 1e-12);
}
