use approx::assert_abs_diff_eq;
use crate::assert_float_eq;
use crate::dynamics::{compute_inverse_inertia, ExternalForce, ForceMode, RigidBody};
use crate::errors::PhysicsError;
use crate::models::{Body, Matrix3, Shape};

fn cube(mass: f64) -> RigidBody {
    RigidBody::new(Body::new(Shape::new_box((1.0, 1.0, 1.0))), mass, 0.5, false, false)
        .expect("valid rigid body")
}

#[test]
fn test_construction_validates_mass_and_elasticity() {
    let body = Body::new(Shape::new_sphere(1.0));

    assert_eq!(RigidBody::new(body.clone(), -1.0, 0.5, false, true).unwrap_err(), PhysicsError::InvalidMass);
    assert_eq!(RigidBody::new(body.clone(), 1.0, -0.1, false, true).unwrap_err(), PhysicsError::InvalidElasticity);
    assert!(RigidBody::new(body, 1.0, 0.0, false, true).is_ok());
}

#[test]
fn test_point_mass_inertia_of_cube_corners() {
    // Eight unit point masses at (±1, ±1, ±1): I = 16 on every axis.
    let inverse = compute_inverse_inertia(&Body::new(Shape::new_box((1.0, 1.0, 1.0))), 8.0);
    assert_abs_diff_eq!(inverse, Matrix3::diagonal(1.0 / 16.0, 1.0 / 16.0, 1.0 / 16.0), epsilon = 1e-12);
}

#[test]
fn test_degenerate_vertices_disable_rotation() {
    let empty = Body::new(Shape::new_convex(Vec::new()));
    assert_eq!(compute_inverse_inertia(&empty, 1.0), Matrix3::zero());

    // A single point on the origin has no rotational inertia at all.
    let point = Body::new(Shape::new_convex(vec![(0.0, 0.0, 0.0)]));
    assert_eq!(compute_inverse_inertia(&point, 1.0), Matrix3::zero());
}

#[test]
fn test_rejected_mass_leaves_state_untouched() {
    let mut rb = cube(8.0);
    let before = *rb.inverse_inertia();

    assert_eq!(rb.set_mass(-1.0), Err(PhysicsError::InvalidMass));
    assert_eq!(rb.set_mass(0.0), Err(PhysicsError::InvalidMass));
    assert_eq!(rb.mass(), 8.0);
    assert_eq!(*rb.inverse_inertia(), before);

    rb.set_mass(16.0).unwrap();
    assert_abs_diff_eq!(*rb.inverse_inertia(), before.scale(0.5), epsilon = 1e-12);
}

#[test]
fn test_rejected_elasticity() {
    let mut rb = cube(1.0);
    assert!(rb.set_elasticity(-0.5).is_err());
    assert_eq!(rb.elasticity(), 0.5);
    rb.set_elasticity(2.0).unwrap();
    assert_eq!(rb.elasticity(), 2.0);
}

#[test]
fn test_force_bookkeeping() {
    let mut rb = cube(1.0);

    assert_eq!(rb.add_force(ExternalForce::continuous((0.0, 0.0, 0.0), (1.0, 0.0, 0.0))), 1);
    let count = rb.add_forces(vec![
        ExternalForce::impulse((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ExternalForce::continuous((0.0, 1.0, 0.0), (0.0, 0.0, 1.0)),
    ]);
    assert_eq!(count, 3);

    assert_eq!(rb.remove_force(3), Err(PhysicsError::InvalidForceIndex(3)));
    let removed = rb.remove_force(1).unwrap();
    assert_eq!(removed.mode, ForceMode::Impulse);
    assert_eq!(rb.forces().len(), 2);
}

#[test]
fn test_torque_is_sum_of_moments() {
    let mut rb = cube(1.0);
    rb.add_force(ExternalForce::continuous((0.0, 1.0, 0.0), (1.0, 0.0, 0.0)));
    rb.add_force(ExternalForce::continuous((0.0, 0.0, 0.0), (0.0, 0.0, 3.0)));

    let (force, torque) = rb.compute_force_torque();
    assert_eq!(force, (1.0, 0.0, 3.0));
    assert_eq!(torque, (0.0, 0.0, -1.0));
}

#[test]
fn test_gravity_joins_the_net_force() {
    let mut rb = cube(2.0);
    rb.set_gravity_use(true);
    rb.set_gravity((0.0, 0.0, -10.0));

    let (force, _) = rb.compute_force_torque();
    assert_eq!(force, (0.0, 0.0, -20.0));
}

#[test]
fn test_semi_implicit_free_fall() {
    let mut rb = cube(1.0);
    rb.set_gravity_use(true);
    rb.set_gravity((0.0, 0.0, -10.0));

    rb.before_update(0.1);
    assert_float_eq(rb.linear_velocity().2, -1.0, 1e-12, None);
    assert_float_eq(rb.position().2, -0.1, 1e-12, None);

    rb.before_update(0.1);
    assert_float_eq(rb.linear_velocity().2, -2.0, 1e-12, None);
    assert_float_eq(rb.position().2, -0.3, 1e-12, Some("position uses the updated velocity"));
    assert_float_eq(rb.body().world_center().2, -0.3, 1e-12, Some("body transform follows"));
}

#[test]
fn test_impulse_forces_apply_once() {
    let mut rb = cube(2.0);
    rb.add_force(ExternalForce::impulse((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)));

    rb.before_update(0.5);
    assert_float_eq(rb.linear_velocity().0, 2.5, 1e-12, None);
    assert!(rb.forces().is_empty());

    rb.before_update(0.5);
    assert_float_eq(rb.linear_velocity().0, 2.5, 1e-12, None);
}

#[test]
fn test_kinematic_bodies_ignore_forces_and_impulses() {
    let mut rb = cube(1.0);
    rb.set_kinematic_state(true);
    rb.set_gravity_use(true);
    rb.add_force(ExternalForce::continuous((0.0, 1.0, 0.0), (100.0, 0.0, 0.0)));
    rb.apply_linear_impulse((5.0, 5.0, 5.0));
    rb.apply_angular_impulse((1.0, 0.0, 0.0));

    rb.before_update(1.0);

    assert_eq!(rb.position(), (0.0, 0.0, 0.0));
    assert_eq!(rb.linear_velocity(), (0.0, 0.0, 0.0));
    assert_eq!(rb.rotation(), (0.0, 0.0, 0.0));
    assert_eq!(rb.inverse_mass(), 0.0);
}

#[test]
fn test_rotation_accumulates_additively() {
    let mut rb = cube(8.0);
    rb.apply_angular_impulse((0.0, 0.0, 16.0));

    rb.before_update(0.5);
    assert_abs_diff_eq!(rb.angular_velocity().2, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(rb.rotation().2, 0.5, epsilon = 1e-12);

    rb.before_update(0.5);
    assert_abs_diff_eq!(rb.rotation().2, 1.0, epsilon = 1e-12);
    assert!(rb.kinetic_energy() > 0.0);
}

#[test]
fn test_translate_and_rotate_update_the_body() {
    let mut rb = cube(1.0);
    rb.translate_by((1.0, 2.0, 3.0));
    rb.translate_by((1.0, 0.0, 0.0));
    rb.rotate_by((0.0, 0.0, std::f64::consts::FRAC_PI_2));

    assert_eq!(rb.body().world_center(), (2.0, 2.0, 3.0));
    let x_axis = rb.body().local_to_world().axis(0);
    assert_abs_diff_eq!(x_axis.1, 1.0, epsilon = 1e-12);
}

#[test]
fn test_set_linear_velocity_launches() {
    let mut rb = cube(1.0);
    rb.set_linear_velocity((-18.0, 36.0, 0.0));
    assert_eq!(rb.next_linear_velocity(), (-18.0, 36.0, 0.0));

    rb.before_update(0.5);
    assert_eq!(rb.position(), (-9.0, 18.0, 0.0));
}

#[test]
fn test_impulses_added_while_kinematic_are_dropped() {
    let mut rb = cube(1.0);
    rb.set_kinematic_state(true);
    rb.add_force(ExternalForce::impulse((0.0, 0.0, 0.0), (10.0, 0.0, 0.0)));
    rb.add_force(ExternalForce::continuous((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)));

    rb.before_update(0.1);
    assert_eq!(rb.forces().len(), 1);
    assert_eq!(rb.forces()[0].mode, ForceMode::Continuous);

    rb.set_kinematic_state(false);
    for _ in 0..10 {
        rb.before_update(0.1);
    }
    assert_float_eq(rb.linear_velocity().0, 0.0, 1e-12, Some("stale impulse must not fire"));
    assert_float_eq(rb.linear_velocity().1, 1.0, 1e-12, None);
}
