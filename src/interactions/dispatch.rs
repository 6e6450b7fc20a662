use log::trace;
use crate::interactions::{box_box, box_sphere, gjk_epa, sphere_sphere, AxisStateCache};
use crate::models::{Body, BodyHandle, CollisionResult, Shape};
use crate::utils::PhysicsConstants;

/// Orders two operands so the higher-priority shape comes first.
///
/// Equal kinds are ordered by handle, which keeps the axis-state key of a pair canonical.
/// Returns `true` when the operands had to be exchanged.
pub fn canonical_order(
    handle_a: BodyHandle,
    body_a: &Body,
    handle_b: BodyHandle,
    body_b: &Body,
) -> bool {
    let (pa, pb) = (body_a.shape().priority(), body_b.shape().priority());
    pb > pa || (pb == pa && handle_b < handle_a)
}

/// Runs the narrow-phase test matching the two shape kinds.
///
/// The result is always expressed with `body_a` as side A regardless of the order the
/// test itself needed.
pub fn collide(
    handle_a: BodyHandle,
    body_a: &Body,
    handle_b: BodyHandle,
    body_b: &Body,
    axis_states: &mut AxisStateCache,
    constants: &PhysicsConstants,
) -> CollisionResult {
    if canonical_order(handle_a, body_a, handle_b, body_b) {
        return collide_ordered(handle_b, body_b, handle_a, body_a, axis_states, constants)
            .map(|pair| pair.swapped());
    }
    collide_ordered(handle_a, body_a, handle_b, body_b, axis_states, constants)
}

fn collide_ordered(
    first_handle: BodyHandle,
    first: &Body,
    second_handle: BodyHandle,
    second: &Body,
    axis_states: &mut AxisStateCache,
    constants: &PhysicsConstants,
) -> CollisionResult {
    match (first.shape(), second.shape()) {
        (Shape::Box { half_extents: ha }, Shape::Box { half_extents: hb }) => box_box(
            first.local_to_world(),
            *ha,
            second.local_to_world(),
            *hb,
            axis_states.state_mut(first_handle, second_handle),
            constants.parallel_epsilon,
        ),
        (Shape::Box { half_extents }, Shape::Sphere { radius }) => {
            box_sphere(first.local_to_world(), *half_extents, second.world_center(), *radius)
        }
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere(first.world_center(), *ra, second.world_center(), *rb)
        }
        (_, Shape::Convex { .. }) => gjk_epa(first, second, constants),
        (a, b) => {
            trace!("No narrow-phase test for {:?} against {:?}", a.kind(), b.kind());
            None
        }
    }
}
