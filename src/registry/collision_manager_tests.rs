use approx::assert_abs_diff_eq;
use crate::models::{Body, BodyHandle, Shape, Transform};
use crate::registry::CollisionManager;
use crate::utils::DEFAULT_PHYSICS_CONSTANTS;
use crate::world::BodySet;

fn placed(shape: Shape, position: (f64, f64, f64)) -> Body {
    let mut body = Body::new(shape);
    body.set_parent_transform(Transform::from_translation(position));
    body
}

fn registered(bodies: Vec<Body>) -> (CollisionManager, BodySet, Vec<BodyHandle>) {
    let mut manager = CollisionManager::new(DEFAULT_PHYSICS_CONSTANTS);
    let mut set = BodySet::new();
    let handles = bodies
        .into_iter()
        .map(|body| {
            let handle = set.insert_body(body);
            assert!(manager.add_body(handle));
            handle
        })
        .collect();
    (manager, set, handles)
}

#[test]
fn test_registration() {
    let mut manager = CollisionManager::default();
    let (a, b) = (BodyHandle(0), BodyHandle(1));

    assert!(manager.add_body(a));
    assert!(!manager.add_body(a), "duplicates are rejected");
    assert!(manager.add_body(b));
    assert_eq!(manager.len(), 2);

    assert!(manager.remove_body(a));
    assert!(!manager.remove_body(a));
    assert!(!manager.contains(a) && manager.contains(b));

    manager.clear_all();
    assert!(manager.is_empty());
}

#[test]
fn test_results_are_symmetric_and_cached() {
    let (mut manager, bodies, h) = registered(vec![
        placed(Shape::new_sphere(1.0), (0.0, 0.0, 0.0)),
        placed(Shape::new_box((1.0, 1.0, 1.0)), (1.5, 0.0, 0.0)),
        placed(Shape::new_sphere(1.0), (50.0, 0.0, 0.0)),
    ]);

    let for_a = manager.collisions_for(h[0], &bodies);
    assert_eq!(for_a.len(), 1);
    assert!(manager.cached_result(h[1], h[0]).is_some(), "reverse lookup is served from the cache");
    assert_eq!(manager.cached_result(h[0], h[2]), Some(None), "misses are cached too");

    let for_b = manager.collisions_for(h[1], &bodies);
    let ab = for_a[&h[1]];
    let ba = for_b[&h[0]];
    assert_abs_diff_eq!(ab, ba.swapped(), epsilon = 1e-12);
    assert_eq!(ab.a.penetration, ba.a.penetration);
}

#[test]
fn test_collisions_for_all_clears_the_cache_first() {
    let (mut manager, mut bodies, h) = registered(vec![
        placed(Shape::new_sphere(1.0), (0.0, 0.0, 0.0)),
        placed(Shape::new_sphere(1.0), (1.5, 0.0, 0.0)),
    ]);

    let all = manager.collisions_for_all(&bodies);
    assert_eq!(all.len(), 2);

    // Move B away; a stale cache would still report contact.
    if let Some(crate::world::BodyEntry::Fixed(body)) = bodies.get_mut(h[1]) {
        body.set_parent_transform(Transform::from_translation((10.0, 0.0, 0.0)));
    }
    assert!(manager.collisions_for_all(&bodies).is_empty());
}

#[test]
fn test_box_pairs_report_contact_on_entry_only() {
    let (mut manager, bodies, h) = registered(vec![
        placed(Shape::new_box((1.0, 1.0, 1.0)), (0.0, 0.0, 0.0)),
        placed(Shape::new_box((1.0, 1.0, 1.0)), (0.5, 0.0, 0.0)),
    ]);

    let first = manager.collisions_for_all(&bodies);
    assert_abs_diff_eq!(first[&h[0]][&h[1]].a.penetration, -1.5, epsilon = 1e-12);
    assert_eq!(manager.axis_states().get(h[0], h[1]), 0);

    // Unchanged overlap: the axis filter is empty now.
    assert!(manager.collisions_for_all(&bodies).is_empty());

    manager.clear_cache();
    assert_eq!(manager.axis_states().len(), 1, "clearing results keeps axis history");

    manager.remove_body(h[1]);
    assert!(manager.axis_states().is_empty());
}

#[test]
fn test_dead_handles_contribute_nothing() {
    let (mut manager, bodies, h) = registered(vec![placed(Shape::new_sphere(1.0), (0.0, 0.0, 0.0))]);
    manager.add_body(BodyHandle(42));

    assert!(manager.collisions_for(h[0], &bodies).is_empty());
    assert!(manager.collisions_for(BodyHandle(42), &bodies).is_empty());
}
