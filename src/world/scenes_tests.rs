use crate::utils::DEFAULT_PHYSICS_CONSTANTS;
use crate::world::Scene;

#[test]
fn test_scenes_build_with_expected_population() {
    let expected = [(Scene::Ballpit, 25), (Scene::Pool, 12), (Scene::Bowling, 8), (Scene::Dynamic, 9)];

    for (scene, count) in expected {
        let world = scene.build(DEFAULT_PHYSICS_CONSTANTS).expect("scene builds");
        assert_eq!(world.bodies().len(), count, "{} population", scene.name());
        assert_eq!(world.manager().len(), count);
    }
}

#[test]
fn test_fixtures_are_kinematic() {
    let world = Scene::Ballpit.build(DEFAULT_PHYSICS_CONSTANTS).unwrap();
    let kinematic = world
        .bodies()
        .iter()
        .filter_map(|(_, entry)| entry.rigid_body())
        .filter(|rb| rb.is_kinematic())
        .count();

    assert_eq!(kinematic, 5);
}

#[test]
fn test_pool_cue_ball_is_launched() {
    let mut world = Scene::Pool.build(DEFAULT_PHYSICS_CONSTANTS).unwrap();
    let cue = world
        .bodies()
        .iter()
        .find(|(_, entry)| entry.rigid_body().map_or(false, |rb| rb.linear_velocity() != (0.0, 0.0, 0.0)))
        .map(|(handle, _)| handle)
        .expect("cue ball has a launch velocity");

    let before = world.rigid_body(cue).unwrap().position();
    world.step(0.01);
    let after = world.rigid_body(cue).unwrap().position();
    assert!(after.0 < before.0 && after.1 > before.1);
}

#[test]
fn test_every_scene_steps() {
    for scene in Scene::ALL {
        let mut world = scene.build(DEFAULT_PHYSICS_CONSTANTS).unwrap();
        for _ in 0..50 {
            world.step(1.0 / 60.0);
        }
        for (_, entry) in world.bodies().iter() {
            let p = entry.body().world_center();
            assert!(p.0.is_finite() && p.1.is_finite() && p.2.is_finite(), "{} diverged", scene.name());
        }
    }
}
