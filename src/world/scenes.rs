use log::info;
use crate::dynamics::{ExternalForce, RigidBody};
use crate::errors::PhysicsError;
use crate::models::{Body, BodyHandle, Shape};
use crate::utils::{scale_vector, PhysicsConstants, FIXTURE_MASS};
use crate::world::World;

/// Preset scenes that exercise every narrow-phase path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    /// Twenty balls dropped into a walled pit.
    Ballpit,
    /// A cue ball launched into a rack of six balls on a cushioned table.
    Pool,
    /// A ball rolled down a lane into six box pins.
    Bowling,
    /// Balls of decreasing elasticity, plus a ball and a box bouncing off a tilted ramp.
    Dynamic,
}

impl Scene {
    pub const ALL: [Scene; 4] = [Scene::Ballpit, Scene::Pool, Scene::Bowling, Scene::Dynamic];

    pub fn name(&self) -> &'static str {
        match self {
            Scene::Ballpit => "Ballpit",
            Scene::Pool => "Pool",
            Scene::Bowling => "Bowling",
            Scene::Dynamic => "Dynamic",
        }
    }

    /// Builds a fresh world populated with this scene.
    pub fn build(&self, constants: PhysicsConstants) -> Result<World, PhysicsError> {
        let mut world = World::new(constants);
        match self {
            Scene::Ballpit => ballpit(&mut world)?,
            Scene::Pool => pool(&mut world)?,
            Scene::Bowling => bowling(&mut world)?,
            Scene::Dynamic => dynamic(&mut world)?,
        }
        info!("Built {} scene with {} bodies", self.name(), world.bodies().len());
        Ok(world)
    }
}

/// Immovable box given by its full size, e.g. ground or walls.
fn fixture(
    world: &mut World,
    size: (f64, f64, f64),
    position: (f64, f64, f64),
    rotation: (f64, f64, f64),
) -> Result<BodyHandle, PhysicsError> {
    let corners = Shape::new_box(scale_vector(size, 0.5)).local_vertices();
    let mut rigid_body = RigidBody::new(Body::box_collider(&corners), FIXTURE_MASS, 0.0, true, false)?;
    rigid_body.translate_by(position);
    rigid_body.rotate_by(rotation);
    Ok(world.insert_rigid_body(rigid_body))
}

fn ball(
    world: &mut World,
    radius: f64,
    mass: f64,
    elasticity: f64,
    position: (f64, f64, f64),
) -> Result<BodyHandle, PhysicsError> {
    let mut rigid_body = RigidBody::new(Body::new(Shape::new_sphere(radius)), mass, elasticity, false, true)?;
    rigid_body.translate_by(position);
    Ok(world.insert_rigid_body(rigid_body))
}

fn crate_box(
    world: &mut World,
    size: (f64, f64, f64),
    mass: f64,
    elasticity: f64,
    position: (f64, f64, f64),
) -> Result<BodyHandle, PhysicsError> {
    let corners = Shape::new_box(scale_vector(size, 0.5)).local_vertices();
    let mut rigid_body = RigidBody::new(Body::box_collider(&corners), mass, elasticity, false, true)?;
    rigid_body.translate_by(position);
    Ok(world.insert_rigid_body(rigid_body))
}

fn ballpit(world: &mut World) -> Result<(), PhysicsError> {
    let flat = (0.0, 0.0, 0.0);
    fixture(world, (10.0, 10.0, 0.5), (0.0, 0.0, -5.0), flat)?;
    fixture(world, (0.5, 10.0, 10.0), (-5.0, 0.0, 0.0), flat)?;
    fixture(world, (0.5, 10.0, 10.0), (5.0, 0.0, 0.0), flat)?;
    fixture(world, (10.0, 0.5, 10.0), (0.0, -5.0, 0.0), flat)?;
    fixture(world, (10.0, 0.5, 10.0), (0.0, 5.0, 0.0), flat)?;

    for i in 0..20 {
        let x = ((i * 3) % 10) as f64 / 2.0 - 2.5;
        let y = (((i + 1) * 3) % 10) as f64 / 2.0 - 2.5;
        ball(world, 1.0, 10.0, 0.8, (x, y, i as f64 + 3.0))?;
    }
    Ok(())
}

fn pool(world: &mut World) -> Result<(), PhysicsError> {
    let flat = (0.0, 0.0, 0.0);
    fixture(world, (20.0, 10.0, 0.2), (0.0, 0.0, -3.0), flat)?;
    fixture(world, (1.0, 7.0, 1.0), (-10.0, 0.0, -2.5), flat)?;
    fixture(world, (1.0, 7.0, 1.0), (10.0, 0.0, -2.5), flat)?;
    fixture(world, (16.5, 1.0, 1.0), (0.0, -5.0, -2.5), flat)?;
    fixture(world, (16.5, 1.0, 1.0), (0.0, 5.0, -2.5), flat)?;

    let cue = ball(world, 0.5, 5.0, 0.2, (7.0, 0.0, -2.5))?;
    if let Some(rigid_body) = world.rigid_body_mut(cue) {
        rigid_body.set_linear_velocity((-18.0, 36.0, 0.0));
    }

    for (x, y) in [(0.0, 0.0), (-1.0, 0.5), (-1.0, -0.5), (-2.0, 1.0), (-2.0, 0.0), (-2.0, -1.0)] {
        ball(world, 0.5, 5.0, 0.2, (-3.0 + x, y, -2.5))?;
    }
    Ok(())
}

fn bowling(world: &mut World) -> Result<(), PhysicsError> {
    fixture(world, (3.0, 20.0, 0.5), (0.0, 0.0, -3.0), (0.0, 0.0, 0.0))?;

    let bowl = ball(world, 1.0, 10.0, 0.2, (0.0, -10.0, -2.0))?;
    if let Some(rigid_body) = world.rigid_body_mut(bowl) {
        rigid_body.add_force(ExternalForce::continuous((0.0, 0.0, 0.3), (0.0, 10.0, 0.0)));
    }

    for (x, y) in [(0.0, 0.0), (0.5, 1.0), (-0.5, 1.0), (1.0, 2.0), (0.0, 2.0), (-1.0, 2.0)] {
        crate_box(world, (0.5, 0.5, 3.0), 5.0, 0.2, (x, 5.0 + y, 0.0))?;
    }
    Ok(())
}

fn dynamic(world: &mut World) -> Result<(), PhysicsError> {
    let lane = (2.0, 20.0, 0.5);
    fixture(world, lane, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0))?;
    for (y, elasticity) in [(-8.0, 1.0), (-4.0, 0.75), (0.0, 0.5), (4.0, 0.25), (8.0, 0.0)] {
        ball(world, 1.0, 10.0, elasticity, (0.0, y, 10.0))?;
    }

    fixture(world, lane, (-5.0, 10.0, 10.0), (0.2, 0.0, 0.0))?;
    ball(world, 1.0, 10.0, 0.8, (-5.0, 10.0, 15.0))?;
    crate_box(world, (1.0, 1.0, 1.0), 10.0, 0.8, (-5.0, 10.0, 25.0))?;
    Ok(())
}
