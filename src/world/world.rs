use log::{info, warn};
use rayon::prelude::*;
use crate::dynamics::{CollisionSolver, RigidBody};
use crate::errors::PhysicsError;
use crate::models::{Body, BodyHandle};
use crate::registry::CollisionManager;
use crate::utils::PhysicsConstants;
use crate::world::{BodyEntry, BodySet};

/// Owns the bodies, the collision registry and the solver, and runs the step loop.
#[derive(Debug, Clone)]
pub struct World {
    bodies: BodySet,
    manager: CollisionManager,
    solver: CollisionSolver,
    constants: PhysicsConstants,
    paused: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new(PhysicsConstants::default())
    }
}

impl World {
    pub fn new(constants: PhysicsConstants) -> Self {
        if let Err(e) = constants.validate() {
            warn!("World created with questionable constants: {}", e);
        }
        Self {
            bodies: BodySet::new(),
            manager: CollisionManager::new(constants),
            solver: CollisionSolver::new(constants.positional_correction),
            constants,
            paused: false,
        }
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn manager(&self) -> &CollisionManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut CollisionManager {
        &mut self.manager
    }

    /// Adds a static collider and registers it for collision.
    pub fn insert_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.insert_body(body);
        self.manager.add_body(handle);
        handle
    }

    /// Adds a rigid body, applies the world gravity to it and registers it for collision.
    pub fn insert_rigid_body(&mut self, mut rigid_body: RigidBody) -> BodyHandle {
        rigid_body.set_gravity(self.constants.gravity);
        let handle = self.bodies.insert_rigid_body(rigid_body);
        self.manager.add_body(handle);
        handle
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Result<BodyEntry, PhysicsError> {
        self.manager.remove_body(handle);
        self.bodies.remove(handle).ok_or(PhysicsError::UnknownBody(handle.0))
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.body(handle)
    }

    pub fn rigid_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.rigid_body(handle)
    }

    pub fn rigid_body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.rigid_body_mut(handle)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Runs one simulation step: collision response, then integration of every rigid body.
    ///
    /// A paused world still resolves contacts but integrates with `dt = 0`.
    ///
    /// # Returns
    /// The number of contact pairs resolved.
    pub fn step(&mut self, dt: f64) -> usize {
        let dt = if self.paused { 0.0 } else { dt };
        let resolved = self.solver.solve(&mut self.manager, &mut self.bodies);
        self.bodies.par_rigid_bodies_mut().for_each(|rigid_body| rigid_body.before_update(dt));
        resolved
    }

    /// Scene teardown.
    pub fn clear(&mut self) {
        info!("Clearing world with {} bodies", self.bodies.len());
        self.manager.clear_all();
        self.bodies.clear();
    }
}
