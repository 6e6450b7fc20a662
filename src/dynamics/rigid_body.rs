use log::{trace, warn};
use crate::dynamics::{ExternalForce, ForceMode};
use crate::errors::PhysicsError;
use crate::models::{Body, Matrix3, Transform};
use crate::utils::{
    add_vectors, cross_product, dot_product, scale_vector, DEFAULT_PHYSICS_CONSTANTS,
};

/// A body driven by forces, impulses and semi-implicit Euler integration.
///
/// The rigid body exclusively owns its [`Body`] and overwrites the body's parent transform
/// after every integration step.
#[derive(Debug, Clone)]
pub struct RigidBody {
    body: Body,
    mass: f64,
    elasticity: f64,
    is_kinematic: bool,
    uses_gravity: bool,
    gravity: (f64, f64, f64),
    position: (f64, f64, f64),
    rotation: (f64, f64, f64),
    current_linear_velocity: (f64, f64, f64),
    next_linear_velocity: (f64, f64, f64),
    current_angular_momentum: (f64, f64, f64),
    next_angular_momentum: (f64, f64, f64),
    inverse_inertia: Matrix3,
    inverse_inertia_world: Matrix3,
    forces: Vec<ExternalForce>,
}

impl RigidBody {
    /// Wraps `body` in a rigid body placed at the body's current parent translation.
    ///
    /// # Arguments
    /// * `body` - The collider to drive.
    /// * `mass` - Must be strictly positive.
    /// * `elasticity` - Restitution coefficient, must be non-negative.
    /// * `is_kinematic` - Kinematic bodies never integrate nor receive impulses.
    /// * `uses_gravity` - Whether gravity is added to the net force.
    ///
    /// # Errors
    /// [`PhysicsError::InvalidMass`] or [`PhysicsError::InvalidElasticity`].
    ///
    /// # Example
    /// ```
    /// use rs_rigidbody::dynamics::RigidBody;
    /// use rs_rigidbody::models::{Body, Shape};
    ///
    /// let body = Body::new(Shape::new_sphere(1.0));
    /// assert!(RigidBody::new(body.clone(), 2.0, 0.5, false, true).is_ok());
    /// assert!(RigidBody::new(body, 0.0, 0.5, false, true).is_err());
    /// ```
    pub fn new(
        body: Body,
        mass: f64,
        elasticity: f64,
        is_kinematic: bool,
        uses_gravity: bool,
    ) -> Result<Self, PhysicsError> {
        if mass <= 0.0 || !mass.is_finite() {
            return Err(PhysicsError::InvalidMass);
        }
        if elasticity < 0.0 || !elasticity.is_finite() {
            return Err(PhysicsError::InvalidElasticity);
        }

        let position = body.parent_transform().translation;
        let inverse_inertia = compute_inverse_inertia(&body, mass);
        let mut rigid_body = Self {
            body,
            mass,
            elasticity,
            is_kinematic,
            uses_gravity,
            gravity: DEFAULT_PHYSICS_CONSTANTS.gravity,
            position,
            rotation: (0.0, 0.0, 0.0),
            current_linear_velocity: (0.0, 0.0, 0.0),
            next_linear_velocity: (0.0, 0.0, 0.0),
            current_angular_momentum: (0.0, 0.0, 0.0),
            next_angular_momentum: (0.0, 0.0, 0.0),
            inverse_inertia,
            inverse_inertia_world: inverse_inertia,
            forces: Vec::new(),
        };
        rigid_body.refresh_transform();
        Ok(rigid_body)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// `1 / mass` for dynamic bodies, zero for kinematic ones.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_kinematic { 0.0 } else { 1.0 / self.mass }
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn is_kinematic(&self) -> bool {
        self.is_kinematic
    }

    pub fn uses_gravity(&self) -> bool {
        self.uses_gravity
    }

    pub fn gravity(&self) -> (f64, f64, f64) {
        self.gravity
    }

    pub fn position(&self) -> (f64, f64, f64) {
        self.position
    }

    /// Additive Euler accumulator, in radians.
    pub fn rotation(&self) -> (f64, f64, f64) {
        self.rotation
    }

    pub fn linear_velocity(&self) -> (f64, f64, f64) {
        self.current_linear_velocity
    }

    pub fn next_linear_velocity(&self) -> (f64, f64, f64) {
        self.next_linear_velocity
    }

    pub fn angular_momentum(&self) -> (f64, f64, f64) {
        self.current_angular_momentum
    }

    pub fn next_angular_momentum(&self) -> (f64, f64, f64) {
        self.next_angular_momentum
    }

    /// Body-space inverse inertia tensor.
    pub fn inverse_inertia(&self) -> &Matrix3 {
        &self.inverse_inertia
    }

    /// World-space inverse inertia as of the last integration step; zero for kinematic bodies.
    pub fn inverse_inertia_world(&self) -> Matrix3 {
        if self.is_kinematic { Matrix3::zero() } else { self.inverse_inertia_world }
    }

    pub fn angular_velocity(&self) -> (f64, f64, f64) {
        self.inverse_inertia_world().multiply_vector(self.current_angular_momentum)
    }

    pub fn forces(&self) -> &[ExternalForce] {
        &self.forces
    }

    /// Attaches a force and returns the number of forces now stored.
    pub fn add_force(&mut self, force: ExternalForce) -> usize {
        self.forces.push(force);
        self.forces.len()
    }

    /// Attaches several forces and returns the number of forces now stored.
    pub fn add_forces<I: IntoIterator<Item = ExternalForce>>(&mut self, forces: I) -> usize {
        self.forces.extend(forces);
        self.forces.len()
    }

    pub fn remove_force(&mut self, index: usize) -> Result<ExternalForce, PhysicsError> {
        if index >= self.forces.len() {
            warn!("Cannot remove force {}: only {} stored", index, self.forces.len());
            return Err(PhysicsError::InvalidForceIndex(index));
        }
        Ok(self.forces.remove(index))
    }

    /// Changes the mass and recomputes the inverse inertia. Non-positive values are rejected.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), PhysicsError> {
        if mass <= 0.0 || !mass.is_finite() {
            warn!("Rejected mass {}; keeping {}", mass, self.mass);
            return Err(PhysicsError::InvalidMass);
        }
        self.mass = mass;
        self.inverse_inertia = compute_inverse_inertia(&self.body, mass);
        self.update_world_inertia();
        Ok(())
    }

    pub fn set_elasticity(&mut self, elasticity: f64) -> Result<(), PhysicsError> {
        if elasticity < 0.0 || !elasticity.is_finite() {
            warn!("Rejected elasticity {}; keeping {}", elasticity, self.elasticity);
            return Err(PhysicsError::InvalidElasticity);
        }
        self.elasticity = elasticity;
        Ok(())
    }

    pub fn set_kinematic_state(&mut self, is_kinematic: bool) {
        self.is_kinematic = is_kinematic;
    }

    pub fn set_gravity_use(&mut self, uses_gravity: bool) {
        self.uses_gravity = uses_gravity;
    }

    pub fn set_gravity(&mut self, gravity: (f64, f64, f64)) {
        self.gravity = gravity;
    }

    /// Sets both the current and next linear velocity, e.g. to launch a body.
    pub fn set_linear_velocity(&mut self, velocity: (f64, f64, f64)) {
        self.current_linear_velocity = velocity;
        self.next_linear_velocity = velocity;
    }

    pub fn translate_by(&mut self, delta: (f64, f64, f64)) {
        self.position = add_vectors(self.position, delta);
        self.refresh_transform();
    }

    pub fn rotate_by(&mut self, delta: (f64, f64, f64)) {
        self.rotation = add_vectors(self.rotation, delta);
        self.update_world_inertia();
        self.refresh_transform();
    }

    /// Adds a linear impulse to the velocity used by the next step.
    pub fn apply_linear_impulse(&mut self, impulse: (f64, f64, f64)) {
        let dv = scale_vector(impulse, self.inverse_mass());
        self.next_linear_velocity = add_vectors(self.next_linear_velocity, dv);
    }

    /// Adds an angular impulse to the momentum used by the next step.
    pub fn apply_angular_impulse(&mut self, impulse: (f64, f64, f64)) {
        if self.is_kinematic {
            return;
        }
        self.next_angular_momentum = add_vectors(self.next_angular_momentum, impulse);
    }

    /// Net force and torque from the attached forces plus gravity.
    pub fn compute_force_torque(&self) -> ((f64, f64, f64), (f64, f64, f64)) {
        let initial = if self.uses_gravity {
            (scale_vector(self.gravity, self.mass), (0.0, 0.0, 0.0))
        } else {
            ((0.0, 0.0, 0.0), (0.0, 0.0, 0.0))
        };

        self.forces.iter().fold(initial, |(force, torque), f| {
            (add_vectors(force, f.force), add_vectors(torque, cross_product(f.position, f.force)))
        })
    }

    /// Advances the body by `dt` seconds.
    ///
    /// Impulse forces are consumed every step, kinematic or not. Kinematic bodies then only
    /// refresh their transform.
    pub fn before_update(&mut self, dt: f64) {
        let (force, torque) = self.compute_force_torque();
        self.forces.retain(|f| f.mode == ForceMode::Continuous);

        if self.is_kinematic {
            self.refresh_transform();
            return;
        }

        self.next_linear_velocity = add_vectors(self.next_linear_velocity, scale_vector(force, dt / self.mass));
        self.current_linear_velocity = self.next_linear_velocity;
        self.position = add_vectors(self.position, scale_vector(self.current_linear_velocity, dt));

        self.next_angular_momentum = add_vectors(self.next_angular_momentum, scale_vector(torque, dt));
        self.current_angular_momentum = self.next_angular_momentum;
        self.update_world_inertia();
        let omega = self.inverse_inertia_world.multiply_vector(self.current_angular_momentum);
        self.rotation = add_vectors(self.rotation, scale_vector(omega, dt));

        trace!("Integrated body to {:?} moving at {:?}", self.position, self.current_linear_velocity);
        self.refresh_transform();
    }

    /// Kinetic energy `½ m v² + ½ ω·L`.
    pub fn kinetic_energy(&self) -> f64 {
        let v = self.current_linear_velocity;
        0.5 * self.mass * dot_product(v, v)
            + 0.5 * dot_product(self.angular_velocity(), self.current_angular_momentum)
    }

    fn update_world_inertia(&mut self) {
        let r = Matrix3::from_euler(self.rotation);
        self.inverse_inertia_world = r.multiply(&self.inverse_inertia).multiply(&r.transpose());
    }

    fn refresh_transform(&mut self) {
        self.body.set_parent_transform(Transform::from_translation_rotation(self.position, self.rotation));
    }
}

/// Inverse inertia of the body's vertices treated as equal point masses.
///
/// `I = Σ (|v|² I₃ - v vᵀ) · m / N`, then inverted. Degenerate vertex sets give a zero inverse,
/// which makes the body immune to angular impulses.
pub fn compute_inverse_inertia(body: &Body, mass: f64) -> Matrix3 {
    let vertices = body.local_vertices();
    if vertices.is_empty() {
        warn!("Body has no vertices; angular response disabled");
        return Matrix3::zero();
    }

    let point_mass = mass / vertices.len() as f64;
    let inertia = vertices.iter().fold(Matrix3::zero(), |acc, &v| {
        let term = Matrix3::identity()
            .scale(dot_product(v, v))
            .add(&Matrix3::outer_product(v, v).scale(-1.0));
        acc.add(&term.scale(point_mass))
    });

    inertia.inverse().unwrap_or_else(|| {
        warn!("Singular inertia tensor; angular response disabled");
        Matrix3::zero()
    })
}
