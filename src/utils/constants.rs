use crate::utils;

/// Standard gravitational acceleration, pointing down the world Z axis.
pub const EARTH_GRAVITY: (f64, f64, f64) = (0.0, 0.0, -9.81);

/// Mass given to immovable scene fixtures (ground, walls, ramps).
pub const FIXTURE_MASS: f64 = 1.0e6;

pub const DEFAULT_PHYSICS_CONSTANTS: utils::PhysicsConstants = utils::PhysicsConstants {
    gravity: EARTH_GRAVITY,
    gjk_max_iterations: 64,
    epa_max_iterations: 100,
    epa_tolerance: 0.01,
    parallel_epsilon: 1e-6,
    positional_correction: 1.0,
};
