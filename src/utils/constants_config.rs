// src/utils/constants_config.rs
use crate::errors::PhysicsError;
use crate::utils::{DEFAULT_PHYSICS_CONSTANTS, EARTH_GRAVITY};

/// Tunables shared by the narrow phase, the solver and the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    /// Gravitational acceleration applied to bodies that use gravity.
    pub gravity: (f64, f64, f64),
    /// Safety cap on GJK simplex refinement steps.
    pub gjk_max_iterations: usize,
    /// Hard cap on EPA expansion steps. Hitting it yields an approximate contact.
    pub epa_max_iterations: usize,
    /// EPA stops once a new support point improves the nearest face by less than this.
    pub epa_tolerance: f64,
    /// Cross products shorter than this are treated as parallel edges.
    pub parallel_epsilon: f64,
    /// Fraction of the penetration removed by positional correction each step.
    pub positional_correction: f64,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY,
            gjk_max_iterations: 64,
            epa_max_iterations: 100,
            epa_tolerance: 0.01,
            parallel_epsilon: 1e-6,
            positional_correction: 1.0,
        }
    }
}

impl PhysicsConstants {
    pub fn new(
        gravity: Option<(f64, f64, f64)>,
        gjk_max_iterations: Option<usize>,
        epa_max_iterations: Option<usize>,
        epa_tolerance: Option<f64>,
        parallel_epsilon: Option<f64>,
        positional_correction: Option<f64>,
    ) -> Self {
        let default = DEFAULT_PHYSICS_CONSTANTS;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            gjk_max_iterations: gjk_max_iterations.unwrap_or(default.gjk_max_iterations),
            epa_max_iterations: epa_max_iterations.unwrap_or(default.epa_max_iterations),
            epa_tolerance: epa_tolerance.unwrap_or(default.epa_tolerance),
            parallel_epsilon: parallel_epsilon.unwrap_or(default.parallel_epsilon),
            positional_correction: positional_correction.unwrap_or(default.positional_correction),
        }
    }

    /// Checks that the iteration caps are usable and the tolerances are positive.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.gjk_max_iterations == 0 || self.epa_max_iterations == 0 {
            return Err(PhysicsError::CalculationError("Iteration caps must be non-zero".to_string()));
        }
        if self.epa_tolerance <= 0.0 || self.parallel_epsilon <= 0.0 {
            return Err(PhysicsError::CalculationError("Tolerances must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.positional_correction) {
            return Err(PhysicsError::CalculationError("Positional correction must be within [0, 1]".to_string()));
        }
        Ok(())
    }
}
