use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or stepping rigid bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value (e.g., negative or zero mass).
    InvalidMass,
    /// Indicates an invalid elasticity value (e.g., negative restitution).
    InvalidElasticity,
    /// Indicates a force index that does not refer to a stored external force.
    InvalidForceIndex(usize),
    /// Indicates a handle that does not refer to a live body.
    UnknownBody(usize),
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidElasticity => write!(f, "Invalid elasticity value"),
            PhysicsError::InvalidForceIndex(index) => write!(f, "No external force at index {}", index),
            PhysicsError::UnknownBody(handle) => write!(f, "No live body with handle {}", handle),
            PhysicsError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for PhysicsError {}
