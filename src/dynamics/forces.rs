/// How long an external force stays attached to a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Applied every step until removed.
    Continuous,
    /// Applied during the next step only, then dropped.
    Impulse,
}

/// A force acting at a point given relative to the body's centre of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExternalForce {
    pub position: (f64, f64, f64),
    pub force: (f64, f64, f64),
    pub mode: ForceMode,
}

impl ExternalForce {
    pub fn continuous(position: (f64, f64, f64), force: (f64, f64, f64)) -> Self {
        Self { position, force, mode: ForceMode::Continuous }
    }

    pub fn impulse(position: (f64, f64, f64), force: (f64, f64, f64)) -> Self {
        Self { position, force, mode: ForceMode::Impulse }
    }
}
