use approx::AbsDiffEq;
use crate::utils::negate_vector;

/// Contact as seen from one body of a colliding pair.
///
/// `penetration` is `distance - reach`: zero when touching, negative when overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub position: (f64, f64, f64),
    pub normal: (f64, f64, f64),
    pub penetration: f64,
}

/// Both sides of a contact. `a.normal` points from A to B and `b.normal` the other way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPair {
    pub a: Contact,
    pub b: Contact,
}

/// `None` means the pair is not in contact this step.
pub type CollisionResult = Option<ContactPair>;

impl ContactPair {
    pub fn new(a: Contact, b: Contact) -> Self {
        Self { a, b }
    }

    /// Pair sharing one world position, with `normal` pointing from A to B.
    pub fn from_shared(position: (f64, f64, f64), normal: (f64, f64, f64), penetration: f64) -> Self {
        Self {
            a: Contact { position, normal, penetration },
            b: Contact { position, normal: negate_vector(normal), penetration },
        }
    }

    /// The same contact seen with the operands exchanged.
    pub fn swapped(self) -> Self {
        Self { a: self.b, b: self.a }
    }
}

impl AbsDiffEq for Contact {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        let close = |a: (f64, f64, f64), b: (f64, f64, f64)| {
            a.0.abs_diff_eq(&b.0, epsilon) && a.1.abs_diff_eq(&b.1, epsilon) && a.2.abs_diff_eq(&b.2, epsilon)
        };
        close(self.position, other.position)
            && close(self.normal, other.normal)
            && self.penetration.abs_diff_eq(&other.penetration, epsilon)
    }
}

impl AbsDiffEq for ContactPair {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.a.abs_diff_eq(&other.a, epsilon) && self.b.abs_diff_eq(&other.b, epsilon)
    }
}
