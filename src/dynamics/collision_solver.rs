use std::collections::HashSet;
use log::{debug, trace};
use crate::models::{BodyHandle, ContactPair, Matrix3};
use crate::registry::CollisionManager;
use crate::utils::{cross_product, dot_product, negate_vector, scale_vector, subtract_vectors};
use crate::world::BodySet;

/// Snapshot of the quantities the impulse formula needs from one body.
#[derive(Debug, Clone, Copy)]
struct ImpulseState {
    center: (f64, f64, f64),
    velocity: (f64, f64, f64),
    angular_velocity: (f64, f64, f64),
    inverse_mass: f64,
    inverse_inertia: Matrix3,
    elasticity: f64,
    is_kinematic: bool,
}

impl ImpulseState {
    fn of(bodies: &BodySet, handle: BodyHandle) -> Option<Self> {
        let rb = bodies.rigid_body(handle)?;
        Some(Self {
            center: rb.position(),
            velocity: rb.linear_velocity(),
            angular_velocity: rb.angular_velocity(),
            inverse_mass: rb.inverse_mass(),
            inverse_inertia: rb.inverse_inertia_world(),
            elasticity: rb.elasticity(),
            is_kinematic: rb.is_kinematic(),
        })
    }
}

/// Outcome of resolving one contact pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Impulse magnitude applied along the normal; zero when the bodies were separating.
    pub impulse: f64,
    /// Distance the pair was pushed apart by positional correction.
    pub correction: f64,
}

/// Turns the registry's per-step contacts into impulses and positional corrections.
#[derive(Debug, Clone, Copy)]
pub struct CollisionSolver {
    positional_correction: f64,
}

impl Default for CollisionSolver {
    fn default() -> Self {
        Self { positional_correction: 1.0 }
    }
}

impl CollisionSolver {
    pub fn new(positional_correction: f64) -> Self {
        Self { positional_correction: positional_correction.clamp(0.0, 1.0) }
    }

    /// Resolves the current step's collisions.
    ///
    /// Each dynamic rigid body resolves its first contact (in handle order) with another rigid
    /// body. A pair is resolved once even though both bodies report it. Kinematic partners act
    /// as infinite mass.
    ///
    /// # Returns
    /// The number of pairs resolved.
    pub fn solve(&self, manager: &mut CollisionManager, bodies: &mut BodySet) -> usize {
        let collisions = manager.collisions_for_all(bodies);
        let mut resolved: HashSet<(BodyHandle, BodyHandle)> = HashSet::new();

        for (target, contacts) in &collisions {
            let Some(target_body) = bodies.rigid_body(*target) else { continue };
            if target_body.is_kinematic() {
                continue;
            }

            let Some((other, pair)) = contacts
                .iter()
                .find(|(other, _)| bodies.rigid_body(**other).is_some())
            else {
                trace!("Body {:?} only touches non-rigid bodies", target);
                continue;
            };

            let key = if target < other { (*target, *other) } else { (*other, *target) };
            if !resolved.insert(key) {
                continue;
            }

            if let Some(resolution) = self.resolve_pair(bodies, *target, *other, pair) {
                debug!("Resolved {:?} against {:?}: {:?}", target, other, resolution);
            }
        }

        resolved.len()
    }

    /// Applies the impulse and positional correction for one contact, seen from `target`.
    ///
    /// `pair.a` must describe `target` and `pair.b` the `other` body.
    pub fn resolve_pair(
        &self,
        bodies: &mut BodySet,
        target: BodyHandle,
        other: BodyHandle,
        pair: &ContactPair,
    ) -> Option<Resolution> {
        let s1 = ImpulseState::of(bodies, target)?;
        let s2 = ImpulseState::of(bodies, other)?;
        if s1.is_kinematic {
            return None;
        }

        let n = pair.a.normal;
        let r1 = subtract_vectors(pair.a.position, s1.center);
        let r2 = subtract_vectors(pair.b.position, s2.center);
        let r1n = cross_product(r1, n);
        let r2n = cross_product(r2, n);

        let closing = dot_product(subtract_vectors(s1.velocity, s2.velocity), n)
            + dot_product(r1n, s1.angular_velocity)
            - dot_product(r2n, s2.angular_velocity);
        let denominator = s1.inverse_mass
            + s2.inverse_mass
            + dot_product(r1n, s1.inverse_inertia.multiply_vector(r1n))
            + dot_product(r2n, s2.inverse_inertia.multiply_vector(r2n));

        let mut impulse = 0.0;
        if closing > 0.0 && denominator > 0.0 {
            impulse = (1.0 + s1.elasticity) * closing / denominator;
            let j = scale_vector(n, impulse);

            if let Some(rb) = bodies.rigid_body_mut(target) {
                rb.apply_linear_impulse(negate_vector(j));
                rb.apply_angular_impulse(cross_product(r1, negate_vector(j)));
            }
            if !s2.is_kinematic {
                if let Some(rb) = bodies.rigid_body_mut(other) {
                    rb.apply_linear_impulse(j);
                    rb.apply_angular_impulse(cross_product(r2, j));
                }
            }
        }

        let depth = (-pair.a.penetration).max(0.0) * self.positional_correction;
        if depth > 0.0 {
            let total = s1.inverse_mass + s2.inverse_mass;
            let share = if s2.is_kinematic || total <= 0.0 { 1.0 } else { s1.inverse_mass / total };

            if let Some(rb) = bodies.rigid_body_mut(target) {
                rb.translate_by(scale_vector(n, -depth * share));
            }
            if share < 1.0 {
                if let Some(rb) = bodies.rigid_body_mut(other) {
                    rb.translate_by(scale_vector(n, depth * (1.0 - share)));
                }
            }
        }

        Some(Resolution { impulse, correction: depth })
    }
}
