use std::collections::{BTreeMap, HashMap};
use log::{debug, trace};
use crate::interactions::{collide, AxisStateCache};
use crate::models::{BodyHandle, CollisionResult, ContactPair};
use crate::utils::PhysicsConstants;
use crate::world::BodySet;

/// Contacts of one body, keyed by the other body of each pair.
pub type ContactMap = BTreeMap<BodyHandle, ContactPair>;

/// Registry of collidable bodies with a per-step, symmetric result cache.
///
/// Every registered pair is tested (no broad phase). Results computed for `(a, b)` are reused,
/// swapped, when `(b, a)` is queried during the same step. Box/box axis states persist across
/// steps until a body leaves the registry.
#[derive(Debug, Clone, Default)]
pub struct CollisionManager {
    bodies: Vec<BodyHandle>,
    cache: HashMap<BodyHandle, HashMap<BodyHandle, CollisionResult>>,
    axis_states: AxisStateCache,
    constants: PhysicsConstants,
}

impl CollisionManager {
    pub fn new(constants: PhysicsConstants) -> Self {
        Self { constants, ..Self::default() }
    }

    pub fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    /// Registers `handle`. Returns `false` if it was already registered.
    pub fn add_body(&mut self, handle: BodyHandle) -> bool {
        if self.bodies.contains(&handle) {
            return false;
        }
        self.bodies.push(handle);
        true
    }

    /// Deregisters `handle` and forgets everything cached about it.
    pub fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let Some(index) = self.bodies.iter().position(|&h| h == handle) else {
            return false;
        };
        self.bodies.remove(index);
        self.cache.remove(&handle);
        self.cache.values_mut().for_each(|results| {
            results.remove(&handle);
        });
        self.axis_states.forget(handle);
        true
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(&handle)
    }

    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Scene teardown: drops bodies, cached results and axis states.
    pub fn clear_all(&mut self) {
        self.bodies.clear();
        self.cache.clear();
        self.axis_states.clear();
    }

    /// Invalidates this step's results. Axis states are kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Result cached this step for `target` against `other`, from either direction.
    pub fn cached_result(&self, target: BodyHandle, other: BodyHandle) -> Option<CollisionResult> {
        if let Some(result) = self.cache.get(&target).and_then(|results| results.get(&other)) {
            return Some(*result);
        }
        self.cache
            .get(&other)
            .and_then(|results| results.get(&target))
            .map(|result| result.map(ContactPair::swapped))
    }

    pub fn axis_states(&self) -> &AxisStateCache {
        &self.axis_states
    }

    /// Contacts between `target` and every other registered body.
    ///
    /// Handles missing from `bodies` contribute nothing.
    pub fn collisions_for(&mut self, target: BodyHandle, bodies: &BodySet) -> ContactMap {
        let mut contacts = ContactMap::new();
        let Some(target_body) = bodies.body(target) else {
            trace!("Body {:?} is registered but not alive", target);
            return contacts;
        };

        for index in 0..self.bodies.len() {
            let other = self.bodies[index];
            if other == target {
                continue;
            }

            let result = match self.cached_result(target, other) {
                Some(result) => result,
                None => {
                    let Some(other_body) = bodies.body(other) else {
                        trace!("Body {:?} is registered but not alive", other);
                        continue;
                    };
                    let result = collide(target, target_body, other, other_body, &mut self.axis_states, &self.constants);
                    self.cache.entry(target).or_default().insert(other, result);
                    result
                }
            };

            if let Some(pair) = result {
                contacts.insert(other, pair);
            }
        }

        contacts
    }

    /// Clears the cache, then collects the contacts of every registered body.
    pub fn collisions_for_all(&mut self, bodies: &BodySet) -> BTreeMap<BodyHandle, ContactMap> {
        self.clear_cache();

        let mut all = BTreeMap::new();
        for index in 0..self.bodies.len() {
            let target = self.bodies[index];
            let contacts = self.collisions_for(target, bodies);
            if !contacts.is_empty() {
                all.insert(target, contacts);
            }
        }

        debug!("{} of {} bodies in contact", all.len(), self.bodies.len());
        all
    }
}
