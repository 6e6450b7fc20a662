use rayon::prelude::*;
use crate::dynamics::RigidBody;
use crate::models::{Body, BodyHandle};

/// A slot of the body arena: either a static collider or a simulated rigid body.
#[derive(Debug, Clone)]
pub enum BodyEntry {
    Fixed(Body),
    Rigid(RigidBody),
}

impl BodyEntry {
    pub fn body(&self) -> &Body {
        match self {
            BodyEntry::Fixed(body) => body,
            BodyEntry::Rigid(rigid_body) => rigid_body.body(),
        }
    }

    pub fn rigid_body(&self) -> Option<&RigidBody> {
        match self {
            BodyEntry::Rigid(rigid_body) => Some(rigid_body),
            BodyEntry::Fixed(_) => None,
        }
    }

    pub fn rigid_body_mut(&mut self) -> Option<&mut RigidBody> {
        match self {
            BodyEntry::Rigid(rigid_body) => Some(rigid_body),
            BodyEntry::Fixed(_) => None,
        }
    }
}

/// Arena of bodies addressed by [`BodyHandle`]. Removed slots are never reused.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    entries: Vec<Option<BodyEntry>>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: BodyEntry) -> BodyHandle {
        self.entries.push(Some(entry));
        BodyHandle(self.entries.len() - 1)
    }

    pub fn insert_body(&mut self, body: Body) -> BodyHandle {
        self.insert(BodyEntry::Fixed(body))
    }

    pub fn insert_rigid_body(&mut self, rigid_body: RigidBody) -> BodyHandle {
        self.insert(BodyEntry::Rigid(rigid_body))
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<BodyEntry> {
        self.entries.get_mut(handle.0).and_then(Option::take)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&BodyEntry> {
        self.entries.get(handle.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut BodyEntry> {
        self.entries.get_mut(handle.0).and_then(Option::as_mut)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.get(handle).map(BodyEntry::body)
    }

    pub fn rigid_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.get(handle).and_then(BodyEntry::rigid_body)
    }

    pub fn rigid_body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.get_mut(handle).and_then(BodyEntry::rigid_body_mut)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every body. Handles handed out before stay retired.
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &BodyEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().map(|e| (BodyHandle(i), e)))
    }

    /// Every live rigid body, visited in parallel.
    pub fn par_rigid_bodies_mut(&mut self) -> impl ParallelIterator<Item = &mut RigidBody> {
        self.entries
            .par_iter_mut()
            .filter_map(|entry| entry.as_mut().and_then(BodyEntry::rigid_body_mut))
    }
}
