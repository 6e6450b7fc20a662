use log::warn;
use crate::models::{Shape, Transform};
use crate::utils::{bounding_box, scale_vector, add_vectors, subtract_vectors};

/// Stable identity of a body inside a [`BodySet`](crate::world::BodySet).
///
/// Handles are arena indices and are never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

/// A collidable shape placed in the world.
///
/// The world transform is `parent · offset`: `parent` comes from the host
/// transform hierarchy (or the owning rigid body), `offset` centres the
/// collider inside the geometry it was fitted to.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    shape: Shape,
    offset: Transform,
    parent: Transform,
    local_to_world: Transform,
}

impl Body {
    pub fn new(shape: Shape) -> Self {
        Self::with_offset(shape, Transform::identity())
    }

    pub fn with_offset(shape: Shape, offset: Transform) -> Self {
        Self { shape, offset, parent: Transform::identity(), local_to_world: offset }
    }

    /// Fits a box collider to the axis-aligned bounds of a vertex set.
    ///
    /// An empty vertex set yields a zero-sized box that never generates useful contacts.
    ///
    /// # Example
    /// ```
    /// use rs_rigidbody::models::{Body, Shape};
    ///
    /// let body = Body::box_collider(&[(0.0, 0.0, 0.0), (2.0, 4.0, 6.0)]);
    ///
    /// assert_eq!(body.shape(), &Shape::new_box((1.0, 2.0, 3.0)));
    /// assert_eq!(body.world_center(), (1.0, 2.0, 3.0));
    /// ```
    pub fn box_collider(vertices: &[(f64, f64, f64)]) -> Self {
        let (center, half_extents) = fit_bounds(vertices);
        Self::with_offset(Shape::new_box(half_extents), Transform::from_translation(center))
    }

    /// Fits a sphere collider whose radius is the largest half-extent of the vertex bounds.
    pub fn sphere_collider(vertices: &[(f64, f64, f64)]) -> Self {
        let (center, half_extents) = fit_bounds(vertices);
        let radius = half_extents.0.max(half_extents.1).max(half_extents.2);
        Self::with_offset(Shape::new_sphere(radius), Transform::from_translation(center))
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn offset(&self) -> &Transform {
        &self.offset
    }

    pub fn parent_transform(&self) -> &Transform {
        &self.parent
    }

    pub fn local_to_world(&self) -> &Transform {
        &self.local_to_world
    }

    /// Replaces the parent transform and refreshes the cached world transform.
    pub fn set_parent_transform(&mut self, parent: Transform) {
        self.parent = parent;
        self.local_to_world = parent.multiply(&self.offset);
    }

    /// World position of the collider's local origin.
    pub fn world_center(&self) -> (f64, f64, f64) {
        self.local_to_world.translation
    }

    /// Shape vertices expressed in the parent's frame (offset applied, parent not).
    pub fn local_vertices(&self) -> Vec<(f64, f64, f64)> {
        self.shape
            .local_vertices()
            .into_iter()
            .map(|v| self.offset.transform_point(v))
            .collect()
    }

    pub fn world_vertices(&self) -> Vec<(f64, f64, f64)> {
        self.shape
            .local_vertices()
            .into_iter()
            .map(|v| self.local_to_world.transform_point(v))
            .collect()
    }
}

fn fit_bounds(vertices: &[(f64, f64, f64)]) -> ((f64, f64, f64), (f64, f64, f64)) {
    match bounding_box(vertices) {
        Some((min, max)) => (
            scale_vector(add_vectors(min, max), 0.5),
            scale_vector(subtract_vectors(max, min), 0.5),
        ),
        None => {
            warn!("Fitting a collider to an empty vertex set; the collider is degenerate");
            ((0.0, 0.0, 0.0), (0.0, 0.0, 0.0))
        }
    }
}
