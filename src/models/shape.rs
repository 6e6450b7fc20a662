use crate::utils::{vector_magnitude, scale_vector};

/// Closed set of collidable geometry kinds.
///
/// The derived ordering doubles as the dispatch priority: the higher kind is
/// always passed first to a narrow-phase test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Convex,
    Sphere,
    Box,
}

/// Immutable local-space geometry of a collider.
///
/// A shape never owns its transform; the owning [`Body`](crate::models::Body) supplies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Oriented box centred on the local origin.
    Box { half_extents: (f64, f64, f64) },
    /// Sphere centred on the local origin.
    Sphere { radius: f64 },
    /// Arbitrary convex hull given by its local vertices.
    Convex { vertices: Vec<(f64, f64, f64)> },
}

/// Unit icosahedron used as the vertex set of a sphere.
const ICOSAHEDRON_T: f64 = 1.618_033_988_749_895;

impl Shape {
    pub fn new_box(half_extents: (f64, f64, f64)) -> Self {
        Shape::Box { half_extents }
    }

    pub fn new_sphere(radius: f64) -> Self {
        Shape::Sphere { radius }
    }

    pub fn new_convex(vertices: Vec<(f64, f64, f64)>) -> Self {
        Shape::Convex { vertices }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Convex { .. } => ShapeKind::Convex,
        }
    }

    pub fn priority(&self) -> u8 {
        match self.kind() {
            ShapeKind::Box => 2,
            ShapeKind::Sphere => 1,
            ShapeKind::Convex => 0,
        }
    }

    /// Local-space vertex set, used for inertia and as the GJK point cloud.
    ///
    /// Box corners follow the order `(-,-,-) (+,-,-) (-,-,+) (+,-,+) (-,+,-) (+,+,-) (-,+,+) (+,+,+)`.
    pub fn local_vertices(&self) -> Vec<(f64, f64, f64)> {
        match self {
            Shape::Box { half_extents: (x, y, z) } => {
                let mut corners = Vec::with_capacity(8);
                for sy in [-1.0, 1.0] {
                    for sz in [-1.0, 1.0] {
                        for sx in [-1.0, 1.0] {
                            corners.push((sx * x, sy * y, sz * z));
                        }
                    }
                }
                corners
            }
            Shape::Sphere { radius } => {
                let t = ICOSAHEDRON_T;
                let raw = [
                    (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
                    (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
                    (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
                ];
                let norm = (1.0 + t * t).sqrt();
                raw.iter().map(|&v| scale_vector(v, radius / norm)).collect()
            }
            Shape::Convex { vertices } => vertices.clone(),
        }
    }

    /// Radius of the smallest origin-centred sphere enclosing the shape.
    pub fn bounding_radius(&self) -> f64 {
        match self {
            Shape::Box { half_extents } => vector_magnitude(*half_extents),
            Shape::Sphere { radius } => *radius,
            Shape::Convex { vertices } => vertices
                .iter()
                .map(|&v| vector_magnitude(v))
                .fold(0.0, f64::max),
        }
    }
}
