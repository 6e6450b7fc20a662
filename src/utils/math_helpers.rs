/// Adds two 3D vectors component-wise.
#[inline]
pub fn add_vectors(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

/// Subtracts `b` from `a` component-wise.
#[inline]
pub fn subtract_vectors(a: (f64, f64, f64), b: (f64, f64, f64)) -> (f64, f64, f64) {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

/// Multiplies every component of `v` by `s`.
#[inline]
pub fn scale_vector(v: (f64, f64, f64), s: f64) -> (f64, f64, f64) {
    (v.0 * s, v.1 * s, v.2 * s)
}

/// Negates every component of `v`.
#[inline]
pub fn negate_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    (-v.0, -v.1, -v.2)
}

/// Calculates the cross product of two 3D vectors.
///
/// # Arguments
/// * `v1` - The first vector as a tuple (x, y, z).
/// * `v2` - The second vector as a tuple (x, y, z).
///
/// # Returns
/// The cross product vector as a tuple (x, y, z).
///
/// # Example
/// ```
/// use rs_rigidbody::utils::cross_product;
///
/// let v1 = (1.0, 0.0, 0.0);
/// let v2 = (0.0, 1.0, 0.0);
/// let result = cross_product(v1, v2);
///
/// assert_eq!(result, (0.0, 0.0, 1.0));
/// ```
pub fn cross_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0
    )
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_rigidbody::utils::dot_product;
///
/// assert_eq!(dot_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), 32.0);
/// ```
#[inline]
pub fn dot_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> f64 {
    v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2
}

/// Calculates the magnitude (length) of a 3D vector.
#[inline]
pub fn vector_magnitude(v: (f64, f64, f64)) -> f64 {
    dot_product(v, v).sqrt()
}

/// Normalizes a 3D vector (makes it a unit vector).
///
/// # Errors
/// Returns an error if the input is a zero vector.
///
/// # Example
/// ```
/// use rs_rigidbody::utils::normalize_vector;
///
/// let normalized = normalize_vector((3.0, 0.0, 4.0)).unwrap();
///
/// assert!((normalized.0 - 0.6).abs() < 1e-10);
/// assert!((normalized.2 - 0.8).abs() < 1e-10);
/// assert!(normalize_vector((0.0, 0.0, 0.0)).is_err());
/// ```
pub fn normalize_vector(v: (f64, f64, f64)) -> Result<(f64, f64, f64), &'static str> {
    let magnitude = vector_magnitude(v);

    if magnitude == 0.0 {
        return Err("Cannot normalize a zero vector");
    }

    Ok((v.0 / magnitude, v.1 / magnitude, v.2 / magnitude))
}

/// Triple product (a × b) × c
#[inline]
pub fn triple_product(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> (f64, f64, f64) {
    cross_product(cross_product(a, b), c)
}

/// Returns a unit vector perpendicular to `v`, built against the axis `v` is least aligned with.
pub fn perpendicular_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    let axis = if v.0.abs() <= v.1.abs() && v.0.abs() <= v.2.abs() {
        (1.0, 0.0, 0.0)
    } else if v.1.abs() <= v.0.abs() && v.1.abs() <= v.2.abs() {
        (0.0, 1.0, 0.0)
    } else {
        (0.0, 0.0, 1.0)
    };

    // Only the zero vector has no perpendicular; any axis will do for it.
    normalize_vector(cross_product(v, axis)).unwrap_or((0.0, 1.0, 0.0))
}

/// Returns `1.0` for non-negative values and `-1.0` otherwise.
#[inline]
pub fn sign(value: f64) -> f64 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

/// Component-wise minimum and maximum of a point set, `None` when empty.
pub fn bounding_box(points: &[(f64, f64, f64)]) -> Option<((f64, f64, f64), (f64, f64, f64))> {
    let first = *points.first()?;
    Some(points.iter().skip(1).fold((first, first), |(min, max), p| {
        (
            (min.0.min(p.0), min.1.min(p.1), min.2.min(p.2)),
            (max.0.max(p.0), max.1.max(p.1), max.2.max(p.2)),
        )
    }))
}
