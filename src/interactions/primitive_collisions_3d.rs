use log::trace;
use crate::models::{CollisionResult, ContactPair, Transform};
use crate::utils::{
    add_vectors, normalize_vector, scale_vector, sign, subtract_vectors, vector_magnitude,
};

/// Closed-form sphere/sphere test.
///
/// Contact exists when the centres are at most `radius_a + radius_b` apart. Both sides share
/// the midpoint of the two surface points on the centre line.
///
/// # Arguments
/// * `center_a` - World centre of sphere A.
/// * `radius_a` - Radius of sphere A.
/// * `center_b` - World centre of sphere B.
/// * `radius_b` - Radius of sphere B.
///
/// # Returns
/// `Some(ContactPair)` with A's normal pointing towards B, `None` when apart.
///
/// # Example
/// ```
/// use rs_rigidbody::interactions::sphere_sphere;
///
/// let pair = sphere_sphere((0.0, 0.0, 0.0), 1.0, (1.5, 0.0, 0.0), 1.0).unwrap();
///
/// assert_eq!(pair.a.normal, (1.0, 0.0, 0.0));
/// assert_eq!(pair.b.normal, (-1.0, 0.0, 0.0));
/// assert!((pair.a.penetration + 0.5).abs() < 1e-12);
/// ```
pub fn sphere_sphere(
    center_a: (f64, f64, f64),
    radius_a: f64,
    center_b: (f64, f64, f64),
    radius_b: f64,
) -> CollisionResult {
    let d = subtract_vectors(center_b, center_a);
    let distance = vector_magnitude(d);
    let reach = radius_a + radius_b;

    if distance > reach {
        return None;
    }

    let normal = normalize_vector(d).unwrap_or_else(|_| {
        trace!("Concentric spheres; picking +X as the contact normal");
        (1.0, 0.0, 0.0)
    });

    let surface_a = add_vectors(center_a, scale_vector(normal, radius_a));
    let surface_b = subtract_vectors(center_b, scale_vector(normal, radius_b));
    let position = scale_vector(add_vectors(surface_a, surface_b), 0.5);

    Some(ContactPair::from_shared(position, normal, distance - reach))
}

/// Closed-form oriented box / sphere test.
///
/// The sphere centre is clamped to the box in box space. When the centre lies inside the box
/// the face of least penetration supplies the normal.
///
/// Returns A (the box) with a normal pointing towards the sphere.
pub fn box_sphere(
    box_transform: &Transform,
    half_extents: (f64, f64, f64),
    sphere_center: (f64, f64, f64),
    radius: f64,
) -> CollisionResult {
    let to_local = box_transform.inverse()?;
    let local = to_local.transform_point(sphere_center);
    let h = [half_extents.0, half_extents.1, half_extents.2];
    let l = [local.0, local.1, local.2];

    let clamped = (
        l[0].clamp(-h[0], h[0]),
        l[1].clamp(-h[1], h[1]),
        l[2].clamp(-h[2], h[2]),
    );
    let closest = box_transform.transform_point(clamped);
    let d = subtract_vectors(sphere_center, closest);
    let distance = vector_magnitude(d);

    if distance > radius {
        return None;
    }

    // Clamping leaves an interior centre untouched; decide in box space to stay clear of rounding.
    if clamped != local {
        if let Ok(normal) = normalize_vector(d) {
            return Some(ContactPair::from_shared(closest, normal, distance - radius));
        }
    }

    // Centre inside the box: push out through the nearest face.
    let (axis, depth) = (0..3)
        .map(|i| (i, h[i] - l[i].abs()))
        .fold((0, f64::MAX), |best, candidate| if candidate.1 < best.1 { candidate } else { best });

    let mut face_point = l;
    face_point[axis] = sign(l[axis]) * h[axis];
    let position = box_transform.transform_point((face_point[0], face_point[1], face_point[2]));
    let mut face_normal = [0.0; 3];
    face_normal[axis] = sign(l[axis]);
    let normal = normalize_vector(box_transform.transform_vector((face_normal[0], face_normal[1], face_normal[2])))
        .unwrap_or((1.0, 0.0, 0.0));

    Some(ContactPair::from_shared(position, normal, -(depth + radius)))
}
