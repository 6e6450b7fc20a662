use std::collections::HashMap;
use crate::models::{BodyHandle, CollisionResult, ContactPair, Transform};
use crate::utils::{
    add_vectors, cross_product, dot_product, normalize_vector, scale_vector, sign, subtract_vectors,
    vector_magnitude,
};

/// Bits 1..=15, one per candidate axis. Bit 0 is reserved.
pub const ALL_AXES: u16 = 0xFFFE;

/// Per-pair record of which candidate axes were separating at the previous evaluation.
///
/// Keys are canonical: the first handle is the operand passed first to [`box_box`].
#[derive(Debug, Clone, Default)]
pub struct AxisStateCache {
    states: HashMap<(BodyHandle, BodyHandle), u16>,
}

impl AxisStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored mask for the pair, or [`ALL_AXES`] if the pair was never evaluated.
    pub fn get(&self, a: BodyHandle, b: BodyHandle) -> u16 {
        self.states.get(&(a, b)).copied().unwrap_or(ALL_AXES)
    }

    pub fn state_mut(&mut self, a: BodyHandle, b: BodyHandle) -> &mut u16 {
        self.states.entry((a, b)).or_insert(ALL_AXES)
    }

    /// Drops every state involving `handle`.
    pub fn forget(&mut self, handle: BodyHandle) {
        self.states.retain(|&(a, b), _| a != handle && b != handle);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// One oriented box in world space, prepared for the axis tests.
struct OrientedBox {
    center: (f64, f64, f64),
    axes: [(f64, f64, f64); 3],
    half_extents: [f64; 3],
}

impl OrientedBox {
    fn new(transform: &Transform, half_extents: (f64, f64, f64)) -> Self {
        let axis = |i: usize| normalize_vector(transform.axis(i)).unwrap_or((0.0, 0.0, 0.0));
        Self {
            center: transform.translation,
            axes: [axis(0), axis(1), axis(2)],
            half_extents: [half_extents.0, half_extents.1, half_extents.2],
        }
    }

    fn corners(&self) -> [(f64, f64, f64); 8] {
        let mut corners = [self.center; 8];
        for (n, corner) in corners.iter_mut().enumerate() {
            for k in 0..3 {
                let s = if n & (1 << k) == 0 { -1.0 } else { 1.0 };
                *corner = add_vectors(*corner, scale_vector(self.axes[k], s * self.half_extents[k]));
            }
        }
        corners
    }

    /// Half-length of the box's projection onto a unit axis.
    fn reach(&self, axis: (f64, f64, f64)) -> f64 {
        (0..3).map(|k| self.half_extents[k] * dot_product(self.axes[k], axis).abs()).sum()
    }

    /// Point of the box reached by walking from the centre along `dir`, per axis sign.
    fn support_toward(&self, dir: (f64, f64, f64), skip: Option<usize>) -> (f64, f64, f64) {
        (0..3)
            .filter(|&k| Some(k) != skip)
            .fold(self.center, |p, k| {
                let s = sign(dot_product(self.axes[k], dir));
                add_vectors(p, scale_vector(self.axes[k], s * self.half_extents[k]))
            })
    }
}

fn project(corners: &[(f64, f64, f64); 8], axis: (f64, f64, f64)) -> (f64, f64) {
    corners.iter().fold((f64::MAX, f64::MIN), |(min, max), &c| {
        let p = dot_product(c, axis);
        (min.min(p), max.max(p))
    })
}

/// Unit candidate axis for index 1..=15, `None` for a degenerate cross product.
fn candidate_axis(a: &OrientedBox, b: &OrientedBox, index: usize, parallel_epsilon: f64) -> Option<(f64, f64, f64)> {
    match index {
        1..=3 => Some(a.axes[index - 1]),
        4..=6 => Some(b.axes[index - 4]),
        _ => {
            let (i, j) = ((index - 7) / 3, (index - 7) % 3);
            let l = cross_product(a.axes[i], b.axes[j]);
            if vector_magnitude(l) < parallel_epsilon {
                None
            } else {
                normalize_vector(l).ok()
            }
        }
    }
}

/// Oriented box / oriented box test using the Separating Axis Theorem.
///
/// The 15 candidate axes are A's face normals (1-3), B's face normals (4-6) and the nine edge
/// cross products `A_i × B_j` (index `7 + 3i + j`). The first separating axis ends the test and
/// becomes the pair's new state.
///
/// When every axis overlaps, the contact axis is the lowest axis that was separating at the
/// previous evaluation and is still a valid axis now. If only degenerate edge axes remain, the
/// face axis of least overlap is used instead. If no axis was separating, the pair is considered
/// already resolved and `None` is returned. `state` is overwritten with the axes separating now.
///
/// # Arguments
/// * `transform_a`, `half_extents_a` - Box A.
/// * `transform_b`, `half_extents_b` - Box B.
/// * `state` - The pair's axis mask; start new pairs from [`ALL_AXES`].
/// * `parallel_epsilon` - Cross products shorter than this cannot separate.
///
/// # Returns
/// A contact pair whose A normal points from A to B. Both sides share one position.
///
/// # Example
/// ```
/// use rs_rigidbody::interactions::{box_box, ALL_AXES};
/// use rs_rigidbody::models::Transform;
///
/// let a = Transform::identity();
/// let b = Transform::from_translation((100.0, 0.0, 0.0));
/// let mut state = ALL_AXES;
///
/// assert!(box_box(&a, (1.0, 1.0, 1.0), &b, (1.0, 1.0, 1.0), &mut state, 1e-6).is_none());
/// assert_eq!(state, 1 << 1);
/// ```
pub fn box_box(
    transform_a: &Transform,
    half_extents_a: (f64, f64, f64),
    transform_b: &Transform,
    half_extents_b: (f64, f64, f64),
    state: &mut u16,
    parallel_epsilon: f64,
) -> CollisionResult {
    let a = OrientedBox::new(transform_a, half_extents_a);
    let b = OrientedBox::new(transform_b, half_extents_b);
    let corners_a = a.corners();
    let corners_b = b.corners();

    for index in 1..=15 {
        let Some(axis) = candidate_axis(&a, &b, index, parallel_epsilon) else { continue };
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);

        if max_a < min_b || max_b < min_a {
            *state = 1 << index;
            return None;
        }
    }

    // Nothing separates now, so the axes that just started overlapping are exactly
    // the previously separating ones.
    let filter = *state & ALL_AXES;
    *state = 0;

    if filter == 0 {
        return None;
    }

    // A remembered edge axis may have gone parallel since; take the next usable bit.
    let remembered = (1..=15)
        .filter(|&index| filter & (1 << index) != 0)
        .find_map(|index| candidate_axis(&a, &b, index, parallel_epsilon).map(|axis| (index, axis)));

    let (index, axis) = match remembered {
        Some(found) => found,
        None => shallowest_face_axis(&a, &b),
    };
    Some(contact_on_axis(&a, &b, index, axis))
}

/// Face axis (1-6) with the least overlap.
fn shallowest_face_axis(a: &OrientedBox, b: &OrientedBox) -> (usize, (f64, f64, f64)) {
    let d = subtract_vectors(b.center, a.center);
    let overlap = |axis: (f64, f64, f64)| a.reach(axis) + b.reach(axis) - dot_product(d, axis).abs();

    (1..=6)
        .map(|index| (index, if index <= 3 { a.axes[index - 1] } else { b.axes[index - 4] }))
        .min_by(|(_, l), (_, r)| overlap(*l).total_cmp(&overlap(*r)))
        .unwrap_or((1, a.axes[0]))
}

fn contact_on_axis(a: &OrientedBox, b: &OrientedBox, index: usize, axis: (f64, f64, f64)) -> ContactPair {
    let d = subtract_vectors(b.center, a.center);
    let normal = scale_vector(axis, sign(dot_product(axis, d)));
    let penetration = dot_product(d, normal).abs() - (a.reach(normal) + b.reach(normal));

    let position = match index {
        1..=3 => b.support_toward(scale_vector(normal, -1.0), None),
        4..=6 => a.support_toward(normal, None),
        _ => {
            let (i, j) = ((index - 7) / 3, (index - 7) % 3);
            edge_contact(a, i, b, j, normal)
        }
    };

    ContactPair::from_shared(position, normal, penetration)
}

/// Midpoint of the closest points between A's edge along axis `i` and B's edge along axis `j`.
fn edge_contact(a: &OrientedBox, i: usize, b: &OrientedBox, j: usize, normal: (f64, f64, f64)) -> (f64, f64, f64) {
    let u = a.axes[i];
    let v = b.axes[j];
    let point_a = a.support_toward(normal, Some(i));
    let point_b = b.support_toward(scale_vector(normal, -1.0), Some(j));

    let r = subtract_vectors(point_a, point_b);
    let uv = dot_product(u, v);
    let c = dot_product(u, r);
    let f = dot_product(v, r);
    let denom = 1.0 - uv * uv;

    let s = if denom.abs() > 1e-12 { (uv * f - c) / denom } else { 0.0 };
    let s = s.clamp(-a.half_extents[i], a.half_extents[i]);
    let t = (uv * s + f).clamp(-b.half_extents[j], b.half_extents[j]);

    let closest_a = add_vectors(point_a, scale_vector(u, s));
    let closest_b = add_vectors(point_b, scale_vector(v, t));
    scale_vector(add_vectors(closest_a, closest_b), 0.5)
}
