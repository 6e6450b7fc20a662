use log::{debug, trace};
use crate::models::{Body, CollisionResult, Contact, ContactPair, Simplex, SupportPoint};
use crate::utils::{
    add_vectors, cross_product, dot_product, negate_vector, normalize_vector, perpendicular_vector,
    scale_vector, subtract_vectors, triple_product, vector_magnitude, PhysicsConstants,
};

const DEGENERATE_EPSILON: f64 = 1e-10;

/// A face of the EPA polytope, wound so that `normal` points away from the origin.
#[derive(Debug, Clone, Copy)]
struct Face {
    indices: [usize; 3],
    normal: (f64, f64, f64),
    distance: f64,
}

/// Penetration found by EPA: direction, depth and witness points on each shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Unit direction from A towards B.
    pub normal: (f64, f64, f64),
    /// Positive overlap depth along `normal`.
    pub depth: f64,
    pub point_a: (f64, f64, f64),
    pub point_b: (f64, f64, f64),
}

/// Vertex of `vertices` furthest along `direction`.
pub fn furthest_point(vertices: &[(f64, f64, f64)], direction: (f64, f64, f64)) -> Option<(f64, f64, f64)> {
    vertices
        .iter()
        .copied()
        .max_by(|p, q| dot_product(*p, direction).total_cmp(&dot_product(*q, direction)))
}

/// Support point of the Minkowski difference `A - B` along `direction`.
///
/// Returns `None` if either vertex set is empty.
pub fn support(
    vertices_a: &[(f64, f64, f64)],
    vertices_b: &[(f64, f64, f64)],
    direction: (f64, f64, f64),
) -> Option<SupportPoint> {
    let point_a = furthest_point(vertices_a, direction)?;
    let point_b = furthest_point(vertices_b, negate_vector(direction))?;
    Some(SupportPoint { point: subtract_vectors(point_a, point_b), point_a, point_b })
}

/// GJK intersection test over two world-space vertex sets.
///
/// # Arguments
/// * `vertices_a` - World vertices of shape A.
/// * `vertices_b` - World vertices of shape B.
/// * `initial_direction` - First search direction; the centre-to-centre vector works well.
/// * `max_iterations` - Safety cap on refinement steps.
///
/// # Returns
/// `Some(Simplex)` holding a tetrahedron that encloses the origin when the shapes intersect,
/// `None` otherwise.
pub fn gjk(
    vertices_a: &[(f64, f64, f64)],
    vertices_b: &[(f64, f64, f64)],
    initial_direction: (f64, f64, f64),
    max_iterations: usize,
) -> Option<Simplex> {
    let mut direction = normalize_vector(initial_direction).unwrap_or((1.0, 0.0, 0.0));
    let first = support(vertices_a, vertices_b, direction)?;

    let mut simplex = Simplex::new();
    simplex.push_front(first);
    direction = negate_vector(first.point);

    for _ in 0..max_iterations {
        if vector_magnitude(direction) < DEGENERATE_EPSILON {
            // The origin sits on the simplex: the shapes only touch.
            return None;
        }

        let point = support(vertices_a, vertices_b, direction)?;
        if dot_product(point.point, direction) <= 0.0 {
            return None;
        }

        simplex.push_front(point);
        if next_simplex(&mut simplex, &mut direction) {
            return Some(simplex);
        }
    }

    debug!("GJK stopped after {} iterations without a verdict", max_iterations);
    None
}

fn same_direction(direction: (f64, f64, f64), ao: (f64, f64, f64)) -> bool {
    dot_product(direction, ao) > 0.0
}

fn next_simplex(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    match simplex.len() {
        2 => line_case(simplex, direction),
        3 => triangle_case(simplex, direction),
        4 => tetrahedron_case(simplex, direction),
        _ => false,
    }
}

fn line_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let (a, b) = (simplex.a(), simplex.b());
    let ab = subtract_vectors(b.point, a.point);
    let ao = negate_vector(a.point);

    if same_direction(ab, ao) {
        let toward = triple_product(ab, ao, ab);
        *direction = if vector_magnitude(toward) > DEGENERATE_EPSILON {
            toward
        } else {
            // Origin on the segment; any perpendicular keeps the search going.
            perpendicular_vector(ab)
        };
    } else {
        simplex.assign(&[a]);
        *direction = ao;
    }

    false
}

fn triangle_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let (a, b, c) = (simplex.a(), simplex.b(), simplex.c());
    let ab = subtract_vectors(b.point, a.point);
    let ac = subtract_vectors(c.point, a.point);
    let ao = negate_vector(a.point);
    let abc = cross_product(ab, ac);

    if vector_magnitude(abc) < DEGENERATE_EPSILON {
        // Collinear: fall back to the newest edge.
        simplex.assign(&[a, b]);
        return line_case(simplex, direction);
    }

    if same_direction(cross_product(abc, ac), ao) {
        if same_direction(ac, ao) {
            simplex.assign(&[a, c]);
            *direction = triple_product(ac, ao, ac);
        } else {
            simplex.assign(&[a, b]);
            return line_case(simplex, direction);
        }
    } else if same_direction(cross_product(ab, abc), ao) {
        simplex.assign(&[a, b]);
        return line_case(simplex, direction);
    } else if dot_product(abc, ao) >= 0.0 {
        *direction = abc;
    } else {
        simplex.assign(&[a, c, b]);
        *direction = negate_vector(abc);
    }

    false
}

fn tetrahedron_case(simplex: &mut Simplex, direction: &mut (f64, f64, f64)) -> bool {
    let (a, b, c, d) = (simplex.a(), simplex.b(), simplex.c(), simplex.d());
    let ab = subtract_vectors(b.point, a.point);
    let ac = subtract_vectors(c.point, a.point);
    let ad = subtract_vectors(d.point, a.point);
    let ao = negate_vector(a.point);

    if dot_product(cross_product(ab, ac), ad).abs() < DEGENERATE_EPSILON {
        // Flat tetrahedron: keep the newest triangle and search off its plane.
        simplex.assign(&[a, b, c]);
        return triangle_case(simplex, direction);
    }

    let abc = cross_product(ab, ac);
    let acd = cross_product(ac, ad);
    let adb = cross_product(ad, ab);

    if same_direction(abc, ao) {
        simplex.assign(&[a, b, c]);
        return triangle_case(simplex, direction);
    }
    if same_direction(acd, ao) {
        simplex.assign(&[a, c, d]);
        return triangle_case(simplex, direction);
    }
    if same_direction(adb, ao) {
        simplex.assign(&[a, d, b]);
        return triangle_case(simplex, direction);
    }

    true
}

fn make_face(polytope: &[SupportPoint], indices: [usize; 3]) -> Face {
    let a = polytope[indices[0]].point;
    let b = polytope[indices[1]].point;
    let c = polytope[indices[2]].point;

    match normalize_vector(cross_product(subtract_vectors(b, a), subtract_vectors(c, a))) {
        Ok(normal) => {
            let distance = dot_product(normal, a);
            if distance < 0.0 {
                Face {
                    indices: [indices[0], indices[2], indices[1]],
                    normal: negate_vector(normal),
                    distance: -distance,
                }
            } else {
                Face { indices, normal, distance }
            }
        }
        // Degenerate faces are kept for topology but never chosen as nearest.
        Err(_) => Face { indices, normal: (0.0, 0.0, 0.0), distance: f64::MAX },
    }
}

fn nearest_face(faces: &[Face]) -> Option<Face> {
    faces.iter().copied().min_by(|f, g| f.distance.total_cmp(&g.distance))
}

/// Adds `edge` to the silhouette, or cancels it against its reverse if already present.
fn add_if_unique_edge(edges: &mut Vec<(usize, usize)>, edge: (usize, usize)) {
    match edges.iter().position(|&e| e == (edge.1, edge.0)) {
        Some(reverse) => {
            edges.swap_remove(reverse);
        }
        None => edges.push(edge),
    }
}

/// Expanding Polytope Algorithm, seeded with the enclosing tetrahedron produced by [`gjk`].
///
/// Stops once a new support point gains less than `tolerance` over the nearest face, or after
/// `max_iterations` expansions. In the latter case the nearest face found so far is returned as an
/// approximation.
pub fn epa(
    vertices_a: &[(f64, f64, f64)],
    vertices_b: &[(f64, f64, f64)],
    simplex: &Simplex,
    max_iterations: usize,
    tolerance: f64,
) -> Option<Penetration> {
    if simplex.len() < 4 {
        return None;
    }

    let mut polytope: Vec<SupportPoint> = simplex.as_slice().to_vec();
    let mut faces: Vec<Face> = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]]
        .iter()
        .map(|&indices| make_face(&polytope, indices))
        .collect();

    let mut nearest = nearest_face(&faces)?;
    let mut converged = false;

    for _ in 0..max_iterations {
        let point = support(vertices_a, vertices_b, nearest.normal)?;
        let gain = dot_product(nearest.normal, point.point) - nearest.distance;

        if gain.abs() <= tolerance {
            converged = true;
            break;
        }

        let mut silhouette: Vec<(usize, usize)> = Vec::new();
        faces.retain(|face| {
            let visible = dot_product(face.normal, subtract_vectors(point.point, polytope[face.indices[0]].point)) > 0.0;
            if visible {
                let [i, j, k] = face.indices;
                add_if_unique_edge(&mut silhouette, (i, j));
                add_if_unique_edge(&mut silhouette, (j, k));
                add_if_unique_edge(&mut silhouette, (k, i));
            }
            !visible
        });

        let new_index = polytope.len();
        polytope.push(point);
        for (i, j) in silhouette {
            faces.push(make_face(&polytope, [i, j, new_index]));
        }

        nearest = nearest_face(&faces)?;
    }

    if !converged {
        debug!("EPA hit its {} iteration cap; using the nearest face found so far", max_iterations);
    }

    let [i, j, k] = nearest.indices;
    let (a, b, c) = (polytope[i], polytope[j], polytope[k]);
    let (u, v, w) = barycentric(scale_vector(nearest.normal, nearest.distance), a.point, b.point, c.point);

    let weigh = |pa: (f64, f64, f64), pb: (f64, f64, f64), pc: (f64, f64, f64)| {
        add_vectors(add_vectors(scale_vector(pa, u), scale_vector(pb, v)), scale_vector(pc, w))
    };

    Some(Penetration {
        normal: nearest.normal,
        depth: nearest.distance,
        point_a: weigh(a.point_a, b.point_a, c.point_a),
        point_b: weigh(a.point_b, b.point_b, c.point_b),
    })
}

/// Barycentric coordinates of `p` with respect to triangle `(a, b, c)`.
fn barycentric(p: (f64, f64, f64), a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> (f64, f64, f64) {
    let v0 = subtract_vectors(b, a);
    let v1 = subtract_vectors(c, a);
    let v2 = subtract_vectors(p, a);

    let d00 = dot_product(v0, v0);
    let d01 = dot_product(v0, v1);
    let d11 = dot_product(v1, v1);
    let d20 = dot_product(v2, v0);
    let d21 = dot_product(v2, v1);
    let denom = d00 * d11 - d01 * d01;

    if denom.abs() < DEGENERATE_EPSILON {
        return (1.0, 0.0, 0.0);
    }

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    (1.0 - v - w, v, w)
}

/// Shape-agnostic convex test: GJK for intersection, then EPA for the contact.
///
/// Each side's position is the witness point on its own shape, so the two positions differ.
pub fn gjk_epa(body_a: &Body, body_b: &Body, constants: &PhysicsConstants) -> CollisionResult {
    let vertices_a = body_a.world_vertices();
    let vertices_b = body_b.world_vertices();
    if vertices_a.is_empty() || vertices_b.is_empty() {
        trace!("Skipping GJK for a body without vertices");
        return None;
    }

    let direction = subtract_vectors(body_b.world_center(), body_a.world_center());
    let simplex = gjk(&vertices_a, &vertices_b, direction, constants.gjk_max_iterations)?;
    let penetration = epa(
        &vertices_a,
        &vertices_b,
        &simplex,
        constants.epa_max_iterations,
        constants.epa_tolerance,
    )?;

    Some(ContactPair::new(
        Contact { position: penetration.point_a, normal: penetration.normal, penetration: -penetration.depth },
        Contact { position: penetration.point_b, normal: negate_vector(penetration.normal), penetration: -penetration.depth },
    ))
}
