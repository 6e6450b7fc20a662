use approx::AbsDiffEq;
use crate::utils::{add_vectors, dot_product};

/// Row-major 3x3 matrix used for rotations and inertia tensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub rows: [[f64; 3]; 3],
}

impl Matrix3 {
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn identity() -> Self {
        Self::diagonal(1.0, 1.0, 1.0)
    }

    pub fn zero() -> Self {
        Self { rows: [[0.0; 3]; 3] }
    }

    pub fn diagonal(x: f64, y: f64, z: f64) -> Self {
        Self {
            rows: [
                [x, 0.0, 0.0],
                [0.0, y, 0.0],
                [0.0, 0.0, z],
            ],
        }
    }

    /// Outer product `a bᵀ`.
    pub fn outer_product(a: (f64, f64, f64), b: (f64, f64, f64)) -> Self {
        let a = [a.0, a.1, a.2];
        let b = [b.0, b.1, b.2];
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = a[i] * b[j];
            }
        }
        Self { rows }
    }

    /// Rotation about the X axis by `angle` radians (right-handed).
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [1.0, 0.0, 0.0],
            [0.0, c, -s],
            [0.0, s, c],
        ])
    }

    /// Rotation about the Y axis by `angle` radians (right-handed).
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [c, 0.0, s],
            [0.0, 1.0, 0.0],
            [-s, 0.0, c],
        ])
    }

    /// Rotation about the Z axis by `angle` radians (right-handed).
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [c, -s, 0.0],
            [s, c, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Euler accumulator to matrix, composed as `Rx · Ry · Rz`.
    pub fn from_euler(rotation: (f64, f64, f64)) -> Self {
        Self::rotation_x(rotation.0)
            .multiply(&Self::rotation_y(rotation.1))
            .multiply(&Self::rotation_z(rotation.2))
    }

    pub fn row(&self, i: usize) -> (f64, f64, f64) {
        (self.rows[i][0], self.rows[i][1], self.rows[i][2])
    }

    pub fn column(&self, j: usize) -> (f64, f64, f64) {
        (self.rows[0][j], self.rows[1][j], self.rows[2][j])
    }

    pub fn multiply(&self, other: &Matrix3) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = dot_product(self.row(i), other.column(j));
            }
        }
        Self { rows }
    }

    pub fn multiply_vector(&self, v: (f64, f64, f64)) -> (f64, f64, f64) {
        (dot_product(self.row(0), v), dot_product(self.row(1), v), dot_product(self.row(2), v))
    }

    pub fn scale(&self, s: f64) -> Self {
        let mut rows = self.rows;
        rows.iter_mut().flatten().for_each(|value| *value *= s);
        Self { rows }
    }

    pub fn add(&self, other: &Matrix3) -> Self {
        let mut rows = self.rows;
        for (row, other_row) in rows.iter_mut().zip(other.rows.iter()) {
            for (value, other_value) in row.iter_mut().zip(other_row.iter()) {
                *value += other_value;
            }
        }
        Self { rows }
    }

    pub fn transpose(&self) -> Self {
        Self::new([
            [self.rows[0][0], self.rows[1][0], self.rows[2][0]],
            [self.rows[0][1], self.rows[1][1], self.rows[2][1]],
            [self.rows[0][2], self.rows[1][2], self.rows[2][2]],
        ])
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate, `None` for a singular matrix.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-12 || !det.is_finite() {
            return None;
        }

        let m = &self.rows;
        let inv_det = 1.0 / det;
        Some(Self::new([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl AbsDiffEq for Matrix3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// Affine local-to-world transform: a linear part followed by a translation.
///
/// Equivalent to a 4x4 homogeneous matrix whose last row is `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub linear: Matrix3,
    pub translation: (f64, f64, f64),
}

impl Transform {
    pub fn identity() -> Self {
        Self { linear: Matrix3::identity(), translation: (0.0, 0.0, 0.0) }
    }

    pub fn from_translation(translation: (f64, f64, f64)) -> Self {
        Self { linear: Matrix3::identity(), translation }
    }

    /// Builds `T(translation) · Rx · Ry · Rz` from an Euler accumulator.
    ///
    /// # Example
    /// ```
    /// use rs_rigidbody::models::Transform;
    ///
    /// let t = Transform::from_translation_rotation((1.0, 2.0, 3.0), (0.0, 0.0, std::f64::consts::FRAC_PI_2));
    /// let p = t.transform_point((1.0, 0.0, 0.0));
    ///
    /// assert!((p.0 - 1.0).abs() < 1e-12);
    /// assert!((p.1 - 3.0).abs() < 1e-12);
    /// assert!((p.2 - 3.0).abs() < 1e-12);
    /// ```
    pub fn from_translation_rotation(translation: (f64, f64, f64), rotation: (f64, f64, f64)) -> Self {
        Self { linear: Matrix3::from_euler(rotation), translation }
    }

    /// Composition `self · other`: `other` is applied first.
    pub fn multiply(&self, other: &Transform) -> Self {
        Self {
            linear: self.linear.multiply(&other.linear),
            translation: add_vectors(self.linear.multiply_vector(other.translation), self.translation),
        }
    }

    pub fn transform_point(&self, p: (f64, f64, f64)) -> (f64, f64, f64) {
        add_vectors(self.linear.multiply_vector(p), self.translation)
    }

    pub fn transform_vector(&self, v: (f64, f64, f64)) -> (f64, f64, f64) {
        self.linear.multiply_vector(v)
    }

    pub fn inverse(&self) -> Option<Self> {
        let linear = self.linear.inverse()?;
        let t = linear.multiply_vector(self.translation);
        Some(Self { linear, translation: (-t.0, -t.1, -t.2) })
    }

    /// Column `i` of the linear part, i.e. the world direction of local axis `i`.
    pub fn axis(&self, i: usize) -> (f64, f64, f64) {
        self.linear.column(i)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
