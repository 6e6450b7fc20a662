/// A point of the Minkowski difference together with the two shape points it came from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SupportPoint {
    pub point: (f64, f64, f64),
    pub point_a: (f64, f64, f64),
    pub point_b: (f64, f64, f64),
}

/// GJK simplex of up to four support points, newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplex {
    points: [SupportPoint; 4],
    len: usize,
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `point` as the newest vertex, dropping the oldest one when full.
    pub fn push_front(&mut self, point: SupportPoint) {
        self.points = [point, self.points[0], self.points[1], self.points[2]];
        self.len = (self.len + 1).min(4);
    }

    /// Replaces the contents, newest first.
    pub fn assign(&mut self, points: &[SupportPoint]) {
        self.len = points.len().min(4);
        self.points[..self.len].copy_from_slice(&points[..self.len]);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[SupportPoint] {
        &self.points[..self.len]
    }

    pub fn a(&self) -> SupportPoint {
        self.points[0]
    }

    pub fn b(&self) -> SupportPoint {
        self.points[1]
    }

    pub fn c(&self) -> SupportPoint {
        self.points[2]
    }

    pub fn d(&self) -> SupportPoint {
        self.points[3]
    }
}
