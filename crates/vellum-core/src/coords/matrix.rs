use core::fmt;

use super::Vec2;

/// 2D affine matrix `(a, b, c, d, tx, ty)`.
///
/// Maps `(x, y)` to `(a·x + c·y + tx, b·x + d·y + ty)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Matrix {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub const fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `r` radians: `(x, y) → (x·cos r − y·sin r, x·sin r + y·cos r)`.
    ///
    /// Positive angles turn +X towards +Y, which is clockwise on a y-down target.
    #[inline]
    pub fn rotation(r: f32) -> Self {
        let (sin, cos) = r.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// `self ∘ other`: the result applies `other` first, then `self`.
    #[inline]
    pub fn compose(self, other: Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(self.a * p.x + self.c * p.y + self.tx, self.b * p.x + self.d * p.y + self.ty)
    }

    /// Applies the linear part only (no translation).
    #[inline]
    pub fn apply_vector(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Returns `None` for singular matrices.
    pub fn invert(self) -> Option<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            tx: (self.c * self.ty - self.d * self.tx) * inv,
            ty: (self.b * self.tx - self.a * self.ty) * inv,
        })
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        [self.a, self.b, self.c, self.d, self.tx, self.ty].iter().all(|v| v.is_finite())
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(self, other: Matrix, eps: f32) -> bool {
        let l = [self.a, self.b, self.c, self.d, self.tx, self.ty];
        let r = [other.a, other.b, other.c, other.d, other.tx, other.ty];
        l.iter().zip(r.iter()).all(|(x, y)| (x - y).abs() <= eps)
    }
}

/// Mutable affine transform, realized by each backend.
///
/// Every composition operation multiplies on the right: the new operation applies
/// to coordinates before the previously accumulated transform. Backends only have to
/// provide [`set`](Transform::set) and [`matrix`](Transform::matrix); the rest is
/// derived from them and may be overridden with native calls.
pub trait Transform: Clone + fmt::Debug + Send + Sync {
    /// Replaces the matrix outright.
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32);

    /// Current matrix value.
    fn matrix(&self) -> Matrix;

    /// Composes a rotation of `r` radians (see [`Matrix::rotation`]).
    fn rotate(&mut self, r: f32) {
        self.concat_matrix(Matrix::rotation(r));
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.concat_matrix(Matrix::translation(tx, ty));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.concat_matrix(Matrix::scaling(sx, sy));
    }

    /// `self = self ∘ other`.
    fn concat(&mut self, other: &Self) {
        self.concat_matrix(other.matrix());
    }

    /// `self = self ∘ m`.
    fn concat_matrix(&mut self, m: Matrix) {
        let r = self.matrix().compose(m);
        self.set(r.a, r.b, r.c, r.d, r.tx, r.ty);
    }
}

impl Transform for Matrix {
    #[inline]
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) {
        *self = Matrix::new(a, b, c, d, tx, ty);
    }

    #[inline]
    fn matrix(&self) -> Matrix {
        *self
    }

    #[inline]
    fn concat_matrix(&mut self, m: Matrix) {
        *self = self.compose(m);
    }
}
