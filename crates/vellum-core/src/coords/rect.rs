use crate::error::{RenderError, RenderResult};

use super::Vec2;

/// Axis-aligned rectangle in user space.
///
/// Every field defaults to NaN, meaning "unset": the consumer substitutes an
/// intrinsic or automatic value instead of zero (see [`Rect::resolve`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Rect {
    #[inline]
    fn default() -> Self {
        Self::unset()
    }
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// All four fields unset.
    #[inline]
    pub const fn unset() -> Self {
        Self::new(f32::NAN, f32::NAN, f32::NAN, f32::NAN)
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// True when no field carries the unset sentinel.
    #[inline]
    pub fn is_set(self) -> bool {
        !(self.x.is_nan() || self.y.is_nan() || self.width.is_nan() || self.height.is_nan())
    }

    /// Replaces each unset field with the matching field of `fallback`.
    #[inline]
    pub fn resolve(self, fallback: Rect) -> Rect {
        fn pick(v: f32, f: f32) -> f32 {
            if v.is_nan() { f } else { v }
        }
        Rect::new(
            pick(self.x, fallback.x),
            pick(self.y, fallback.y),
            pick(self.width, fallback.width),
            pick(self.height, fallback.height),
        )
    }

    /// Rejects negative or infinite extents. Unset (NaN) fields are accepted.
    pub fn validate(self, what: &'static str) -> RenderResult<()> {
        for (name, v) in [("x", self.x), ("y", self.y), ("width", self.width), ("height", self.height)] {
            if v.is_infinite() {
                return Err(RenderError::construction(what, format!("{name} is infinite")));
            }
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v < 0.0 {
                return Err(RenderError::construction(what, format!("{name} must be non-negative, got {v}")));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);

        let w = x1 - x0;
        let h = y1 - y0;

        if w > 0.0 && h > 0.0 { Some(Rect::new(x0, y0, w, h)) } else { None }
    }

    /// Smallest rectangle covering both.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}
