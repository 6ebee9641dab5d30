use std::sync::Arc;

use crate::coords::{Matrix, Transform, Vec2};

use super::Color;

/// Gradient behavior for offsets outside [0, 1].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SpreadMethod {
    /// Clamp to the edge stops.
    #[default]
    Pad,
    /// Mirror-repeat the gradient.
    Reflect,
    /// Repeat the gradient.
    Repeat,
}

impl SpreadMethod {
    /// Maps any offset into [0, 1]. NaN maps to 0.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        if t.is_nan() {
            return 0.0;
        }
        match self {
            SpreadMethod::Pad => t.clamp(0.0, 1.0),
            SpreadMethod::Repeat if t.is_finite() => t - t.floor(),
            SpreadMethod::Reflect if t.is_finite() => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
            // Infinite offsets have no meaningful phase.
            _ => t.clamp(0.0, 1.0),
        }
    }
}

/// A single gradient stop.
///
/// `offset` is expected in [0, 1] and non-decreasing across a gradient; neither is
/// enforced. During evaluation an offset smaller than its predecessor is raised to it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient geometry in gradient space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GradientKind {
    /// Offset 0 at `(x1, y1)`, offset 1 at `(x2, y2)`.
    Linear { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Offset 0 at the focal point `(fx, fy)`, offset 1 on the circle at `(cx, cy)` with radius `r`.
    Radial { cx: f32, cy: f32, fx: f32, fy: f32, r: f32 },
}

/// Linear or radial gradient paint server.
///
/// `transform` maps gradient space into the user space of the painted geometry and
/// is independent of the geometry's own transform. It is shared: several gradients
/// may hold the same instance.
#[derive(Debug, Clone)]
pub struct Gradient<T = Matrix> {
    pub kind: GradientKind,
    pub spread: SpreadMethod,
    /// Evaluated in insertion order.
    pub stops: Vec<ColorStop>,
    pub transform: Option<Arc<T>>,
}

impl<T> Gradient<T> {
    pub fn linear(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::with_kind(GradientKind::Linear { x1, y1, x2, y2 })
    }

    pub fn radial(cx: f32, cy: f32, fx: f32, fy: f32, r: f32) -> Self {
        Self::with_kind(GradientKind::Radial { cx, cy, fx, fy, r })
    }

    fn with_kind(kind: GradientKind) -> Self {
        Self { kind, spread: SpreadMethod::Pad, stops: Vec::new(), transform: None }
    }

    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(ColorStop::new(offset, color));
        self
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_transform(mut self, transform: Arc<T>) -> Self {
        self.transform = Some(transform);
        self
    }

    /// True when geometry and stops are finite and the radius (if any) is non-negative.
    pub fn is_valid(&self) -> bool {
        let geometry_ok = match self.kind {
            GradientKind::Linear { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
            }
            GradientKind::Radial { cx, cy, fx, fy, r } => {
                [cx, cy, fx, fy, r].iter().all(|v| v.is_finite()) && r >= 0.0
            }
        };
        geometry_ok && self.stops.iter().all(|s| s.offset.is_finite() && s.color.is_finite())
    }

    /// Color at gradient offset `t`, after applying the spread method.
    ///
    /// No stops yields transparent; a single stop paints its color everywhere.
    pub fn color_at(&self, t: f32) -> Color {
        let t = self.spread.apply(t);
        let Some((first, rest)) = self.stops.split_first() else {
            return Color::transparent();
        };

        let mut prev_offset = first.offset;
        let mut prev_color = first.color;
        if t <= prev_offset {
            return prev_color;
        }
        for stop in rest {
            let offset = stop.offset.max(prev_offset);
            if t <= offset {
                let span = offset - prev_offset;
                return if span <= f32::EPSILON {
                    stop.color
                } else {
                    prev_color.lerp(stop.color, (t - prev_offset) / span)
                };
            }
            prev_offset = offset;
            prev_color = stop.color;
        }
        prev_color
    }
}

impl<T: Transform> Gradient<T> {
    /// Raw (pre-spread) gradient offset of a user-space point.
    ///
    /// Returns `None` when the geometry is degenerate (coincident linear endpoints,
    /// non-positive radius) or the gradient transform is singular. A focal point
    /// outside the circle is pulled just inside it.
    pub fn offset_at(&self, p: Vec2) -> Option<f32> {
        let p = match &self.transform {
            Some(t) => t.matrix().invert()?.apply(p),
            None => p,
        };

        match self.kind {
            GradientKind::Linear { x1, y1, x2, y2 } => {
                let start = Vec2::new(x1, y1);
                let dir = Vec2::new(x2, y2) - start;
                let len2 = dir.dot(dir);
                if len2 == 0.0 || !len2.is_finite() {
                    return None;
                }
                Some((p - start).dot(dir) / len2)
            }
            GradientKind::Radial { cx, cy, fx, fy, r } => {
                if !(r > 0.0) {
                    return None;
                }
                let center = Vec2::new(cx, cy);
                let mut focal = Vec2::new(fx, fy);
                let limit = r * 0.999;
                let from_center = focal - center;
                let dist = from_center.length();
                if dist > limit {
                    focal = center + from_center * (limit / dist);
                }

                // Solve |focal + k·d − center| = r for the positive root k; the
                // offset is the fraction of the focal ray covered by p.
                let d = p - focal;
                let dd = d.dot(d);
                if dd == 0.0 {
                    return Some(0.0);
                }
                let e = focal - center;
                let half_b = e.dot(d);
                let c = e.dot(e) - r * r;
                let disc = half_b * half_b - dd * c;
                if disc < 0.0 {
                    return None;
                }
                let k = (-half_b + disc.sqrt()) / dd;
                if k <= 0.0 { None } else { Some(1.0 / k) }
            }
        }
    }

    /// Color painted at a user-space point, or `None` for degenerate gradients.
    pub fn color_at_point(&self, p: Vec2) -> Option<Color> {
        self.offset_at(p).map(|t| self.color_at(t))
    }
}
