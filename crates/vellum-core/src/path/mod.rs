//! Path builder contract and the shared path geometry model.
//!
//! Responsibilities:
//! - define the [`Path`] builder protocol every backend realizes
//! - provide [`PathData`], a backend-neutral geometry store backends may embed
//! - flatten curves and answer point-membership queries under a [`WindingRule`]

mod data;
mod flatten;

pub use data::{PathData, Segment, Subpath};
pub use flatten::{DEFAULT_TOLERANCE, Polyline};

use crate::error::RenderResult;

/// Rule deciding whether a point is inside a possibly self-intersecting path.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum WindingRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl WindingRule {
    /// Applies the rule to a signed crossing count.
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            WindingRule::NonZero => winding != 0,
            WindingRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Mutable geometry builder.
///
/// Every call appends to the current subpath, or starts a new one for
/// `move_to`, `rect`, `rounded_rect` and `ellipse`. After `close_path` the pen
/// rests on the closed subpath's start point, and the next drawing command opens
/// a new subpath there. A drawing command issued before any `move_to` starts at
/// the origin.
///
/// Negative extents and non-finite coordinates are rejected with
/// [`RenderError::Construction`](crate::RenderError::Construction) and leave the
/// path unchanged.
pub trait Path {
    /// Appends a closed rectangle subpath.
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> RenderResult<()>;

    /// Appends a closed rounded-rectangle subpath.
    ///
    /// `corner_radius` is clamped to `min(width, height) / 2`; a clamped radius on a
    /// square yields the inscribed circle.
    fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    ) -> RenderResult<()>;

    /// Appends a closed ellipse subpath centered on `(cx, cy)`.
    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) -> RenderResult<()>;

    fn move_to(&mut self, x: f32, y: f32) -> RenderResult<()>;

    fn line_to(&mut self, x: f32, y: f32) -> RenderResult<()>;

    /// Absolute cubic Bézier with two explicit control points.
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> RenderResult<()>;

    /// Cubic Bézier whose first control point is the current point.
    fn curve_to_v(&mut self, x2: f32, y2: f32, x3: f32, y3: f32) -> RenderResult<()>;

    /// Seals the current subpath back to its start point. No-op without an open subpath.
    fn close_path(&mut self);
}
