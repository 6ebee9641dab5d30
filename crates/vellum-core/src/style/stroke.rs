use crate::coords::Matrix;
use crate::error::{RenderError, RenderResult};
use crate::paint::Paint;

use super::check_opacity;

/// Shape at the open ends of a stroked subpath.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape at the corners of a stroked subpath.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke style information.
#[derive(Debug, Clone)]
pub struct StrokeStyle<T = Matrix> {
    /// When false the stroke is skipped regardless of the other fields.
    pub has_stroke: bool,
    pub stroke_opacity: f32,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    /// Alternating dash/gap lengths; empty means a solid line.
    pub dash_array: Vec<f32>,
    pub dash_offset: f32,
    pub paint: Paint<T>,
}

impl<T> Default for StrokeStyle<T> {
    fn default() -> Self {
        Self {
            has_stroke: false,
            stroke_opacity: 1.0,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 4.0,
            dash_array: Vec::new(),
            dash_offset: 0.0,
            paint: Paint::default(),
        }
    }
}

impl<T> StrokeStyle<T> {
    /// An enabled stroke of `line_width` painted with `paint`.
    pub fn new(line_width: f32, paint: impl Into<Paint<T>>) -> Self {
        Self { has_stroke: true, line_width, paint: paint.into(), ..Self::default() }
    }

    /// True when the dash array produces visible dashes. An empty or all-zero
    /// array strokes a solid line.
    pub fn is_dashed(&self) -> bool {
        self.dash_array.iter().any(|&d| d > 0.0)
    }

    pub fn validate(&self) -> RenderResult<()> {
        check_opacity("stroke style", self.stroke_opacity)?;
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(RenderError::construction(
                "stroke style",
                format!("line width must be non-negative, got {}", self.line_width),
            ));
        }
        if !(self.miter_limit.is_finite() && self.miter_limit >= 1.0) {
            return Err(RenderError::construction(
                "stroke style",
                format!("miter limit must be at least 1, got {}", self.miter_limit),
            ));
        }
        if let Some(bad) = self.dash_array.iter().find(|d| !(d.is_finite() && **d >= 0.0)) {
            return Err(RenderError::construction(
                "stroke style",
                format!("dash lengths must be non-negative, got {bad}"),
            ));
        }
        if !self.dash_offset.is_finite() {
            return Err(RenderError::construction("stroke style", "dash offset must be finite"));
        }
        if let Paint::Gradient(g) = &self.paint {
            if !g.is_valid() {
                return Err(RenderError::construction("stroke style", "gradient has non-finite geometry or stops"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_svg_initial_values() {
        let s: StrokeStyle = StrokeStyle::default();
        assert!(!s.has_stroke);
        assert_eq!(s.line_width, 1.0);
        assert_eq!(s.miter_limit, 4.0);
        assert_eq!(s.line_cap, LineCap::Butt);
        assert_eq!(s.line_join, LineJoin::Miter);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_geometry() {
        let mut s: StrokeStyle = StrokeStyle::default();
        s.line_width = -1.0;
        assert!(s.validate().is_err());

        let mut s: StrokeStyle = StrokeStyle::default();
        s.miter_limit = 0.5;
        assert!(s.validate().is_err());

        let mut s: StrokeStyle = StrokeStyle::default();
        s.dash_array = vec![4.0, -2.0];
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_dashes_are_solid() {
        let mut s: StrokeStyle = StrokeStyle::default();
        s.dash_array = vec![0.0, 0.0];
        assert!(!s.is_dashed());
        s.dash_array = vec![3.0, 1.0];
        assert!(s.is_dashed());
    }
}
