use crate::coords::Matrix;
use crate::error::{RenderError, RenderResult};
use crate::paint::Paint;
use crate::path::WindingRule;

use super::check_opacity;

/// Fill style information.
#[derive(Debug, Clone)]
pub struct FillStyle<T = Matrix> {
    /// When false the fill is skipped regardless of the other fields.
    pub has_fill: bool,
    pub fill_rule: WindingRule,
    pub fill_opacity: f32,
    pub paint: Paint<T>,
}

impl<T> Default for FillStyle<T> {
    fn default() -> Self {
        Self {
            has_fill: true,
            fill_rule: WindingRule::NonZero,
            fill_opacity: 1.0,
            paint: Paint::default(),
        }
    }
}

impl<T> FillStyle<T> {
    /// A fill that paints nothing.
    pub fn none() -> Self {
        Self { has_fill: false, ..Self::default() }
    }

    pub fn with_paint(paint: impl Into<Paint<T>>) -> Self {
        Self { paint: paint.into(), ..Self::default() }
    }

    pub fn validate(&self) -> RenderResult<()> {
        check_opacity("fill style", self.fill_opacity)?;
        if let Paint::Gradient(g) = &self.paint {
            if !g.is_valid() {
                return Err(RenderError::construction("fill style", "gradient has non-finite geometry or stops"));
            }
        }
        Ok(())
    }
}
