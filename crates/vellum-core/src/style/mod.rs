//! Per-draw-call style values.
//!
//! Styles are plain data assembled by the caller for each draw call. They hold
//! transforms and clip shapes through `Arc`: several styles may point at the same
//! instance, and an attached instance is read-only while shared. Mutating one goes
//! through `Arc::make_mut`, which copies when other holders exist, so styles that
//! already hold it keep the value they were built with.

mod fill;
mod graphic;
mod stroke;

pub use fill::FillStyle;
pub use graphic::GraphicStyle;
pub use stroke::{LineCap, LineJoin, StrokeStyle};

use crate::error::{RenderError, RenderResult};

/// Accepts any finite opacity; values outside [0, 1] are clamped by consumers.
pub(crate) fn check_opacity(what: &'static str, opacity: f32) -> RenderResult<()> {
    if opacity.is_finite() {
        Ok(())
    } else {
        Err(RenderError::construction(what, format!("opacity must be finite, got {opacity}")))
    }
}
