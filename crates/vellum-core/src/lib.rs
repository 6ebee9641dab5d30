//! Vellum core crate.
//!
//! This crate owns the drawing contract between a vector scene walker and a concrete
//! backend: the paint and style model, the path/shape builders, the affine transform
//! algebra, and the save/restore state machine. It never produces pixels.
//!
//! Canonical user space:
//! - `f32` coordinates
//! - angles in radians
//! - color channels and opacities in `[0, 1]`

pub mod coords;
pub mod error;
pub mod image;
pub mod logging;
pub mod paint;
pub mod path;
pub mod render;
pub mod shape;
pub mod style;

pub use coords::{Matrix, Rect, Transform, Vec2};
pub use error::{ErrorKind, RenderError, RenderResult, StateError};
pub use image::ImageData;
pub use paint::{Color, ColorStop, Gradient, GradientKind, Paint, SpreadMethod};
pub use path::{Path, PathData, Segment, Subpath, WindingRule};
pub use render::{
    FillStyleOf, GraphicState, GraphicStyleOf, Renderer, StateStack, StrokeStyleOf, scoped,
};
pub use shape::Shape;
pub use style::{FillStyle, GraphicStyle, LineCap, LineJoin, StrokeStyle};
