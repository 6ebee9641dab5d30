//! The renderer contract.
//!
//! A [`Renderer`] is both a factory for backend objects (transforms, paths,
//! shapes, images) and an immediate-mode drawing state machine. Backends embed a
//! [`StateStack`] to get the save/restore semantics without reimplementing them.
//!
//! Protocol:
//! - every `save` must be balanced by exactly one `restore` on every control path,
//!   error paths included ([`scoped`] does this for you)
//! - draw calls never touch the stack; they resolve their own [`GraphicStyle`]
//!   against the top of the stack exactly as `save` would

mod state;

pub use state::{GraphicState, StateStack};

use crate::coords::{Rect, Transform};
use crate::error::RenderResult;
use crate::image::ImageData;
use crate::path::{Path, WindingRule};
use crate::shape::Shape;
use crate::style::{FillStyle, GraphicStyle, StrokeStyle};

/// Graphic style carrying the transform and shape types of renderer `R`.
pub type GraphicStyleOf<R> = GraphicStyle<<R as Renderer>::Transform, <R as Renderer>::Shape>;
/// Fill style carrying the transform type of renderer `R`.
pub type FillStyleOf<R> = FillStyle<<R as Renderer>::Transform>;
/// Stroke style carrying the transform type of renderer `R`.
pub type StrokeStyleOf<R> = StrokeStyle<<R as Renderer>::Transform>;

/// Platform-dependent renderer with immediate drawing calls.
///
/// A renderer instance is single-threaded: its stack is mutated in place. Distinct
/// instances share nothing mutable and may be driven from separate threads.
pub trait Renderer {
    type Transform: Transform;
    type Path: Path;
    type Shape: Shape<Transform = Self::Transform>;
    type Image: ImageData;

    /// Decodes an encoded image payload (base64 text).
    ///
    /// Fails with [`RenderError::Decode`](crate::RenderError::Decode) when the data
    /// is not an image the backend recognizes; no partial instance is returned.
    fn create_image_data(&self, base64: &str) -> RenderResult<Self::Image>;

    fn create_path(&self) -> Self::Path;

    /// Snapshots `path` into a shape filled with `winding_rule`.
    fn create_shape(&self, path: &Self::Path, winding_rule: WindingRule) -> Self::Shape;

    fn create_transform(&self, a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Self::Transform;

    fn create_identity(&self) -> Self::Transform {
        self.create_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Pushes the composition of `graphic_style` onto the current state.
    fn save(&mut self, graphic_style: &GraphicStyle<Self::Transform, Self::Shape>) -> RenderResult<()>;

    /// Pops the most recent save. Without one this is a
    /// [`StateError::UnbalancedRestore`](crate::StateError::UnbalancedRestore) and
    /// the stack is left as it was.
    fn restore(&mut self) -> RenderResult<()>;

    /// Fills and/or strokes `path`. With neither enabled this is a valid no-op.
    fn draw_path(
        &mut self,
        path: &Self::Path,
        graphic_style: &GraphicStyle<Self::Transform, Self::Shape>,
        fill_style: &FillStyle<Self::Transform>,
        stroke_style: &StrokeStyle<Self::Transform>,
    ) -> RenderResult<()>;

    /// Draws `image` into `fill_area`, restricted to `clip_area`. Unset rect fields
    /// fall back to intrinsic values chosen by the backend.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        graphic_style: &GraphicStyle<Self::Transform, Self::Shape>,
        clip_area: &Rect,
        fill_area: &Rect,
    ) -> RenderResult<()>;
}

/// Runs `body` inside a save scope and always restores, even when `body` fails.
///
/// The body's error wins over a restore error.
pub fn scoped<R, F, O>(
    renderer: &mut R,
    graphic_style: &GraphicStyle<R::Transform, R::Shape>,
    body: F,
) -> RenderResult<O>
where
    R: Renderer + ?Sized,
    F: FnOnce(&mut R) -> RenderResult<O>,
{
    renderer.save(graphic_style)?;
    let out = body(renderer);
    let restored = renderer.restore();
    let out = out?;
    restored?;
    Ok(out)
}
