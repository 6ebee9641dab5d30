use std::sync::Arc;

use crate::error::RenderResult;

use super::check_opacity;

/// Compositing properties of a draw call or a save scope.
#[derive(Debug, Clone)]
pub struct GraphicStyle<T, S> {
    /// Multiplied into the opacity of everything drawn under this style.
    pub opacity: f32,
    /// Local transform, applied before any inherited transform.
    pub transform: Option<Arc<T>>,
    /// Clip shape in local coordinates, intersected with any active clip.
    pub clipping_path: Option<Arc<S>>,
}

impl<T, S> Default for GraphicStyle<T, S> {
    fn default() -> Self {
        Self { opacity: 1.0, transform: None, clipping_path: None }
    }
}

impl<T, S> GraphicStyle<T, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_transform(mut self, transform: Arc<T>) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_clip(mut self, clip: Arc<S>) -> Self {
        self.clipping_path = Some(clip);
        self
    }

    pub fn validate(&self) -> RenderResult<()> {
        check_opacity("graphic style", self.opacity)
    }
}
