use std::sync::Arc;

use crate::coords::Transform;
use crate::error::{RenderError, RenderResult, StateError};
use crate::shape::Shape;
use crate::style::GraphicStyle;

/// Cumulative drawing state: the composition of every active save scope.
#[derive(Debug, Clone)]
pub struct GraphicState<T, S> {
    /// User space to device space.
    pub transform: T,
    /// Product of all scope opacities, in [0, 1].
    pub opacity: f32,
    /// Active clip shapes, already in device space. A point is visible only when
    /// it lies inside every one of them (nested masking); empty means unclipped.
    pub clip: Vec<Arc<S>>,
}

impl<T: Transform, S: Shape<Transform = T>> GraphicState<T, S> {
    /// Identity transform, full opacity, no clip.
    pub fn initial(identity: T) -> Self {
        Self { transform: identity, opacity: 1.0, clip: Vec::new() }
    }

    /// Composes `style` onto this state.
    ///
    /// - opacity multiplies
    /// - the style transform applies before the inherited one
    /// - the style clip is mapped by the new cumulative transform and added to
    ///   the clip list; the shared clip instance itself is never modified
    pub fn compose(&self, style: &GraphicStyle<T, S>) -> RenderResult<Self> {
        style.validate()?;

        let mut transform = self.transform.clone();
        if let Some(local) = &style.transform {
            transform.concat(local);
        }

        let opacity = self.opacity * style.opacity.clamp(0.0, 1.0);

        let mut clip = self.clip.clone();
        if let Some(shape) = &style.clipping_path {
            let mut device = (**shape).clone();
            device.transform(&transform);
            clip.push(Arc::new(device));
        }

        Ok(Self { transform, opacity, clip })
    }

    #[inline]
    pub fn is_clipped(&self) -> bool {
        !self.clip.is_empty()
    }

    /// True when `inside` accepts every active clip shape.
    #[inline]
    pub fn clip_contains(&self, inside: impl Fn(&S) -> bool) -> bool {
        self.clip.iter().all(|s| inside(s.as_ref()))
    }
}

/// The save/restore stack.
///
/// The default state is held separately from the saved scopes, so it can never be
/// popped: an unbalanced [`restore`](Self::restore) reports
/// [`StateError::UnbalancedRestore`] and leaves the stack untouched.
#[derive(Debug, Clone)]
pub struct StateStack<T, S> {
    base: GraphicState<T, S>,
    saved: Vec<GraphicState<T, S>>,
    max_depth: Option<usize>,
}

impl<T: Transform, S: Shape<Transform = T>> StateStack<T, S> {
    pub fn new(identity: T) -> Self {
        Self { base: GraphicState::initial(identity), saved: Vec::new(), max_depth: None }
    }

    /// Bounds the number of nested saves; `None` means unbounded.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Top of the stack.
    #[inline]
    pub fn current(&self) -> &GraphicState<T, S> {
        self.saved.last().unwrap_or(&self.base)
    }

    /// Number of unmatched saves.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// State a draw call with `style` executes under. Nothing is pushed.
    #[inline]
    pub fn compose(&self, style: &GraphicStyle<T, S>) -> RenderResult<GraphicState<T, S>> {
        self.current().compose(style)
    }

    pub fn save(&mut self, style: &GraphicStyle<T, S>) -> RenderResult<()> {
        if let Some(limit) = self.max_depth {
            if self.saved.len() >= limit {
                log::warn!("save rejected: nesting limit {limit} reached");
                return Err(StateError::DepthExceeded { limit }.into());
            }
        }
        let next = self.compose(style)?;
        self.saved.push(next);
        log::debug!("save: depth {}", self.saved.len());
        Ok(())
    }

    pub fn restore(&mut self) -> RenderResult<()> {
        match self.saved.pop() {
            Some(_) => {
                log::debug!("restore: depth {}", self.saved.len());
                Ok(())
            }
            None => {
                log::warn!("restore called without a matching save");
                Err(RenderError::State(StateError::UnbalancedRestore))
            }
        }
    }

    /// Drops every saved scope, returning to the default state.
    pub fn reset(&mut self) {
        if !self.saved.is_empty() {
            log::debug!("reset: discarding {} saved scope(s)", self.saved.len());
        }
        self.saved.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Matrix, Vec2};
    use crate::error::ErrorKind;

    /// Records the accumulated mapping instead of real geometry.
    #[derive(Debug, Clone, PartialEq)]
    struct Marker {
        mapped: Matrix,
    }

    impl Shape for Marker {
        type Transform = Matrix;

        fn transform(&mut self, t: &Matrix) {
            self.mapped = t.compose(self.mapped);
        }

        fn union(&mut self, _other: &Self) {}
    }

    type Style = GraphicStyle<Matrix, Marker>;

    fn stack() -> StateStack<Matrix, Marker> {
        StateStack::new(Matrix::identity())
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-5, "got {actual}, want {expected}");
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn starts_in_default_state() {
        let s = stack();
        assert_eq!(s.depth(), 0);
        assert!(s.current().transform.is_identity());
        assert_eq!(s.current().opacity, 1.0);
        assert!(!s.current().is_clipped());
    }

    #[test]
    fn opacity_multiplies_across_scopes() {
        let mut s = stack();
        s.save(&Style::new().with_opacity(0.5)).unwrap();
        s.save(&Style::new().with_opacity(0.5)).unwrap();
        assert_close(s.current().opacity, 0.25);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut s = stack();
        s.save(&Style::new().with_opacity(3.0)).unwrap();
        assert_close(s.current().opacity, 1.0);
    }

    #[test]
    fn nested_transform_applies_before_inherited() {
        let mut s = stack();
        s.save(&Style::new().with_transform(Arc::new(Matrix::translation(10.0, 0.0)))).unwrap();
        s.save(&Style::new().with_transform(Arc::new(Matrix::scaling(2.0, 2.0)))).unwrap();
        let p = s.current().transform.apply(Vec2::new(1.0, 1.0));
        assert_close(p.x, 12.0);
        assert_close(p.y, 2.0);
    }

    #[test]
    fn clip_is_mapped_by_new_cumulative_transform() {
        let shared = Arc::new(Marker { mapped: Matrix::identity() });
        let mut s = stack();
        s.save(&Style::new().with_transform(Arc::new(Matrix::translation(5.0, 0.0)))).unwrap();
        s.save(
            &Style::new()
                .with_transform(Arc::new(Matrix::scaling(2.0, 2.0)))
                .with_clip(shared.clone()),
        )
        .unwrap();

        let clip = &s.current().clip;
        assert_eq!(clip.len(), 1);
        let expected = Matrix::translation(5.0, 0.0).compose(Matrix::scaling(2.0, 2.0));
        assert!(clip[0].mapped.approx_eq(expected, 1e-6));
        // The caller's shape is shared, not mutated.
        assert!(shared.mapped.is_identity());
    }

    #[test]
    fn nested_clips_accumulate_and_unwind() {
        let clip = Arc::new(Marker { mapped: Matrix::identity() });
        let mut s = stack();
        s.save(&Style::new().with_clip(clip.clone())).unwrap();
        s.save(&Style::new().with_clip(clip.clone())).unwrap();
        assert_eq!(s.current().clip.len(), 2);
        s.restore().unwrap();
        assert_eq!(s.current().clip.len(), 1);
        assert!(s.current().clip_contains(|p| p.mapped.is_identity()));
    }

    #[test]
    fn attached_transform_is_a_snapshot() {
        let shared = Arc::new(Matrix::translation(10.0, 0.0));
        let style = Style::new().with_transform(shared.clone());

        let mut edited = shared.clone();
        Arc::make_mut(&mut edited).translate(0.0, 5.0);
        assert_eq!(*edited, Matrix::translation(10.0, 5.0));

        let mut s = stack();
        s.save(&style).unwrap();
        assert_eq!(s.current().transform, Matrix::translation(10.0, 0.0));
    }

    #[test]
    fn attached_clip_is_a_snapshot() {
        let shared = Arc::new(Marker { mapped: Matrix::identity() });
        let style = Style::new().with_clip(shared.clone());

        let mut edited = shared.clone();
        Arc::make_mut(&mut edited).mapped = Matrix::scaling(3.0, 3.0);

        let mut s = stack();
        s.save(&style).unwrap();
        assert!(s.current().clip[0].mapped.is_identity());
        assert!(shared.mapped.is_identity());
    }

    #[test]
    fn compose_does_not_push() {
        let s = stack();
        let resolved = s.compose(&Style::new().with_opacity(0.5)).unwrap();
        assert_close(resolved.opacity, 0.5);
        assert_eq!(s.depth(), 0);
        assert_eq!(s.current().opacity, 1.0);
    }

    // ── balance ───────────────────────────────────────────────────────────

    #[test]
    fn balanced_saves_restore_prior_state() {
        let mut s = stack();
        s.save(&Style::new().with_opacity(0.8).with_transform(Arc::new(Matrix::rotation(0.3)))).unwrap();
        let before = s.current().clone();

        for i in 0..5 {
            let style = Style::new()
                .with_opacity(0.9)
                .with_transform(Arc::new(Matrix::translation(i as f32, 1.0)))
                .with_clip(Arc::new(Marker { mapped: Matrix::identity() }));
            s.save(&style).unwrap();
        }
        for _ in 0..5 {
            s.restore().unwrap();
        }

        let after = s.current();
        assert_eq!(after.transform, before.transform);
        assert_eq!(after.opacity, before.opacity);
        assert_eq!(after.clip.len(), before.clip.len());
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn unbalanced_restore_is_reported_and_harmless() {
        let mut s = stack();
        let err = s.restore().unwrap_err();
        assert_eq!(err, RenderError::State(StateError::UnbalancedRestore));
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(s.depth(), 0);
        assert!(s.current().transform.is_identity());

        // Still usable afterwards.
        s.save(&Style::new()).unwrap();
        s.restore().unwrap();
    }

    #[test]
    fn depth_limit_rejects_without_pushing() {
        let mut s = stack().with_max_depth(Some(2));
        s.save(&Style::new()).unwrap();
        s.save(&Style::new()).unwrap();
        let err = s.save(&Style::new()).unwrap_err();
        assert_eq!(err, RenderError::State(StateError::DepthExceeded { limit: 2 }));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn invalid_style_leaves_stack_untouched() {
        let mut s = stack();
        let err = s.save(&Style::new().with_opacity(f32::NAN)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut s = stack();
        s.save(&Style::new().with_opacity(0.1)).unwrap();
        s.save(&Style::new()).unwrap();
        s.reset();
        assert_eq!(s.depth(), 0);
        assert_eq!(s.current().opacity, 1.0);
    }
}
