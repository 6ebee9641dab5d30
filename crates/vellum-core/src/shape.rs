use core::fmt;

use crate::coords::Transform;

/// One or more paths, each tagged with a winding rule.
///
/// Shapes are built from a finished path through
/// [`Renderer::create_shape`](crate::Renderer::create_shape) and are the unit of
/// clipping. Once built they are read-only data and may be shared across threads.
pub trait Shape: Clone + fmt::Debug + Send + Sync {
    type Transform: Transform;

    /// Applies `transform` to every contained coordinate, in place.
    fn transform(&mut self, transform: &Self::Transform);

    /// Adds `other`'s geometry. A point is inside the result when it is inside
    /// either operand under that operand's own winding rule.
    fn union(&mut self, other: &Self);
}
