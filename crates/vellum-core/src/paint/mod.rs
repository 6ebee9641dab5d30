//! Paint model shared between callers and backends.
//!
//! Scope:
//! - color representation (straight alpha, normalized channels)
//! - paint sources (solid, linear and radial gradients)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, Gradient, GradientKind, SpreadMethod};

use crate::coords::Matrix;

/// Paint source for filling or stroking geometry.
///
/// Closed over exactly two variants; backends dispatch on it directly.
#[derive(Debug, Clone)]
pub enum Paint<T = Matrix> {
    Color(Color),
    Gradient(Gradient<T>),
}

impl<T> Default for Paint<T> {
    /// Opaque black.
    #[inline]
    fn default() -> Self {
        Paint::Color(Color::black())
    }
}

impl<T> Paint<T> {
    #[inline]
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Color(c) => c.a >= 1.0,
            // Conservative: a gradient is opaque only when every stop is.
            Paint::Gradient(g) => !g.stops.is_empty() && g.stops.iter().all(|s| s.color.a >= 1.0),
        }
    }

    #[inline]
    pub fn as_gradient(&self) -> Option<&Gradient<T>> {
        match self {
            Paint::Gradient(g) => Some(g),
            Paint::Color(_) => None,
        }
    }
}

impl<T> From<Color> for Paint<T> {
    #[inline]
    fn from(color: Color) -> Self {
        Paint::Color(color)
    }
}

impl<T> From<Gradient<T>> for Paint<T> {
    #[inline]
    fn from(gradient: Gradient<T>) -> Self {
        Paint::Gradient(gradient)
    }
}
