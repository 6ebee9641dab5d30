//! Coordinate and geometry types shared by the contract and its backends.
//!
//! User space:
//! - `(x, y)` in `f32`
//! - no fixed axis orientation; the backend decides whether +Y points up or down
//!
//! Backends map user space onto their target through the cumulative [`Transform`].

mod matrix;
mod rect;
mod vec2;

pub use matrix::{Matrix, Transform};
pub use rect::Rect;
pub use vec2::Vec2;
