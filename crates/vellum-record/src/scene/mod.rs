//! Recorded draw stream.
//!
//! Responsibilities:
//! - store resolved, backend-independent draw commands
//! - keep immediate-mode paint order (insertion order)
//! - answer coverage queries in device space

mod cmd;
mod list;

pub use cmd::{DrawCmd, ImageDraw, PathDraw, ResolvedFill, ResolvedStroke};
pub use list::{DrawItem, DrawList};
