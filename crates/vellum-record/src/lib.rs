//! Vellum recording backend.
//!
//! A [`Recorder`] realizes the `vellum-core` renderer contract without producing
//! pixels: every draw call is resolved against the save/restore stack and stored
//! as a [`DrawItem`] carrying its device transform, opacity, clip and styles.
//! Items can be queried for coverage, which makes the recorder the reference
//! against which scene walkers and other backends are tested.

pub mod bitmap;
pub mod config;
pub mod recorder;
pub mod region;
pub mod scene;

pub use bitmap::DecodedImage;
pub use config::{Capabilities, RecorderInit};
pub use recorder::Recorder;
pub use region::Region;
pub use scene::{DrawCmd, DrawItem, DrawList, ImageDraw, PathDraw, ResolvedFill, ResolvedStroke};
