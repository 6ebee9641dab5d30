use vellum_core::path::DEFAULT_TOLERANCE;

/// Optional features the recorder realizes.
///
/// Disabling one makes draw calls that need it fail with
/// `RenderError::Unsupported` for that call only. Useful to mimic a constrained
/// backend while exercising a scene walker's error handling.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Capabilities {
    pub radial_gradients: bool,
    pub reflect_spread: bool,
    pub repeat_spread: bool,
    pub dashed_strokes: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl Capabilities {
    pub const fn all() -> Self {
        Self {
            radial_gradients: true,
            reflect_spread: true,
            repeat_spread: true,
            dashed_strokes: true,
        }
    }

    /// Solid fills, linear pad gradients and solid strokes only.
    pub const fn minimal() -> Self {
        Self {
            radial_gradients: false,
            reflect_spread: false,
            repeat_spread: false,
            dashed_strokes: false,
        }
    }
}

/// Initialization parameters for a [`Recorder`](crate::Recorder).
#[derive(Debug, Clone)]
pub struct RecorderInit {
    /// Curve flattening tolerance (user units) for coverage queries.
    pub tolerance: f32,

    /// Maximum number of nested saves; `None` disables the check.
    ///
    /// Deep nesting almost always means a walker forgot a restore.
    pub max_save_depth: Option<usize>,

    /// Images with more pixels than this are rejected as decode errors.
    pub max_image_pixels: u64,

    pub capabilities: Capabilities,
}

impl Default for RecorderInit {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_save_depth: Some(256),
            max_image_pixels: 64 * 1024 * 1024,
            capabilities: Capabilities::all(),
        }
    }
}
