use vellum_core::{LineCap, LineJoin, Matrix, Paint, PathData, Rect, WindingRule};

/// Fill parameters after style resolution.
#[derive(Debug, Clone)]
pub struct ResolvedFill {
    pub rule: WindingRule,
    /// Clamped into [0, 1].
    pub opacity: f32,
    pub paint: Paint<Matrix>,
}

/// Stroke parameters after style resolution.
#[derive(Debug, Clone)]
pub struct ResolvedStroke {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
    /// Empty when the stroke is solid.
    pub dash_array: Vec<f32>,
    pub dash_offset: f32,
    pub opacity: f32,
    pub paint: Paint<Matrix>,
}

/// A path snapshot with whichever of fill and stroke is enabled.
#[derive(Debug, Clone)]
pub struct PathDraw {
    /// User-space geometry, copied at draw time.
    pub path: PathData,
    pub fill: Option<ResolvedFill>,
    pub stroke: Option<ResolvedStroke>,
}

/// An image placement with every rect field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDraw {
    /// Intrinsic pixel size.
    pub width: u32,
    pub height: u32,
    pub fill_area: Rect,
    pub clip_area: Rect,
}

impl ImageDraw {
    /// Part of the fill area left visible by the clip area, in user space.
    pub fn visible_area(&self) -> Option<Rect> {
        self.fill_area.intersect(self.clip_area)
    }
}

/// Backend-independent draw command.
#[derive(Debug, Clone)]
pub enum DrawCmd {
    Path(PathDraw),
    Image(ImageDraw),
}
