use std::mem;

use vellum_core::{
    FillStyle, GradientKind, GraphicState, GraphicStyle, ImageData, Matrix, Paint, PathData, Rect,
    RenderError, RenderResult, Renderer, SpreadMethod, StateStack, StrokeStyle, WindingRule,
};

use crate::bitmap::DecodedImage;
use crate::config::RecorderInit;
use crate::region::Region;
use crate::scene::{DrawCmd, DrawList, ImageDraw, PathDraw, ResolvedFill, ResolvedStroke};

/// Recording backend.
///
/// Every accepted draw call is resolved against the save/restore stack and
/// appended to a [`DrawList`]. Rejected calls record nothing and leave the stack
/// as it was.
#[derive(Debug)]
pub struct Recorder {
    init: RecorderInit,
    state: StateStack<Matrix, Region>,
    list: DrawList,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RecorderInit::default())
    }
}

impl Recorder {
    pub fn new(init: RecorderInit) -> Self {
        let state = StateStack::new(Matrix::identity()).with_max_depth(init.max_save_depth);
        log::debug!("recorder created: {:?}", init.capabilities);
        Self { init, state, list: DrawList::new() }
    }

    #[inline]
    pub fn init(&self) -> &RecorderInit {
        &self.init
    }

    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    /// Hands over everything recorded so far and starts a fresh list.
    pub fn take_draw_list(&mut self) -> DrawList {
        mem::take(&mut self.list)
    }

    /// Number of unmatched saves.
    #[inline]
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    #[inline]
    pub fn current_state(&self) -> &GraphicState<Matrix, Region> {
        self.state.current()
    }

    /// Drops saved scopes and recorded items, as if newly created.
    pub fn reset(&mut self) {
        self.state.reset();
        self.list.clear();
    }

    fn check_paint(&self, paint: &Paint<Matrix>) -> RenderResult<()> {
        let Some(gradient) = paint.as_gradient() else {
            return Ok(());
        };
        let caps = &self.init.capabilities;
        if matches!(gradient.kind, GradientKind::Radial { .. }) && !caps.radial_gradients {
            return Err(decline("radial gradient"));
        }
        match gradient.spread {
            SpreadMethod::Reflect if !caps.reflect_spread => Err(decline("reflect spread")),
            SpreadMethod::Repeat if !caps.repeat_spread => Err(decline("repeat spread")),
            _ => Ok(()),
        }
    }

    fn resolve_fill(&self, style: &FillStyle<Matrix>) -> RenderResult<Option<ResolvedFill>> {
        if !style.has_fill {
            return Ok(None);
        }
        style.validate()?;
        self.check_paint(&style.paint)?;

        let opacity = style.fill_opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return Ok(None);
        }
        Ok(Some(ResolvedFill { rule: style.fill_rule, opacity, paint: style.paint.clone() }))
    }

    fn resolve_stroke(&self, style: &StrokeStyle<Matrix>) -> RenderResult<Option<ResolvedStroke>> {
        if !style.has_stroke {
            return Ok(None);
        }
        style.validate()?;
        self.check_paint(&style.paint)?;

        let dashed = style.is_dashed();
        if dashed && !self.init.capabilities.dashed_strokes {
            return Err(decline("dashed stroke"));
        }

        let opacity = style.stroke_opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 || style.line_width <= 0.0 {
            return Ok(None);
        }
        Ok(Some(ResolvedStroke {
            width: style.line_width,
            cap: style.line_cap,
            join: style.line_join,
            miter_limit: style.miter_limit,
            dash_array: if dashed { style.dash_array.clone() } else { Vec::new() },
            dash_offset: style.dash_offset,
            opacity,
            paint: style.paint.clone(),
        }))
    }
}

fn decline(feature: &'static str) -> RenderError {
    log::warn!("declined draw call: {feature} is disabled");
    RenderError::unsupported(feature)
}

impl Renderer for Recorder {
    type Transform = Matrix;
    type Path = PathData;
    type Shape = Region;
    type Image = DecodedImage;

    fn create_image_data(&self, base64: &str) -> RenderResult<DecodedImage> {
        DecodedImage::decode(base64, self.init.max_image_pixels)
    }

    fn create_path(&self) -> PathData {
        PathData::new()
    }

    fn create_shape(&self, path: &PathData, winding_rule: WindingRule) -> Region {
        Region::new(path, winding_rule, self.init.tolerance)
    }

    fn create_transform(&self, a: f32, b: f32, c: f32, d: f32, tx: f32, ty: f32) -> Matrix {
        Matrix::new(a, b, c, d, tx, ty)
    }

    fn save(&mut self, graphic_style: &GraphicStyle<Matrix, Region>) -> RenderResult<()> {
        self.state.save(graphic_style)
    }

    fn restore(&mut self) -> RenderResult<()> {
        self.state.restore()
    }

    fn draw_path(
        &mut self,
        path: &PathData,
        graphic_style: &GraphicStyle<Matrix, Region>,
        fill_style: &FillStyle<Matrix>,
        stroke_style: &StrokeStyle<Matrix>,
    ) -> RenderResult<()> {
        let state = self.state.compose(graphic_style)?;
        let fill = self.resolve_fill(fill_style)?;
        let stroke = self.resolve_stroke(stroke_style)?;

        if fill.is_none() && stroke.is_none() {
            log::trace!("draw_path: nothing to paint");
            return Ok(());
        }
        if state.opacity <= 0.0 {
            log::trace!("draw_path: fully transparent");
            return Ok(());
        }

        log::trace!(
            "draw_path: {} subpath(s), fill={}, stroke={}",
            path.subpaths().len(),
            fill.is_some(),
            stroke.is_some()
        );
        let cmd = DrawCmd::Path(PathDraw { path: path.clone(), fill, stroke });
        self.list.push(cmd, state.transform, state.opacity, state.clip);
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &DecodedImage,
        graphic_style: &GraphicStyle<Matrix, Region>,
        clip_area: &Rect,
        fill_area: &Rect,
    ) -> RenderResult<()> {
        let state = self.state.compose(graphic_style)?;
        fill_area.validate("image fill area")?;
        clip_area.validate("image clip area")?;

        let intrinsic = Rect::new(0.0, 0.0, image.width(), image.height());
        let fill_area = fill_area.resolve(intrinsic);
        let clip_area = clip_area.resolve(fill_area);

        if state.opacity <= 0.0 {
            log::trace!("draw_image: fully transparent");
            return Ok(());
        }

        log::trace!("draw_image: {fill_area:?} clipped to {clip_area:?}");
        let cmd = DrawCmd::Image(ImageDraw {
            width: image.pixel_width(),
            height: image.pixel_height(),
            fill_area,
            clip_area,
        });
        self.list.push(cmd, state.transform, state.opacity, state.clip);
        Ok(())
    }
}
