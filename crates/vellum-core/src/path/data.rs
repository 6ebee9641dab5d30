use crate::coords::{Matrix, Rect, Vec2};
use crate::error::{RenderResult, ensure_finite, ensure_non_negative};

use super::flatten::{self, Polyline};
use super::{Path, WindingRule};

/// Magic constant for approximating a quarter circle with one cubic.
const KAPPA: f32 = 0.552_284_75;

/// One drawing command inside a subpath. The start point is implied by the
/// previous segment (or the subpath start).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    Line(Vec2),
    Cubic { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    /// Cubic whose first control point coincides with the segment start.
    CubicV { ctrl2: Vec2, to: Vec2 },
}

impl Segment {
    #[inline]
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::Line(to) | Segment::Cubic { to, .. } | Segment::CubicV { to, .. } => to,
        }
    }

    fn map(&mut self, m: &Matrix) {
        match self {
            Segment::Line(to) => *to = m.apply(*to),
            Segment::Cubic { ctrl1, ctrl2, to } => {
                *ctrl1 = m.apply(*ctrl1);
                *ctrl2 = m.apply(*ctrl2);
                *to = m.apply(*to);
            }
            Segment::CubicV { ctrl2, to } => {
                *ctrl2 = m.apply(*ctrl2);
                *to = m.apply(*to);
            }
        }
    }
}

/// An ordered run of segments starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub start: Vec2,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Subpath {
    #[inline]
    fn open_at(start: Vec2) -> Self {
        Self { start, segments: Vec::new(), closed: false }
    }

    /// Where the pen rests after this subpath.
    #[inline]
    pub fn end_point(&self) -> Vec2 {
        if self.closed {
            self.start
        } else {
            self.segments.last().map_or(self.start, Segment::end)
        }
    }

    fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().flat_map(|s| {
            let pts: [Option<Vec2>; 3] = match *s {
                Segment::Line(to) => [Some(to), None, None],
                Segment::Cubic { ctrl1, ctrl2, to } => [Some(ctrl1), Some(ctrl2), Some(to)],
                Segment::CubicV { ctrl2, to } => [Some(ctrl2), Some(to), None],
            };
            pts.into_iter().flatten()
        }))
    }
}

/// Backend-neutral path geometry: an ordered list of subpaths.
///
/// Implements the [`Path`] builder protocol and adds the queries backends need
/// (bounds, flattening, point membership, in-place transformation).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    subpaths: Vec<Subpath>,
}

impl PathData {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// True when no subpath carries a segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(|s| s.segments.is_empty())
    }

    /// Current pen position, `None` before the first command.
    #[inline]
    pub fn current_point(&self) -> Option<Vec2> {
        self.subpaths.last().map(Subpath::end_point)
    }

    /// Control-point bounds (conservative for curves).
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.subpaths.iter().flat_map(Subpath::points);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (Vec2::new(min.x.min(p.x), min.y.min(p.y)), Vec2::new(max.x.max(p.x), max.y.max(p.y)))
        });
        Some(Rect::from_origin_size(min, max - min))
    }

    /// Applies `m` to every coordinate in place.
    pub fn transform(&mut self, m: &Matrix) {
        for sub in &mut self.subpaths {
            sub.start = m.apply(sub.start);
            for seg in &mut sub.segments {
                seg.map(m);
            }
        }
    }

    /// Flattens curves into polylines within `tolerance` user units.
    pub fn flatten(&self, tolerance: f32) -> Vec<Polyline> {
        flatten::flatten(self, tolerance)
    }

    /// Point membership under `rule`. Every subpath is implicitly closed, as for
    /// filling, and points on the outline count as inside.
    pub fn contains(&self, point: Vec2, rule: WindingRule, tolerance: f32) -> bool {
        flatten::contains(&self.flatten(tolerance), point, rule)
    }

    /// Subpath that accepts the next drawing command, opening one if needed.
    fn open_subpath(&mut self) -> &mut Subpath {
        let reopen = match self.subpaths.last() {
            Some(last) if !last.closed => None,
            Some(last) => Some(last.start),
            None => Some(Vec2::zero()),
        };
        if let Some(start) = reopen {
            self.subpaths.push(Subpath::open_at(start));
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    fn push_closed(&mut self, start: Vec2, segments: Vec<Segment>) {
        self.subpaths.push(Subpath { start, segments, closed: true });
    }

    fn quarter(from: Vec2, corner: Vec2, to: Vec2) -> Segment {
        Segment::Cubic { ctrl1: from.lerp(corner, KAPPA), ctrl2: to.lerp(corner, KAPPA), to }
    }
}

impl Path for PathData {
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> RenderResult<()> {
        ensure_finite("rect", &[x, y])?;
        ensure_non_negative("rect", "width", width)?;
        ensure_non_negative("rect", "height", height)?;

        self.push_closed(
            Vec2::new(x, y),
            vec![
                Segment::Line(Vec2::new(x + width, y)),
                Segment::Line(Vec2::new(x + width, y + height)),
                Segment::Line(Vec2::new(x, y + height)),
            ],
        );
        Ok(())
    }

    fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
    ) -> RenderResult<()> {
        ensure_finite("rounded rect", &[x, y])?;
        ensure_non_negative("rounded rect", "width", width)?;
        ensure_non_negative("rounded rect", "height", height)?;
        ensure_non_negative("rounded rect", "corner radius", corner_radius)?;

        let r = corner_radius.min(width * 0.5).min(height * 0.5);
        if r == 0.0 {
            return self.rect(x, y, width, height);
        }

        let (l, t, rt, b) = (x, y, x + width, y + height);
        let v = Vec2::new;
        self.push_closed(
            v(l + r, t),
            vec![
                Segment::Line(v(rt - r, t)),
                Self::quarter(v(rt - r, t), v(rt, t), v(rt, t + r)),
                Segment::Line(v(rt, b - r)),
                Self::quarter(v(rt, b - r), v(rt, b), v(rt - r, b)),
                Segment::Line(v(l + r, b)),
                Self::quarter(v(l + r, b), v(l, b), v(l, b - r)),
                Segment::Line(v(l, t + r)),
                Self::quarter(v(l, t + r), v(l, t), v(l + r, t)),
            ],
        );
        Ok(())
    }

    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) -> RenderResult<()> {
        ensure_finite("ellipse", &[cx, cy])?;
        ensure_non_negative("ellipse", "rx", rx)?;
        ensure_non_negative("ellipse", "ry", ry)?;

        let v = Vec2::new;
        let (east, south, west, north) =
            (v(cx + rx, cy), v(cx, cy + ry), v(cx - rx, cy), v(cx, cy - ry));
        self.push_closed(
            east,
            vec![
                Self::quarter(east, v(cx + rx, cy + ry), south),
                Self::quarter(south, v(cx - rx, cy + ry), west),
                Self::quarter(west, v(cx - rx, cy - ry), north),
                Self::quarter(north, v(cx + rx, cy - ry), east),
            ],
        );
        Ok(())
    }

    fn move_to(&mut self, x: f32, y: f32) -> RenderResult<()> {
        ensure_finite("move_to", &[x, y])?;
        let p = Vec2::new(x, y);
        match self.subpaths.last_mut() {
            // Consecutive move_to calls collapse into one.
            Some(last) if !last.closed && last.segments.is_empty() => last.start = p,
            _ => self.subpaths.push(Subpath::open_at(p)),
        }
        Ok(())
    }

    fn line_to(&mut self, x: f32, y: f32) -> RenderResult<()> {
        ensure_finite("line_to", &[x, y])?;
        self.open_subpath().segments.push(Segment::Line(Vec2::new(x, y)));
        Ok(())
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> RenderResult<()> {
        ensure_finite("curve_to", &[x1, y1, x2, y2, x3, y3])?;
        self.open_subpath().segments.push(Segment::Cubic {
            ctrl1: Vec2::new(x1, y1),
            ctrl2: Vec2::new(x2, y2),
            to: Vec2::new(x3, y3),
        });
        Ok(())
    }

    fn curve_to_v(&mut self, x2: f32, y2: f32, x3: f32, y3: f32) -> RenderResult<()> {
        ensure_finite("curve_to_v", &[x2, y2, x3, y3])?;
        self.open_subpath()
            .segments
            .push(Segment::CubicV { ctrl2: Vec2::new(x2, y2), to: Vec2::new(x3, y3) });
        Ok(())
    }

    fn close_path(&mut self) {
        if let Some(last) = self.subpaths.last_mut() {
            last.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::DEFAULT_TOLERANCE;

    fn triangle() -> PathData {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(10.0, 10.0).unwrap();
        p.close_path();
        p
    }

    fn inside(p: &PathData, x: f32, y: f32) -> bool {
        p.contains(Vec2::new(x, y), WindingRule::NonZero, DEFAULT_TOLERANCE)
    }

    // ── builder protocol ──────────────────────────────────────────────────

    #[test]
    fn triangle_membership() {
        let p = triangle();
        assert!(inside(&p, 5.0, 5.0));
        assert!(inside(&p, 8.0, 2.0));
        assert!(!inside(&p, 20.0, 20.0));
        assert!(!inside(&p, 2.0, 8.0));
    }

    #[test]
    fn command_after_close_starts_new_subpath_at_start() {
        let mut p = triangle();
        p.line_to(0.0, 10.0).unwrap();
        assert_eq!(p.subpaths().len(), 2);
        assert_eq!(p.subpaths()[1].start, Vec2::new(0.0, 0.0));
        assert!(!p.subpaths()[1].closed);
    }

    #[test]
    fn line_without_move_starts_at_origin() {
        let mut p = PathData::new();
        p.line_to(3.0, 4.0).unwrap();
        assert_eq!(p.subpaths()[0].start, Vec2::zero());
        assert_eq!(p.current_point(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn consecutive_moves_collapse() {
        let mut p = PathData::new();
        p.move_to(1.0, 1.0).unwrap();
        p.move_to(2.0, 2.0).unwrap();
        assert_eq!(p.subpaths().len(), 1);
        assert_eq!(p.subpaths()[0].start, Vec2::new(2.0, 2.0));
        assert!(p.is_empty());
    }

    #[test]
    fn curve_to_v_uses_current_point_as_first_control() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.curve_to_v(10.0, 10.0, 10.0, 0.0).unwrap();
        let mut q = PathData::new();
        q.move_to(0.0, 0.0).unwrap();
        q.curve_to(0.0, 0.0, 10.0, 10.0, 10.0, 0.0).unwrap();
        assert_eq!(p.flatten(0.01), q.flatten(0.01));
    }

    #[test]
    fn close_without_subpath_is_noop() {
        let mut p = PathData::new();
        p.close_path();
        assert!(p.subpaths().is_empty());
    }

    // ── composite commands ────────────────────────────────────────────────

    #[test]
    fn rect_is_closed_subpath() {
        let mut p = PathData::new();
        p.rect(1.0, 2.0, 3.0, 4.0).unwrap();
        let sub = &p.subpaths()[0];
        assert!(sub.closed);
        assert_eq!(sub.segments.len(), 3);
        assert_eq!(p.bounds(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn rounded_rect_radius_is_clamped() {
        let mut p = PathData::new();
        p.rounded_rect(0.0, 0.0, 10.0, 10.0, 50.0).unwrap();
        // Degenerates to the inscribed circle: corners are outside, center inside.
        assert!(inside(&p, 5.0, 5.0));
        assert!(!inside(&p, 0.5, 0.5));
        assert!(inside(&p, 5.0, 0.2));
    }

    #[test]
    fn rounded_rect_zero_radius_is_rect() {
        let mut a = PathData::new();
        a.rounded_rect(0.0, 0.0, 4.0, 2.0, 0.0).unwrap();
        let mut b = PathData::new();
        b.rect(0.0, 0.0, 4.0, 2.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ellipse_membership() {
        let mut p = PathData::new();
        p.ellipse(0.0, 0.0, 20.0, 10.0).unwrap();
        assert!(inside(&p, 19.0, 0.0));
        assert!(!inside(&p, 0.0, 11.0));
        assert!(!inside(&p, 15.0, 8.0));
    }

    // ── construction errors ───────────────────────────────────────────────

    #[test]
    fn negative_extents_are_rejected() {
        let mut p = PathData::new();
        assert!(p.rect(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(p.rounded_rect(0.0, 0.0, 1.0, 1.0, -0.5).is_err());
        assert!(p.ellipse(0.0, 0.0, 1.0, -2.0).is_err());
        assert!(p.subpaths().is_empty());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut p = PathData::new();
        assert!(p.move_to(f32::NAN, 0.0).is_err());
        assert!(p.line_to(0.0, f32::INFINITY).is_err());
        assert!(p.curve_to(0.0, 0.0, 1.0, 1.0, f32::NAN, 2.0).is_err());
        assert!(p.subpaths().is_empty());
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn transform_maps_every_point() {
        let mut p = triangle();
        p.transform(&Matrix::translation(100.0, 0.0));
        assert!(inside(&p, 105.0, 5.0));
        assert!(!inside(&p, 5.0, 5.0));
    }
}
