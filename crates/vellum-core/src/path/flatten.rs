use crate::coords::Vec2;

use super::{PathData, Segment, WindingRule};

/// Flattening tolerance used when the caller passes a non-positive value.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

/// Upper bound on line segments emitted per cubic.
const MAX_CUBIC_STEPS: u32 = 256;

/// Distance under which a point counts as lying on an edge.
const EDGE_EPSILON: f32 = 1e-4;

/// A flattened subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

pub(crate) fn flatten(path: &PathData, tolerance: f32) -> Vec<Polyline> {
    let tolerance = if tolerance > 0.0 && tolerance.is_finite() { tolerance } else { DEFAULT_TOLERANCE };

    path.subpaths()
        .iter()
        .map(|sub| {
            let mut points = vec![sub.start];
            let mut pen = sub.start;
            for seg in &sub.segments {
                match *seg {
                    Segment::Line(to) => points.push(to),
                    Segment::Cubic { ctrl1, ctrl2, to } => {
                        flatten_cubic([pen, ctrl1, ctrl2, to], tolerance, &mut points)
                    }
                    Segment::CubicV { ctrl2, to } => {
                        flatten_cubic([pen, pen, ctrl2, to], tolerance, &mut points)
                    }
                }
                pen = seg.end();
            }
            Polyline { points, closed: sub.closed }
        })
        .collect()
}

/// Uniform subdivision; the step count bounds the chord error by `tolerance`.
fn flatten_cubic([p0, p1, p2, p3]: [Vec2; 4], tolerance: f32, out: &mut Vec<Vec2>) {
    let dd = (p0 - p1 * 2.0 + p2).length().max((p1 - p2 * 2.0 + p3).length());
    let steps = ((0.75 * dd / tolerance).sqrt().ceil() as u32).clamp(1, MAX_CUBIC_STEPS);

    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let mt = 1.0 - t;
        let p = p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t);
        out.push(p);
    }
}

/// Point membership over flattened subpaths, each implicitly closed.
pub(crate) fn contains(polylines: &[Polyline], p: Vec2, rule: WindingRule) -> bool {
    let mut winding = 0;
    for poly in polylines {
        let pts = &poly.points;
        // A subpath that encloses no area paints nothing, not even its outline.
        if pts.len() < 3 || encloses_nothing(pts) {
            continue;
        }
        for (i, &a) in pts.iter().enumerate() {
            let b = pts[(i + 1) % pts.len()];
            if on_edge(a, b, p) {
                return true;
            }
            winding += crossing(a, b, p);
        }
    }
    rule.is_inside(winding)
}

/// Signed contribution of edge `a → b` to the winding number of `p`.
fn crossing(a: Vec2, b: Vec2, p: Vec2) -> i32 {
    let side = (b - a).cross(p - a);
    if a.y <= p.y {
        if b.y > p.y && side > 0.0 {
            return 1;
        }
    } else if b.y <= p.y && side < 0.0 {
        return -1;
    }
    0
}

/// True when every point lies on one line through the first point.
fn encloses_nothing(pts: &[Vec2]) -> bool {
    let origin = pts[0];
    let fan: f32 = pts.windows(2).map(|w| (w[0] - origin).cross(w[1] - origin).abs()).sum();
    let reach = pts.iter().map(|p| p.distance(origin)).fold(0.0, f32::max);
    fan <= EDGE_EPSILON * reach
}

fn on_edge(a: Vec2, b: Vec2, p: Vec2) -> bool {
    let edge = b - a;
    let len = edge.length();
    if len == 0.0 {
        return a.distance(p) <= EDGE_EPSILON;
    }
    let along = edge.dot(p - a);
    edge.cross(p - a).abs() <= EDGE_EPSILON * len && along >= 0.0 && along <= len * len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Path;

    fn square(path: &mut PathData, x: f32, y: f32, size: f32) {
        path.rect(x, y, size, size).unwrap();
    }

    #[test]
    fn line_segments_are_kept_verbatim() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.line_to(1.0, 0.0).unwrap();
        let lines = p.flatten(DEFAULT_TOLERANCE);
        assert_eq!(lines[0].points, vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert!(!lines[0].closed);
    }

    #[test]
    fn cubic_ends_on_its_endpoint() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.curve_to(0.0, 50.0, 100.0, 50.0, 100.0, 0.0).unwrap();
        let lines = p.flatten(0.05);
        let last = *lines[0].points.last().unwrap();
        assert!(last.distance(Vec2::new(100.0, 0.0)) < 1e-3);
        assert!(lines[0].points.len() > 10);
    }

    #[test]
    fn straight_cubic_needs_one_step() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.curve_to(1.0, 0.0, 2.0, 0.0, 3.0, 0.0).unwrap();
        assert_eq!(p.flatten(DEFAULT_TOLERANCE)[0].points.len(), 2);
    }

    #[test]
    fn nested_squares_differ_by_rule() {
        let mut p = PathData::new();
        square(&mut p, 0.0, 0.0, 10.0);
        square(&mut p, 2.0, 2.0, 6.0);
        let center = Vec2::new(5.0, 5.0);
        assert!(p.contains(center, WindingRule::NonZero, DEFAULT_TOLERANCE));
        assert!(!p.contains(center, WindingRule::EvenOdd, DEFAULT_TOLERANCE));
        assert!(p.contains(Vec2::new(1.0, 5.0), WindingRule::EvenOdd, DEFAULT_TOLERANCE));
    }

    #[test]
    fn boundary_points_are_inside() {
        let mut p = PathData::new();
        square(&mut p, 0.0, 0.0, 10.0);
        assert!(p.contains(Vec2::new(10.0, 5.0), WindingRule::NonZero, DEFAULT_TOLERANCE));
        assert!(p.contains(Vec2::new(0.0, 0.0), WindingRule::EvenOdd, DEFAULT_TOLERANCE));
    }

    #[test]
    fn open_subpath_is_filled_as_closed() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.line_to(10.0, 0.0).unwrap();
        p.line_to(10.0, 10.0).unwrap();
        assert!(p.contains(Vec2::new(8.0, 2.0), WindingRule::NonZero, DEFAULT_TOLERANCE));
    }

    #[test]
    fn zero_area_subpath_covers_nothing() {
        let mut p = PathData::new();
        p.move_to(0.0, 0.0).unwrap();
        p.line_to(10.0, 0.0).unwrap();
        assert!(!p.contains(Vec2::new(5.0, 0.0), WindingRule::NonZero, DEFAULT_TOLERANCE));

        p.line_to(20.0, 0.0).unwrap();
        assert!(!p.contains(Vec2::new(15.0, 0.0), WindingRule::EvenOdd, DEFAULT_TOLERANCE));

        // A real subpath next to it keeps its own boundary.
        square(&mut p, 0.0, 5.0, 5.0);
        assert!(p.contains(Vec2::new(0.0, 7.0), WindingRule::NonZero, DEFAULT_TOLERANCE));
        assert!(!p.contains(Vec2::new(5.0, 0.0), WindingRule::NonZero, DEFAULT_TOLERANCE));
    }
}
