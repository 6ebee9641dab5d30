use vellum_core::{Matrix, PathData, Rect, Shape, Vec2, WindingRule};

/// A path snapshot paired with the rule it is filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub path: PathData,
    pub rule: WindingRule,
}

/// Layered-coverage shape.
///
/// `union` keeps both operands' geometry side by side instead of computing a
/// polygon boolean; a point is inside when any layer covers it under that
/// layer's own rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    layers: Vec<Layer>,
    tolerance: f32,
}

impl Region {
    pub fn new(path: &PathData, rule: WindingRule, tolerance: f32) -> Self {
        Self { layers: vec![Layer { path: path.clone(), rule }], tolerance }
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.layers.iter().any(|l| l.path.contains(point, l.rule, self.tolerance))
    }

    /// Control-point bounds over all layers.
    pub fn bounds(&self) -> Option<Rect> {
        self.layers.iter().filter_map(|l| l.path.bounds()).reduce(Rect::union)
    }
}

impl Shape for Region {
    type Transform = Matrix;

    fn transform(&mut self, transform: &Matrix) {
        for layer in &mut self.layers {
            layer.path.transform(transform);
        }
    }

    fn union(&mut self, other: &Self) {
        self.layers.extend(other.layers.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::Path;
    use vellum_core::path::DEFAULT_TOLERANCE;

    fn square(x: f32, y: f32, size: f32, rule: WindingRule) -> Region {
        let mut p = PathData::new();
        p.rect(x, y, size, size).unwrap();
        Region::new(&p, rule, DEFAULT_TOLERANCE)
    }

    #[test]
    fn union_is_logical_or() {
        let mut a = square(0.0, 0.0, 10.0, WindingRule::NonZero);
        let b = square(20.0, 0.0, 10.0, WindingRule::NonZero);
        a.union(&b);
        assert!(a.contains(Vec2::new(5.0, 5.0)));
        assert!(a.contains(Vec2::new(25.0, 5.0)));
        assert!(!a.contains(Vec2::new(15.0, 5.0)));
        assert_eq!(a.layers().len(), 2);
    }

    #[test]
    fn union_keeps_each_operand_rule() {
        // Even-odd ring: outer square with a hole.
        let mut ring = PathData::new();
        ring.rect(0.0, 0.0, 10.0, 10.0).unwrap();
        ring.rect(3.0, 3.0, 4.0, 4.0).unwrap();
        let mut shape = Region::new(&ring, WindingRule::EvenOdd, DEFAULT_TOLERANCE);
        assert!(!shape.contains(Vec2::new(5.0, 5.0)));

        // Overlapping layers do not cancel out: the hole is filled by the second operand.
        shape.union(&square(4.0, 4.0, 2.0, WindingRule::EvenOdd));
        assert!(shape.contains(Vec2::new(5.0, 5.0)));
        assert!(!shape.contains(Vec2::new(3.5, 3.5)));
    }

    #[test]
    fn transform_moves_all_layers() {
        let mut a = square(0.0, 0.0, 10.0, WindingRule::NonZero);
        a.union(&square(20.0, 0.0, 10.0, WindingRule::NonZero));
        a.transform(&Matrix::translation(0.0, 100.0));
        assert!(a.contains(Vec2::new(5.0, 105.0)));
        assert!(a.contains(Vec2::new(25.0, 105.0)));
        assert!(!a.contains(Vec2::new(5.0, 5.0)));
        assert_eq!(a.bounds(), Some(Rect::new(0.0, 100.0, 30.0, 10.0)));
    }
}
