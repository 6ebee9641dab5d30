use std::sync::Arc;

use vellum_core::{Matrix, Vec2};

use super::DrawCmd;
use crate::region::Region;

/// A single recorded draw: command plus the state it was issued under.
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Insertion index within the list.
    pub order: u32,
    pub cmd: DrawCmd,
    /// User space to device space.
    pub transform: Matrix,
    /// Cumulative scope opacity times the draw call's own opacity.
    pub opacity: f32,
    /// Device-space clip shapes; the item is visible only inside all of them.
    pub clip: Vec<Arc<Region>>,
}

impl DrawItem {
    /// True when `device` survives every clip shape of this item.
    pub fn clip_contains(&self, device: Vec2) -> bool {
        self.clip.iter().all(|r| r.contains(device))
    }

    /// True when the fill of a path command covers `device` before clipping.
    /// Always false for images and for paths without a fill.
    pub fn fill_contains(&self, device: Vec2, tolerance: f32) -> bool {
        let DrawCmd::Path(draw) = &self.cmd else {
            return false;
        };
        let Some(fill) = &draw.fill else {
            return false;
        };
        match self.transform.invert() {
            Some(inverse) => draw.path.contains(inverse.apply(device), fill.rule, tolerance),
            None => false,
        }
    }

    /// True when this item paints `device`: filled path interior or visible image
    /// area, intersected with the clip. Stroke outlines are not considered.
    pub fn covers(&self, device: Vec2, tolerance: f32) -> bool {
        if !self.clip_contains(device) {
            return false;
        }
        match &self.cmd {
            DrawCmd::Path(_) => self.fill_contains(device, tolerance),
            DrawCmd::Image(image) => {
                let Some(inverse) = self.transform.invert() else {
                    return false;
                };
                let local = inverse.apply(device);
                image.visible_area().is_some_and(|area| area.contains(local))
            }
        }
    }
}

/// Recorded draw stream, in paint order.
///
/// Immediate-mode drawing has no z-index: later items paint over earlier ones.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a command issued under `transform`, `opacity` and `clip`.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd, transform: Matrix, opacity: f32, clip: Vec<Arc<Region>>) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { order, cmd, transform, opacity, clip });
    }

    /// Topmost item covering `device`, if any.
    pub fn hit_test(&self, device: Vec2, tolerance: f32) -> Option<&DrawItem> {
        self.items.iter().rev().find(|item| item.covers(device, tolerance))
    }
}
