//! Axis-aligned box geometry
//!
//! Hitboxes are shrunk by a padding on every side before testing overlap,
//! which makes near misses feel fair.

use glam::Vec2;

use crate::consts::COLLISION_PADDING;

/// Axis-aligned rectangle, top-left origin, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move by a velocity
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Padded overlap test. Each box is inset by `padding` on every side, and
/// touching edges do not count as a hit.
pub fn overlaps_padded(a: &Rect, b: &Rect, padding: f32) -> bool {
    a.x + padding < b.right() - padding
        && a.right() - padding > b.x + padding
        && a.y + padding < b.bottom() - padding
        && a.bottom() - padding > b.y + padding
}

/// Overlap test with the game's standard hitbox padding
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    overlaps_padded(a, b, COLLISION_PADDING)
}
