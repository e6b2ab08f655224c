//! Collision detection between projectiles and bricks
//!
//! A projectile is treated as a point (its tip) and a brick as an axis-aligned
//! rectangle. Edges are exclusive: a tip sitting exactly on a brick's border
//! does not count as a hit.

use glam::Vec2;

use super::grid::BrickGrid;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict point-in-rectangle test
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x > self.min.x && p.x < max.x && p.y > self.min.y && p.y < max.y
    }
}

/// First live brick (row-major) containing `point`, as (row, col)
pub fn find_hit(grid: &BrickGrid, point: Vec2) -> Option<(usize, usize)> {
    grid.alive()
        .find(|(_, _, brick)| grid.rect(brick).contains_point(point))
        .map(|(row, col, _)| (row, col))
}
