//! Brick grid layout and storage
//!
//! The grid is a fixed rows x columns array. Bricks are never removed from it;
//! a destroyed brick just has its `alive` flag cleared, and a cleared grid is
//! rebuilt in place.

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;

/// Geometry of the brick wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub brick_size: Vec2,
    /// Gap between neighbouring bricks (both axes)
    pub padding: f32,
    /// Top-left corner of brick (0, 0)
    pub offset: Vec2,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            cols: BRICK_COLS,
            brick_size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            padding: BRICK_PADDING,
            offset: Vec2::new(BRICK_OFFSET_LEFT, BRICK_OFFSET_TOP),
        }
    }
}

impl GridLayout {
    /// Top-left corner of the brick at (row, col)
    pub fn brick_origin(&self, row: usize, col: usize) -> Vec2 {
        Vec2::new(
            col as f32 * (self.brick_size.x + self.padding) + self.offset.x,
            row as f32 * (self.brick_size.y + self.padding) + self.offset.y,
        )
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub alive: bool,
}

/// Row-major brick storage
#[derive(Debug, Clone)]
pub struct BrickGrid {
    layout: GridLayout,
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// Build a full grid of live bricks
    pub fn generate(layout: GridLayout) -> Self {
        let mut grid = Self {
            layout,
            bricks: Vec::with_capacity(layout.len()),
        };
        grid.regenerate();
        grid
    }

    /// Recreate every brick, all alive
    pub fn regenerate(&mut self) {
        self.bricks.clear();
        for row in 0..self.layout.rows {
            for col in 0..self.layout.cols {
                self.bricks.push(Brick {
                    pos: self.layout.brick_origin(row, col),
                    alive: true,
                });
            }
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.layout.rows || col >= self.layout.cols {
            return None;
        }
        self.bricks.get(row * self.layout.cols + col)
    }

    /// Clear the alive flag at (row, col). Returns true if the brick was alive.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        if row >= self.layout.rows || col >= self.layout.cols {
            return false;
        }
        let idx = row * self.layout.cols + col;
        match self.bricks.get_mut(idx) {
            Some(brick) if brick.alive => {
                brick.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Bounding box of a brick
    pub fn rect(&self, brick: &Brick) -> Rect {
        Rect::new(brick.pos, self.layout.brick_size)
    }

    /// All bricks with their (row, col), row-major
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        let cols = self.layout.cols;
        self.bricks
            .iter()
            .enumerate()
            .map(move |(i, b)| (i / cols, i % cols, b))
    }

    /// Surviving bricks with their (row, col)
    pub fn alive(&self) -> impl Iterator<Item = (usize, usize, &Brick)> {
        self.iter().filter(|(_, _, b)| b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Level complete: no brick survives
    pub fn is_cleared(&self) -> bool {
        !self.bricks.iter().any(|b| b.alive)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_positions() {
        let layout = GridLayout::default();
        assert_eq!(layout.brick_origin(0, 0), Vec2::new(30.0, 30.0));
        assert_eq!(layout.brick_origin(0, 1), Vec2::new(80.0, 30.0));
        assert_eq!(layout.brick_origin(3, 7), Vec2::new(380.0, 120.0));
    }

    #[test]
    fn test_generate_is_full() {
        let grid = BrickGrid::generate(GridLayout::default());
        assert_eq!(grid.len(), 32);
        assert_eq!(grid.alive_count(), 32);
        assert!(!grid.is_cleared());
    }

    #[test]
    fn test_destroy_only_once() {
        let mut grid = BrickGrid::generate(GridLayout::default());
        assert!(grid.destroy(1, 2));
        assert!(!grid.destroy(1, 2));
        assert!(!grid.get(1, 2).unwrap().alive);
        assert_eq!(grid.alive_count(), 31);
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = BrickGrid::generate(GridLayout::default());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 8).is_none());
        assert!(!grid.destroy(9, 9));
    }

    #[test]
    fn test_cleared_and_regenerate() {
        let mut grid = BrickGrid::generate(GridLayout {
            rows: 2,
            cols: 2,
            ..Default::default()
        });
        for (row, col) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            grid.destroy(row, col);
        }
        assert!(grid.is_cleared());

        grid.regenerate();
        assert_eq!(grid.alive_count(), 4);
        assert_eq!(grid.get(1, 1).unwrap().pos, grid.layout().brick_origin(1, 1));
    }

    #[test]
    fn test_iter_reports_row_col() {
        let grid = BrickGrid::generate(GridLayout::default());
        let (row, col, brick) = grid.iter().nth(9).unwrap();
        assert_eq!((row, col), (1, 1));
        assert_eq!(brick.pos, grid.layout().brick_origin(1, 1));
    }
}
