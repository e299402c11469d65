//! Rectangle overlap queries
//!
//! Every hitbox in the game is an axis-aligned rectangle. Overlap is strict:
//! rectangles that only share an edge do not collide, which lets the player
//! stand flush against a wall and still slide along it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Tile, TileGrid};
use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// The whole play area
    pub fn world() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }
}

/// Which tiles stop a mover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocking {
    /// Main walls and small obstacles (player, zombies, spawns)
    WallsAndObstacles,
    /// Main walls only (ghosts phase through small obstacles)
    WallsOnly,
}

impl Blocking {
    #[inline]
    pub fn blocks(self, tile: Tile) -> bool {
        match (self, tile) {
            (_, Tile::Empty) => false,
            (_, Tile::MainWall) => true,
            (Blocking::WallsAndObstacles, Tile::SmallObstacle) => true,
            (Blocking::WallsOnly, Tile::SmallObstacle) => false,
        }
    }
}

/// Rectangle covered by the tile at (col, row)
#[inline]
pub fn tile_rect(col: usize, row: usize) -> Rect {
    let min = Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
    Rect::new(min, min + Vec2::splat(TILE_SIZE))
}

/// Check whether `rect` overlaps any tile that `blocking` treats as solid
///
/// Only the tiles under the rectangle are visited; parts of the rectangle
/// outside the grid are ignored (play-area bounds are checked separately).
pub fn overlaps_grid(grid: &TileGrid, rect: &Rect, blocking: Blocking) -> bool {
    if rect.max.x <= 0.0 || rect.max.y <= 0.0 {
        return false;
    }
    let col_start = (rect.min.x / TILE_SIZE).floor().max(0.0) as usize;
    let row_start = (rect.min.y / TILE_SIZE).floor().max(0.0) as usize;
    let col_end = ((rect.max.x / TILE_SIZE).ceil() as usize).min(grid.width());
    let row_end = ((rect.max.y / TILE_SIZE).ceil() as usize).min(grid.height());

    for row in row_start..row_end {
        for col in col_start..col_end {
            if blocking.blocks(grid.get(col, row)) && tile_rect(col, row).intersects(rect) {
                return true;
            }
        }
    }
    false
}

/// Check whether `rect` overlaps any of `others`
pub fn overlaps_any(rect: &Rect, others: &[Rect]) -> bool {
    others.iter().any(|other| rect.intersects(other))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid() -> TileGrid {
        TileGrid::bordered(GRID_WIDTH, GRID_HEIGHT)
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(40.0));
        let b = Rect::new(Vec2::new(40.0, 0.0), Vec2::new(80.0, 40.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = Rect::new(Vec2::new(39.0, 39.0), Vec2::new(60.0, 60.0));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_from_center_round_trips_center() {
        let r = Rect::from_center(Vec2::new(100.0, 200.0), Vec2::splat(40.0));
        assert_eq!(r.min, Vec2::new(80.0, 180.0));
        assert_eq!(r.center(), Vec2::new(100.0, 200.0));
        assert_eq!(r.size(), Vec2::splat(40.0));
    }

    #[test]
    fn test_border_blocks_everyone() {
        let grid = open_grid();
        // Straddles the left border column
        let rect = Rect::from_center(Vec2::new(50.0, 400.0), Vec2::splat(40.0));
        assert!(overlaps_grid(&grid, &rect, Blocking::WallsAndObstacles));
        assert!(overlaps_grid(&grid, &rect, Blocking::WallsOnly));

        // Flush against the border is fine
        let flush = Rect::from_center(Vec2::new(60.0, 400.0), Vec2::splat(40.0));
        assert!(!overlaps_grid(&grid, &flush, Blocking::WallsAndObstacles));
    }

    #[test]
    fn test_ghost_blocking_ignores_small_obstacles() {
        let mut grid = open_grid();
        grid.set(10, 10, Tile::SmallObstacle);
        let rect = tile_rect(10, 10).inset(5.0);
        assert!(overlaps_grid(&grid, &rect, Blocking::WallsAndObstacles));
        assert!(!overlaps_grid(&grid, &rect, Blocking::WallsOnly));
    }

    #[test]
    fn test_rect_outside_grid_is_ignored() {
        let grid = open_grid();
        let rect = Rect::new(Vec2::new(-100.0, -100.0), Vec2::new(-10.0, -10.0));
        assert!(!overlaps_grid(&grid, &rect, Blocking::WallsAndObstacles));
    }
}
