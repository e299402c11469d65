//! Deterministic level layouts
//!
//! `generate` maps a level number to a tile grid with no randomness involved,
//! so a level always looks the same and regeneration is reproducible.
//! Every layout is framed by a ring of main walls. Levels 4 and up finish
//! with a forced-clear pass that carves waypoints through whatever the
//! pattern placed, which keeps dense levels navigable.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    /// Border wall, solid for every mover
    MainWall,
    /// Interior obstacle, ghosts pass through
    SmallObstacle,
}

/// Row-major grid of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl TileGrid {
    /// Empty grid framed by main walls
    pub fn bordered(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Tile::Empty; width * height],
        };
        for col in 0..width {
            grid.set(col, 0, Tile::MainWall);
            grid.set(col, height - 1, Tile::MainWall);
        }
        for row in 0..height {
            grid.set(0, row, Tile::MainWall);
            grid.set(width - 1, row, Tile::MainWall);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tile at (col, row); anything outside the grid reads as a main wall
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Tile {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col]
        } else {
            Tile::MainWall
        }
    }

    /// Overwrite a tile. Out-of-range coordinates are ignored.
    pub fn set(&mut self, col: usize, row: usize, tile: Tile) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = tile;
        }
    }

    /// True if (col, row) lies strictly inside the border ring
    #[inline]
    pub fn is_interior(&self, col: usize, row: usize) -> bool {
        col > 0 && row > 0 && col + 1 < self.width && row + 1 < self.height
    }

    /// Place a small obstacle if the cell is inside the border
    fn place_obstacle(&mut self, col: usize, row: usize) {
        if self.is_interior(col, row) {
            self.set(col, row, Tile::SmallObstacle);
        }
    }

    /// Obstacle on the cell plus its right and lower neighbours
    fn place_l(&mut self, col: usize, row: usize) {
        self.place_obstacle(col, row);
        self.place_obstacle(col + 1, row);
        self.place_obstacle(col, row + 1);
    }

    /// Obstacle filling the 2x2 block whose top-left is (col, row)
    fn place_block(&mut self, col: usize, row: usize) {
        self.place_l(col, row);
        self.place_obstacle(col + 1, row + 1);
    }

    /// Clear an interior cell back to empty
    fn clear(&mut self, col: usize, row: usize) {
        if self.is_interior(col, row) {
            self.set(col, row, Tile::Empty);
        }
    }

    /// Iterate `(col, row, tile)` over every cell
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i % self.width, i / self.width, tile))
    }

    /// Number of cells holding `tile`
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }
}

/// Obstacle pattern used by procedural levels (5 and up)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Spiral,
    Diamond,
    Grid,
    Modulo { modulus: usize },
}

impl Pattern {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=5 => Pattern::Spiral,
            6 => Pattern::Diamond,
            7 => Pattern::Grid,
            _ => Pattern::Modulo {
                modulus: level as usize + 3,
            },
        }
    }
}

/// Build the layout for a level. Level 0 is treated as level 1.
pub fn generate(level: u32) -> TileGrid {
    let level = if level == 0 {
        log::warn!("Level 0 requested, generating level 1 instead");
        1
    } else {
        level
    };

    let mut grid = TileGrid::bordered(GRID_WIDTH, GRID_HEIGHT);
    match level {
        1 => simple_layout(&mut grid),
        2 => cross_layout(&mut grid),
        3 => lattice_layout(&mut grid),
        4 => ring_layout(&mut grid),
        _ => procedural_layout(&mut grid, Pattern::for_level(level)),
    }

    // Always last: waypoints override any obstacle placed above
    for (col, row) in forced_clear_cells(level) {
        grid.clear(col, row);
    }

    log::debug!(
        "Generated level {}: {} obstacles",
        level,
        grid.count(Tile::SmallObstacle)
    );
    grid
}

/// Cells the generator guarantees empty for a level, waypoints and their
/// declared neighbours included
pub fn forced_clear_cells(level: u32) -> Vec<(usize, usize)> {
    let (w, h) = (GRID_WIDTH, GRID_HEIGHT);
    let mut cells = Vec::new();
    match level {
        0..=3 => {}
        4 => {
            for col in (8..w - 8).step_by(6) {
                for row in (8..h - 8).step_by(6) {
                    cells.extend([(col, row), (col + 1, row), (col, row + 1)]);
                }
            }
        }
        _ => {
            for col in (4..w - 4).step_by(4) {
                for row in (4..h - 4).step_by(4) {
                    cells.push((col, row));
                    if col + 1 < w - 1 {
                        cells.push((col + 1, row));
                    }
                    if row + 1 < h - 1 {
                        cells.push((col, row + 1));
                        cells.push((col + 1, row + 1));
                    }
                }
            }
        }
    }
    cells
}

/// Level 1: corner clusters and a few scattered points
fn simple_layout(grid: &mut TileGrid) {
    let (w, h) = (grid.width(), grid.height());
    for col in (3..6).chain(w - 6..w - 3) {
        grid.place_obstacle(col, 3);
        grid.place_obstacle(col, h - 4);
    }
    for (col, row) in [(8, 6), (15, 8), (22, 12), (10, 14)] {
        grid.place_obstacle(col, row);
    }
}

/// Level 2: a cross with a gap in each arm, plus corner barriers
fn cross_layout(grid: &mut TileGrid) {
    let (w, h) = (grid.width(), grid.height());
    for col in 6..24 {
        if !(10..=15).contains(&col) {
            grid.place_obstacle(col, h / 2);
        }
    }
    for row in 4..16 {
        if !(8..=11).contains(&row) {
            grid.place_obstacle(w / 2, row);
        }
    }
    for i in 2..5 {
        grid.place_obstacle(i, 2);
        grid.place_obstacle(i, h - 3);
        grid.place_obstacle(w - 1 - i, 2);
        grid.place_obstacle(w - 1 - i, h - 3);
    }
}

/// Level 3: wall segments on a 4-cell lattice with periodic gaps
fn lattice_layout(grid: &mut TileGrid) {
    let (w, h) = (grid.width(), grid.height());
    for col in (2..w - 2).step_by(4) {
        for row in 3..h - 3 {
            if row % 4 != 0 {
                grid.place_obstacle(col, row);
            }
        }
    }
    for row in (2..h - 2).step_by(4) {
        for col in 3..w - 3 {
            if col % 4 != 0 {
                grid.place_obstacle(col, row);
            }
        }
    }
    for (col, row) in [(6, 6), (12, 10), (18, 8), (24, 12)] {
        grid.place_obstacle(col, row);
    }
}

/// Level 4: dotted ring plus an inner lattice of 2x2 blocks
fn ring_layout(grid: &mut TileGrid) {
    let (w, h) = (grid.width(), grid.height());
    for col in 3..w - 3 {
        if col % 3 == 0 {
            grid.place_obstacle(col, 3);
            grid.place_obstacle(col, h - 4);
        }
    }
    for row in 3..h - 3 {
        if row % 3 == 0 {
            grid.place_obstacle(3, row);
            grid.place_obstacle(w - 4, row);
        }
    }
    for col in (6..w - 6).step_by(3) {
        for row in (6..h - 6).step_by(3) {
            if (col + row) % 6 == 0 {
                grid.place_block(col, row);
            }
        }
    }
}

/// Levels 5+: one of the deterministic patterns
fn procedural_layout(grid: &mut TileGrid, pattern: Pattern) {
    let (w, h) = (grid.width(), grid.height());
    match pattern {
        Pattern::Spiral => {
            for col in (4..w - 4).step_by(2) {
                for row in (4..h - 4).step_by(2) {
                    if (col + row) % 4 == 0 {
                        grid.place_l(col, row);
                    }
                }
            }
        }
        Pattern::Diamond => {
            let (cx, cy) = (w / 2, h / 2);
            for col in 2..w - 2 {
                for row in 2..h - 2 {
                    if col.abs_diff(cx) + row.abs_diff(cy) < 8 && (col + row) % 3 == 0 {
                        grid.place_obstacle(col, row);
                    }
                }
            }
        }
        Pattern::Grid => {
            for col in (3..w - 3).step_by(3) {
                for row in (3..h - 3).step_by(3) {
                    if (col + row) % 6 == 0 {
                        grid.place_block(col, row);
                    }
                }
            }
        }
        Pattern::Modulo { modulus } => {
            for col in (2..w - 2).step_by(2) {
                for row in (2..h - 2).step_by(2) {
                    if (col * row) % modulus == 0 {
                        grid.place_l(col, row);
                    }
                }
            }
        }
    }
}
