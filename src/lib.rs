//! Dungeons & Zombies - top-down dungeon survival core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid generation, spawning, entities, session)
//! - `tuning`: Data-driven game balance
//! - `settings`: Run options (seed, boost policy, starting level)

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{BoostExpiry, ConfigError, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u64 = 60;

    /// Grid dimensions in tiles
    pub const GRID_WIDTH: usize = 30;
    pub const GRID_HEIGHT: usize = 20;
    /// Edge length of one tile
    pub const TILE_SIZE: f32 = 40.0;

    /// Play area (the grid fills it exactly)
    pub const WORLD_WIDTH: f32 = GRID_WIDTH as f32 * TILE_SIZE;
    pub const WORLD_HEIGHT: f32 = GRID_HEIGHT as f32 * TILE_SIZE;

    /// Inset used for random spawn probing
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Random probes before falling back to deterministic placement
    pub const SPAWN_ATTEMPTS: u32 = 100;
    /// Raster step of the last-resort placement scan
    pub const SPAWN_SCAN_STEP: f32 = 50.0;
    /// Returned when no free spot exists anywhere
    pub const SPAWN_FALLBACK: (f32, f32) = (100.0, 100.0);

    /// Coins needed on level 1; each later level needs `BASE_COINS_REQUIRED + level`
    pub const BASE_COINS_REQUIRED: u32 = 3;
    pub const STARTING_LIVES: u8 = 3;
}

/// Simulation time in milliseconds at the given tick count
#[inline]
pub fn tick_to_ms(tick: u64) -> u64 {
    tick * 1000 / consts::TICK_RATE
}

