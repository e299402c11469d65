//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock supplied by the caller, never read from the system
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod grid;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Blocking, Rect, overlaps_grid};
pub use entity::{Coin, Direction, Enemy, EnemyKind, Player, PowerUp, PowerUpKind};
pub use grid::{Tile, TileGrid, forced_clear_cells, generate};
pub use snapshot::{EntityKind, EntityView, Snapshot};
pub use spawn::find_position;
pub use state::{GameEvent, GamePhase, GameState, Session};
pub use tick::{TickInput, tick};
