//! Idle/demo mode: a scripted input collaborator
//!
//! Walks toward the nearest coin (then the nearest power-up), keeps going
//! between levels and restarts after game over. Good enough for soak runs
//! and demos; it does not path-find around obstacles.

use glam::Vec2;

use super::entity::Direction;
use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Closer than this on an axis counts as aligned
const AXIS_DEADZONE: f32 = 4.0;

/// Intents for the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    match state.session.phase {
        GamePhase::LevelComplete => TickInput {
            continue_level: true,
            ..Default::default()
        },
        GamePhase::GameOver => TickInput {
            restart: true,
            ..Default::default()
        },
        GamePhase::Paused => TickInput {
            pause: true,
            ..Default::default()
        },
        GamePhase::Menu => TickInput::default(),
        GamePhase::Playing => TickInput {
            movement: nearest_pickup(state).and_then(|target| steer(state.player.pos, target)),
            ..Default::default()
        },
    }
}

/// Nearest coin, or the nearest power-up once all coins are gone
pub fn nearest_pickup(state: &GameState) -> Option<Vec2> {
    let from = state.player.pos;
    nearest(from, state.coins.iter().map(|c| c.pos))
        .or_else(|| nearest(from, state.power_ups.iter().map(|p| p.pos)))
}

fn nearest(from: Vec2, positions: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    positions.min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

/// Eight-way direction from `from` toward `to`
pub fn steer(from: Vec2, to: Vec2) -> Option<Direction> {
    let delta = to - from;
    let axis = |d: f32| {
        if d > AXIS_DEADZONE {
            1
        } else if d < -AXIS_DEADZONE {
            -1
        } else {
            0
        }
    };
    Direction::from_axes(axis(delta.x), axis(delta.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_steer() {
        let from = Vec2::new(100.0, 100.0);
        assert_eq!(steer(from, Vec2::new(200.0, 102.0)), Some(Direction::Right));
        assert_eq!(steer(from, Vec2::new(50.0, 20.0)), Some(Direction::UpLeft));
        assert_eq!(steer(from, Vec2::new(101.0, 99.0)), None);
    }

    #[test]
    fn test_targets_nearest_coin() {
        let mut state = GameState::new(Settings::with_seed(8));
        state.player.pos = Vec2::new(480.0, 300.0);
        // Opening coins sit at (500, 300), (700, 400), (900, 200)
        assert_eq!(nearest_pickup(&state), Some(Vec2::new(500.0, 300.0)));
        let input = autopilot_input(&state);
        assert_eq!(input.movement, Some(Direction::Right));

        state.coins.clear();
        assert_eq!(nearest_pickup(&state), Some(Vec2::new(600.0, 600.0)));
        state.power_ups.clear();
        assert_eq!(autopilot_input(&state).movement, None);
    }

    #[test]
    fn test_phase_intents() {
        let mut state = GameState::new(Settings::with_seed(8));
        state.session.phase = GamePhase::LevelComplete;
        assert!(autopilot_input(&state).continue_level);
        state.session.phase = GamePhase::GameOver;
        assert!(autopilot_input(&state).restart);
        state.session.phase = GamePhase::Paused;
        assert!(autopilot_input(&state).pause);
    }
}
