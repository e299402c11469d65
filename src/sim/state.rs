//! Game state and session lifecycle
//!
//! `GameState` owns the grid, every entity and the session. Level changes
//! build the next grid and entity set first and then swap them in, so the
//! tick never sees a half-built level.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, Enemy, Player, PowerUp, PowerUpKind};
use super::grid::{TileGrid, generate};
use super::spawn::{Population, opening_population, populate};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen (a new game starts in `Playing`)
    Menu,
    Playing,
    Paused,
    GameOver,
    /// Coin target reached, waiting for the continue intent
    LevelComplete,
}

/// Session bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub coins_collected: u32,
    pub coins_required: u32,
    /// Carried for the HUD; a single death ends the run
    pub lives: u8,
}

impl Session {
    pub fn new(level: u32) -> Self {
        Self {
            phase: GamePhase::Playing,
            level,
            score: 0,
            coins_collected: 0,
            coins_required: Self::coins_required_for(level),
            lives: STARTING_LIVES,
        }
    }

    /// Coin target for a level: 3 on the first level, `3 + level` after
    pub fn coins_required_for(level: u32) -> u32 {
        if level <= 1 {
            BASE_COINS_REQUIRED
        } else {
            BASE_COINS_REQUIRED + level
        }
    }

    #[inline]
    pub fn target_reached(&self) -> bool {
        self.coins_collected >= self.coins_required
    }
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    CoinCollected { id: u32, value: u32 },
    PowerUpCollected { id: u32, kind: PowerUpKind },
    PlayerHit { damage: i32, health: i32 },
    PlayerDied,
    LevelComplete { level: u32 },
    Paused,
    Resumed,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub session: Session,
    pub grid: TileGrid,
    /// Persists across levels; moved and healed in place on level changes
    pub player: Player,
    /// Enemies, coins and power-ups in id order
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set by the quit intent; the driver loop stops on it
    pub quit_requested: bool,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Start a new game on `settings.start_level`
    pub fn new(settings: Settings) -> Self {
        let level = settings.start_level.max(1);
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let mut next_id = 1;
        let grid = generate(level);

        let population = if settings.opening_layout && level == 1 {
            opening_population(&grid, &settings.tuning, &mut rng, &mut next_id)
        } else {
            let coins = Session::coins_required_for(level);
            populate(&grid, level, coins, &settings.tuning, &mut rng, &mut next_id)
        };
        let player = Player::new(population.player_pos, &settings.tuning.player);

        log::info!("New game: seed={}, level={}", settings.seed, level);

        let mut state = Self {
            session: Session::new(level),
            grid,
            player,
            enemies: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            events: vec![GameEvent::LevelStarted { level }],
            time_ticks: 0,
            quit_requested: false,
            rng,
            next_id,
            settings,
        };
        state.install(population);
        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Continue from `LevelComplete`: next level, same score
    pub fn advance_level(&mut self) {
        self.session.level += 1;
        self.session.coins_required = Session::coins_required_for(self.session.level);
        self.session.phase = GamePhase::Playing;
        log::info!(
            "Advancing to level {} ({} coins required)",
            self.session.level,
            self.session.coins_required
        );
        self.regenerate();
    }

    /// Restart from `GameOver`: level 1, score 0, no power-ups
    pub fn restart(&mut self) {
        self.session = Session::new(1);
        self.player.clear_effects();
        log::info!("Restarting game");
        self.regenerate();
    }

    /// Replace the grid and every non-player entity for the current level
    fn regenerate(&mut self) {
        let level = self.session.level;
        let grid = generate(level);
        let population = populate(
            &grid,
            level,
            self.session.coins_required,
            &self.settings.tuning,
            &mut self.rng,
            &mut self.next_id,
        );
        self.grid = grid;
        self.session.coins_collected = 0;
        self.install(population);
        self.events.push(GameEvent::LevelStarted { level });
        log::info!(
            "Level {} ready: {} enemies, {} coins, {} power-ups",
            level,
            self.enemies.len(),
            self.coins.len(),
            self.power_ups.len()
        );
    }

    /// Swap in a freshly placed entity set. The previous set is dropped
    /// whole; the player is moved and healed, not recreated.
    fn install(&mut self, population: Population) {
        self.enemies = population.enemies;
        self.coins = population.coins;
        self.power_ups = population.power_ups;
        self.player.respawn(population.player_pos);
        self.normalize_order();
    }

    /// Ensure entities are sorted by id for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.coins.sort_by_key(|c| c.id);
        self.power_ups.sort_by_key(|p| p.id);
    }
}
