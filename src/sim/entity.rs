//! Player, enemies and pickups
//!
//! Each entity owns a centre position and a square hitbox of fixed size.
//! None of them stores a reference to the grid; movement takes the grid as
//! an argument so the level can be swapped out between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Blocking, Rect, overlaps_grid};
use super::grid::TileGrid;
use crate::settings::BoostExpiry;
use crate::tuning::{EffectTuning, EnemyTuning, PlayerTuning};

/// Eight-way movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Per-axis step sign in screen space (y grows downward).
    /// Diagonals are not normalized: each axis moves at full speed.
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::UpLeft => Vec2::new(-1.0, -1.0),
            Direction::UpRight => Vec2::new(1.0, -1.0),
            Direction::DownLeft => Vec2::new(-1.0, 1.0),
            Direction::DownRight => Vec2::new(1.0, 1.0),
        }
    }

    /// Direction from per-axis signs; `None` when both are zero
    pub fn from_axes(dx: i8, dy: i8) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (-1, -1) => Some(Direction::UpLeft),
            (1, -1) => Some(Direction::UpRight),
            (-1, 1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    /// Added to base speed
    pub speed_boost: f32,
    /// Damage multiplier (1.0 = none)
    pub damage_boost: f32,
    pub shield: bool,
    pub invulnerable: bool,
    pub invulnerable_until: u64,
    /// When each timed effect runs out (enforced only with `BoostExpiry::Timed`)
    pub speed_boost_until: Option<u64>,
    pub damage_boost_until: Option<u64>,
    pub shield_until: Option<u64>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            pos,
            size: tuning.size,
            health: tuning.max_health,
            max_health: tuning.max_health,
            speed_boost: 0.0,
            damage_boost: 1.0,
            shield: false,
            invulnerable: false,
            invulnerable_until: 0,
            speed_boost_until: None,
            damage_boost_until: None,
            shield_until: None,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Move one tick. Each axis is resolved on its own, so blocked
    /// horizontal motion still lets vertical motion through (wall sliding).
    pub fn step(&mut self, direction: Option<Direction>, base_speed: f32, grid: &TileGrid) {
        let Some(direction) = direction else {
            return;
        };
        let velocity = direction.delta() * (base_speed + self.speed_boost);
        let world = Rect::world();

        if velocity.x != 0.0 {
            let previous = self.pos.x;
            self.pos.x += velocity.x;
            let rect = self.rect();
            if overlaps_grid(grid, &rect, Blocking::WallsAndObstacles)
                || !world.contains_rect(&rect)
            {
                self.pos.x = previous;
            }
        }

        if velocity.y != 0.0 {
            let previous = self.pos.y;
            self.pos.y += velocity.y;
            let rect = self.rect();
            if overlaps_grid(grid, &rect, Blocking::WallsAndObstacles)
                || !world.contains_rect(&rect)
            {
                self.pos.y = previous;
            }
        }
    }

    /// Clear invulnerability, and timed effects if the policy says so
    pub fn update_timers(&mut self, now: u64, expiry: BoostExpiry) {
        if self.invulnerable && now >= self.invulnerable_until {
            self.invulnerable = false;
            self.invulnerable_until = 0;
        }

        if expiry == BoostExpiry::Timed {
            if self.speed_boost_until.is_some_and(|t| now >= t) {
                self.speed_boost = 0.0;
                self.speed_boost_until = None;
            }
            if self.damage_boost_until.is_some_and(|t| now >= t) {
                self.damage_boost = 1.0;
                self.damage_boost_until = None;
            }
            if self.shield_until.is_some_and(|t| now >= t) {
                self.shield = false;
                self.shield_until = None;
            }
        }
    }

    /// Apply a hit. Returns true if the player died.
    ///
    /// Ignored while invulnerable or shielded. A hit that leaves the
    /// player alive grants `invulnerability_ms` of invulnerability.
    pub fn take_damage(&mut self, amount: i32, now: u64, invulnerability_ms: u64) -> bool {
        if self.invulnerable || self.shield {
            return false;
        }
        self.health = (self.health - amount).max(0);
        if self.health <= 0 {
            return true;
        }
        self.invulnerable = true;
        self.invulnerable_until = now + invulnerability_ms;
        false
    }

    /// Apply a collected power-up. Speed and damage overwrite, never stack.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, effect: EffectTuning, now: u64) {
        let expires = Some(now + effect.duration_ms);
        match kind {
            PowerUpKind::Health => {
                self.health = (self.health + effect.magnitude as i32).min(self.max_health);
            }
            PowerUpKind::Speed => {
                self.speed_boost = effect.magnitude;
                self.speed_boost_until = expires;
            }
            PowerUpKind::Damage => {
                self.damage_boost = effect.magnitude;
                self.damage_boost_until = expires;
            }
            PowerUpKind::Shield => {
                self.shield = true;
                self.shield_until = expires;
            }
        }
    }

    /// Full health at a new position, no lingering invulnerability
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.health = self.max_health;
        self.invulnerable = false;
        self.invulnerable_until = 0;
    }

    /// Drop every power-up effect (fresh run)
    pub fn clear_effects(&mut self) {
        self.speed_boost = 0.0;
        self.damage_boost = 1.0;
        self.shield = false;
        self.speed_boost_until = None;
        self.damage_boost_until = None;
        self.shield_until = None;
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Zombie,
    /// Phases through small obstacles, main walls still stop it
    Ghost,
}

impl EnemyKind {
    pub fn blocking(self) -> Blocking {
        match self {
            EnemyKind::Zombie => Blocking::WallsAndObstacles,
            EnemyKind::Ghost => Blocking::WallsOnly,
        }
    }
}

/// A zombie or ghost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    pub damage: i32,
    pub speed: f32,
    pub attack_cooldown_ms: u64,
    /// `None` until the first attack
    pub last_attack_at: Option<u64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            kind,
            pos,
            size: tuning.size,
            health: tuning.health,
            damage: tuning.damage,
            speed: tuning.speed,
            attack_cooldown_ms: tuning.attack_cooldown_ms,
            last_attack_at: None,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Chase `target`. A move that ends inside something solid is undone
    /// on both axes at once; enemies do not slide along walls.
    pub fn step(&mut self, target: Vec2, grid: &TileGrid) {
        let to_target = target - self.pos;
        let distance = to_target.length();
        if distance <= 0.0 {
            return;
        }
        let previous = self.pos;
        self.pos += to_target / distance * self.speed;
        if overlaps_grid(grid, &self.rect(), self.kind.blocking()) {
            self.pos = previous;
        }
    }

    /// Whether the enemy attacks this tick.
    ///
    /// Committing: a `true` result stamps the attack time, so asking
    /// again within the cooldown answers `false`.
    pub fn can_attack(&mut self, player: &Player, now: u64, range: f32) -> bool {
        let in_range = self.pos.distance(player.pos) < range;
        let rested = self
            .last_attack_at
            .is_none_or(|last| now.saturating_sub(last) > self.attack_cooldown_ms);
        if in_range && rested {
            self.last_attack_at = Some(now);
            true
        } else {
            false
        }
    }
}

/// A coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub value: u32,
    /// Spin angle, cosmetic
    pub phase: f32,
}

impl Coin {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Speed,
    Damage,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Damage,
        PowerUpKind::Shield,
    ];
}

/// A power-up lying on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: f32,
    pub effect: EffectTuning,
    /// Float/pulse phase, cosmetic
    pub phase: f32,
}

impl PowerUp {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// Advance a cosmetic phase, wrapping at a full turn
#[inline]
pub fn advance_phase(phase: f32, step: f32) -> f32 {
    let next = phase + step;
    if next >= std::f32::consts::TAU { 0.0 } else { next }
}
