//! Data-driven game balance
//!
//! Defaults reproduce the classic arcade values. Any subset of fields can be
//! overridden from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// Player constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub speed: f32,
    pub max_health: i32,
    /// Invulnerability granted after a non-lethal hit (ms)
    pub invulnerability_ms: u64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 40.0,
            speed: 5.0,
            max_health: 100,
            invulnerability_ms: 1000,
        }
    }
}

/// Per-variant enemy constants
///
/// No container default: zombie and ghost defaults differ, so an enemy
/// table given in JSON must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTuning {
    pub size: f32,
    pub health: i32,
    pub damage: i32,
    pub speed: f32,
    /// Minimum time between two attacks (ms). Zero leaves the player's
    /// invulnerability window as the only limit on hit rate.
    pub attack_cooldown_ms: u64,
}

impl EnemyTuning {
    pub fn zombie() -> Self {
        Self {
            size: 40.0,
            health: 50,
            damage: 15,
            speed: 2.0,
            attack_cooldown_ms: 0,
        }
    }

    pub fn ghost() -> Self {
        Self {
            size: 40.0,
            health: 30,
            damage: 10,
            speed: 3.0,
            attack_cooldown_ms: 0,
        }
    }
}

/// Magnitude and duration of one power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectTuning {
    pub magnitude: f32,
    pub duration_ms: u64,
}

/// Pickup constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub coin_size: f32,
    pub coin_value: u32,
    pub coin_score: u64,
    /// Coin rotation per tick (radians)
    pub coin_spin: f32,
    pub power_up_size: f32,
    pub power_up_score: u64,
    /// Power-up float/pulse phase per tick (radians)
    pub power_up_bob: f32,
    pub health: EffectTuning,
    pub speed: EffectTuning,
    pub damage: EffectTuning,
    pub shield: EffectTuning,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            coin_size: 20.0,
            coin_value: 1,
            coin_score: 10,
            coin_spin: 0.15,
            power_up_size: 25.0,
            power_up_score: 50,
            power_up_bob: 0.1,
            health: EffectTuning {
                magnitude: 25.0,
                duration_ms: 0,
            },
            speed: EffectTuning {
                magnitude: 2.0,
                duration_ms: 10_000,
            },
            damage: EffectTuning {
                magnitude: 1.5,
                duration_ms: 15_000,
            },
            shield: EffectTuning {
                magnitude: 1.0,
                duration_ms: 20_000,
            },
        }
    }
}

/// Level population constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Enemies on a level = `base_enemies + level`
    pub base_enemies: u32,
    /// Chance that a level gets one power-up
    pub power_up_chance: f64,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_enemies: 2,
            power_up_chance: 0.5,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub zombie: EnemyTuning,
    pub ghost: EnemyTuning,
    /// Centre distance below which an enemy may attack
    pub attack_range: f32,
    pub pickups: PickupTuning,
    pub spawns: SpawnTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            zombie: EnemyTuning::zombie(),
            ghost: EnemyTuning::ghost(),
            attack_range: 50.0,
            pickups: PickupTuning::default(),
            spawns: SpawnTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON balance table
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("player.size", self.player.size),
            ("zombie.size", self.zombie.size),
            ("ghost.size", self.ghost.size),
            ("pickups.coin_size", self.pickups.coin_size),
            ("pickups.power_up_size", self.pickups.power_up_size),
        ];
        for (field, value) in sizes {
            if !(value > 0.0 && value < crate::consts::TILE_SIZE * 4.0) {
                return Err(ConfigError::OutOfRange { field, value: value as f64 });
            }
        }
        if self.player.max_health <= 0 {
            return Err(ConfigError::OutOfRange {
                field: "player.max_health",
                value: self.player.max_health as f64,
            });
        }
        if !(0.0..=1.0).contains(&self.spawns.power_up_chance) {
            return Err(ConfigError::OutOfRange {
                field: "spawns.power_up_chance",
                value: self.spawns.power_up_chance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_values() {
        let t = Tuning::default();
        assert_eq!(t.player.speed, 5.0);
        assert_eq!(t.player.max_health, 100);
        assert_eq!(t.zombie.damage, 15);
        assert_eq!(t.zombie.speed, 2.0);
        assert_eq!(t.ghost.damage, 10);
        assert_eq!(t.ghost.speed, 3.0);
        assert_eq!(t.pickups.speed.duration_ms, 10_000);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "player": { "speed": 7.0 }, "attack_range": 60.0 }"#)
            .expect("valid tuning");
        assert_eq!(t.player.speed, 7.0);
        // Fields missing from a nested table fall back to that table's default
        assert_eq!(t.player.max_health, 100);
        assert_eq!(t.attack_range, 60.0);
        assert_eq!(t.zombie, EnemyTuning::zombie());
        assert_eq!(t.ghost, EnemyTuning::ghost());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "player": { "size": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "player.size", .. }));

        let err = Tuning::from_json(r#"{ "spawns": { "power_up_chance": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
        // Enemy tables must be complete
        assert!(Tuning::from_json(r#"{ "ghost": { "speed": 1.0 } }"#).is_err());
    }
}
