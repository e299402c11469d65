//! Read-only view handed to the render collaborator each frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{EnemyKind, PowerUpKind};
use super::grid::TileGrid;
use super::state::{GameState, Session};

/// Variant-specific state a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Player {
        health: i32,
        max_health: i32,
        speed_boost: f32,
        damage_boost: f32,
        shield: bool,
        invulnerable: bool,
    },
    Zombie {
        health: i32,
    },
    Ghost {
        health: i32,
    },
    Coin {
        value: u32,
        phase: f32,
    },
    PowerUp {
        kind: PowerUpKind,
        phase: f32,
    },
}

/// One drawable entity. The player always has id 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub kind: EntityKind,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: TileGrid,
    pub session: Session,
    /// Player first, then enemies, coins and power-ups in id order
    pub entities: Vec<EntityView>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        let mut entities = Vec::with_capacity(
            1 + self.enemies.len() + self.coins.len() + self.power_ups.len(),
        );
        entities.push(EntityView {
            id: 0,
            pos: player.pos,
            size: player.size,
            kind: EntityKind::Player {
                health: player.health,
                max_health: player.max_health,
                speed_boost: player.speed_boost,
                damage_boost: player.damage_boost,
                shield: player.shield,
                invulnerable: player.invulnerable,
            },
        });
        entities.extend(self.enemies.iter().map(|enemy| EntityView {
            id: enemy.id,
            pos: enemy.pos,
            size: enemy.size,
            kind: match enemy.kind {
                EnemyKind::Zombie => EntityKind::Zombie {
                    health: enemy.health,
                },
                EnemyKind::Ghost => EntityKind::Ghost {
                    health: enemy.health,
                },
            },
        }));
        entities.extend(self.coins.iter().map(|coin| EntityView {
            id: coin.id,
            pos: coin.pos,
            size: coin.size,
            kind: EntityKind::Coin {
                value: coin.value,
                phase: coin.phase,
            },
        }));
        entities.extend(self.power_ups.iter().map(|power_up| EntityView {
            id: power_up.id,
            pos: power_up.pos,
            size: power_up.size,
            kind: EntityKind::PowerUp {
                kind: power_up.kind,
                phase: power_up.phase,
            },
        }));

        Snapshot {
            grid: self.grid.clone(),
            session: self.session.clone(),
            entities,
        }
    }
}

impl Snapshot {
    /// Entity views matching a predicate on their kind
    pub fn count_where(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.kind)).count()
    }

    /// Centre of the player view
    pub fn player_pos(&self) -> Option<Vec2> {
        self.entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Player { .. }))
            .map(|e| e.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_snapshot_lists_every_entity() {
        let state = GameState::new(Settings::with_seed(5));
        let snap = state.snapshot();
        assert_eq!(snap.entities.len(), 1 + 3 + 3 + 1);
        assert!(matches!(snap.entities[0].kind, EntityKind::Player { health: 100, .. }));
        assert_eq!(snap.count_where(|k| matches!(k, EntityKind::Zombie { .. })), 2);
        assert_eq!(snap.count_where(|k| matches!(k, EntityKind::Ghost { .. })), 1);
        assert_eq!(snap.player_pos(), Some(state.player.pos));
        assert_eq!(snap.grid, state.grid);
    }

    #[test]
    fn test_snapshot_json_is_tagged() {
        let snap = GameState::new(Settings::with_seed(5)).snapshot();
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["entities"][0]["kind"]["type"], "player");
        assert_eq!(json["session"]["phase"], "Playing");

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back.session, snap.session);
    }
}
