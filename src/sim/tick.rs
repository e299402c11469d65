//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Within a tick
//! the order is fixed: player movement, enemy movement, enemy attacks, coin
//! pickups, power-up pickups, level completion.

use super::entity::{Coin, PowerUp, advance_phase};
use super::state::{GameEvent, GamePhase, GameState};

/// Intents for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Eight-way movement, `None` to stand still
    pub movement: Option<super::entity::Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Leave the level-complete screen for the next level
    pub continue_level: bool,
    /// Start over after game over
    pub restart: bool,
    /// End the session
    pub quit: bool,
}

/// Advance the game state by one tick. `now` is the simulation clock in
/// milliseconds; all timers compare against it.
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    state.events.clear();

    if input.quit {
        log::info!("Quit requested");
        state.quit_requested = true;
        return;
    }

    match state.session.phase {
        GamePhase::Playing if input.pause => {
            state.session.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
            return;
        }
        GamePhase::Paused if input.pause => {
            state.session.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
        }
        GamePhase::LevelComplete if input.continue_level => {
            state.advance_level();
            return;
        }
        GamePhase::GameOver if input.restart => {
            state.restart();
            return;
        }
        _ => {}
    }

    // Paused, finished or not started: the world is frozen
    if state.session.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // 1. Player
    let tuning = &state.settings.tuning;
    state.player.update_timers(now, state.settings.boost_expiry);
    state
        .player
        .step(input.movement, tuning.player.speed, &state.grid);

    // 2. Enemies chase the player's current centre
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.step(target, &state.grid);
    }
    animate(state);

    // 3. Contact and attacks
    if resolve_attacks(state, now) {
        state.session.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerDied);
        log::info!(
            "Game over on level {} with score {}",
            state.session.level,
            state.session.score
        );
        return;
    }

    // 4. Coins
    collect_coins(state);

    // 5. Power-ups
    collect_power_ups(state, now);

    // 6. Level completion
    if state.session.target_reached() {
        state.session.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete {
            level: state.session.level,
        });
        log::info!(
            "Level {} complete, score {}",
            state.session.level,
            state.session.score
        );
    }
}

/// Advance cosmetic phases
fn animate(state: &mut GameState) {
    let pickups = &state.settings.tuning.pickups;
    for coin in &mut state.coins {
        coin.phase = advance_phase(coin.phase, pickups.coin_spin);
    }
    for power_up in &mut state.power_ups {
        power_up.phase = advance_phase(power_up.phase, pickups.power_up_bob);
    }
}

/// Let every touching enemy try to attack. Returns true if the player died.
fn resolve_attacks(state: &mut GameState, now: u64) -> bool {
    let tuning = &state.settings.tuning;
    let player_rect = state.player.rect();

    for enemy in &mut state.enemies {
        if !enemy.rect().intersects(&player_rect) {
            continue;
        }
        if !enemy.can_attack(&state.player, now, tuning.attack_range) {
            continue;
        }

        let before = state.player.health;
        let died = state
            .player
            .take_damage(enemy.damage, now, tuning.player.invulnerability_ms);
        if state.player.health != before {
            log::debug!(
                "{:?} {} hit player for {} ({} left)",
                enemy.kind,
                enemy.id,
                enemy.damage,
                state.player.health
            );
            state.events.push(GameEvent::PlayerHit {
                damage: enemy.damage,
                health: state.player.health,
            });
        }
        if died {
            return true;
        }
    }
    false
}

fn collect_coins(state: &mut GameState) {
    let player_rect = state.player.rect();
    let (taken, kept): (Vec<Coin>, Vec<Coin>) = std::mem::take(&mut state.coins)
        .into_iter()
        .partition(|coin| coin.rect().intersects(&player_rect));
    state.coins = kept;

    let score = state.settings.tuning.pickups.coin_score;
    for coin in taken {
        state.session.coins_collected += coin.value;
        state.session.score += score;
        log::debug!(
            "Coin {} collected ({}/{})",
            coin.id,
            state.session.coins_collected,
            state.session.coins_required
        );
        state.events.push(GameEvent::CoinCollected {
            id: coin.id,
            value: coin.value,
        });
    }
}

fn collect_power_ups(state: &mut GameState, now: u64) {
    let player_rect = state.player.rect();
    let (taken, kept): (Vec<PowerUp>, Vec<PowerUp>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|power_up| power_up.rect().intersects(&player_rect));
    state.power_ups = kept;

    let score = state.settings.tuning.pickups.power_up_score;
    for power_up in taken {
        state.player.apply_power_up(power_up.kind, power_up.effect, now);
        state.session.score += score;
        log::debug!("Power-up {} collected: {:?}", power_up.id, power_up.kind);
        state.events.push(GameEvent::PowerUpCollected {
            id: power_up.id,
            kind: power_up.kind,
        });
    }
}
