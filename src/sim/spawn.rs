//! Spawn placement and level population
//!
//! Placement probes random spots first and falls back to deterministic
//! candidates, so it always returns even on a level with no free space.

use glam::Vec2;
use rand::Rng;

use super::collision::{Blocking, Rect, overlaps_any, overlaps_grid};
use super::entity::{Coin, Enemy, EnemyKind, PowerUp, PowerUpKind};
use super::grid::TileGrid;
use crate::consts::*;
use crate::tuning::Tuning;

/// Find a centre position for a `size` hitbox inside `bounds` that hits no
/// wall, no obstacle and none of `existing`.
///
/// Tiers: up to `SPAWN_ATTEMPTS` random probes in `bounds` inset by
/// `SPAWN_MARGIN`, then the exact centre, then a raster scan on a
/// `SPAWN_SCAN_STEP` grid, then `SPAWN_FALLBACK`.
pub fn find_position<R: Rng + ?Sized>(
    grid: &TileGrid,
    size: Vec2,
    existing: &[Rect],
    bounds: Rect,
    rng: &mut R,
) -> Vec2 {
    let is_free = |center: Vec2| {
        let rect = Rect::from_center(center, size);
        bounds.contains_rect(&rect)
            && !overlaps_grid(grid, &rect, Blocking::WallsAndObstacles)
            && !overlaps_any(&rect, existing)
    };

    let probe = bounds.inset(SPAWN_MARGIN);
    if probe.min.x <= probe.max.x && probe.min.y <= probe.max.y {
        for _ in 0..SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random_range(probe.min.x as i32..=probe.max.x as i32) as f32,
                rng.random_range(probe.min.y as i32..=probe.max.y as i32) as f32,
            );
            if is_free(candidate) {
                return candidate;
            }
        }
    }

    let center = bounds.center();
    if is_free(center) {
        log::debug!("Random placement exhausted, using centre {center}");
        return center;
    }

    let mut y = bounds.min.y + SPAWN_SCAN_STEP;
    while y < bounds.max.y - SPAWN_SCAN_STEP {
        let mut x = bounds.min.x + SPAWN_SCAN_STEP;
        while x < bounds.max.x - SPAWN_SCAN_STEP {
            let candidate = Vec2::new(x, y);
            if is_free(candidate) {
                log::debug!("Random placement exhausted, scan found {candidate}");
                return candidate;
            }
            x += SPAWN_SCAN_STEP;
        }
        y += SPAWN_SCAN_STEP;
    }

    let (x, y) = SPAWN_FALLBACK;
    log::warn!("No free spawn position for size {size}, using fallback ({x}, {y})");
    Vec2::new(x, y)
}

/// Everything placed on a freshly generated level
#[derive(Debug, Clone)]
pub struct Population {
    pub player_pos: Vec2,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
}

/// Place the player, `base_enemies + level` enemies (zombies at even
/// indices, ghosts at odd), `coin_count` coins and maybe one power-up.
///
/// Enemies avoid the player's hitbox; pickups may overlap anything that
/// is not solid.
pub fn populate<R: Rng + ?Sized>(
    grid: &TileGrid,
    level: u32,
    coin_count: u32,
    tuning: &Tuning,
    rng: &mut R,
    next_id: &mut u32,
) -> Population {
    let bounds = Rect::world();
    let mut alloc = || {
        let id = *next_id;
        *next_id += 1;
        id
    };

    let player_size = Vec2::splat(tuning.player.size);
    let player_pos = find_position(grid, player_size, &[], bounds, rng);
    let player_rect = [Rect::from_center(player_pos, player_size)];

    let enemy_count = tuning.spawns.base_enemies + level;
    let enemies: Vec<Enemy> = (0..enemy_count)
        .map(|i| {
            let (kind, enemy_tuning) = if i % 2 == 0 {
                (EnemyKind::Zombie, &tuning.zombie)
            } else {
                (EnemyKind::Ghost, &tuning.ghost)
            };
            let size = Vec2::splat(enemy_tuning.size);
            let pos = find_position(grid, size, &player_rect, bounds, rng);
            Enemy::new(alloc(), kind, pos, enemy_tuning)
        })
        .collect();

    let pickups = &tuning.pickups;
    let coins: Vec<Coin> = (0..coin_count)
        .map(|_| {
            let pos = find_position(grid, Vec2::splat(pickups.coin_size), &[], bounds, rng);
            Coin {
                id: alloc(),
                pos,
                size: pickups.coin_size,
                value: pickups.coin_value,
                phase: 0.0,
            }
        })
        .collect();

    let mut power_ups = Vec::new();
    if rng.random_bool(tuning.spawns.power_up_chance) {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let pos = find_position(grid, Vec2::splat(pickups.power_up_size), &[], bounds, rng);
        power_ups.push(new_power_up(alloc(), kind, pos, tuning));
    }

    Population {
        player_pos,
        enemies,
        coins,
        power_ups,
    }
}

/// The fixed first-level arrangement: two zombies, a ghost, three coins and
/// a speed power-up. Only the player is placed by probing.
pub fn opening_population<R: Rng + ?Sized>(
    grid: &TileGrid,
    tuning: &Tuning,
    rng: &mut R,
    next_id: &mut u32,
) -> Population {
    let mut alloc = || {
        let id = *next_id;
        *next_id += 1;
        id
    };
    let player_pos = find_position(grid, Vec2::splat(tuning.player.size), &[], Rect::world(), rng);

    let enemies = vec![
        Enemy::new(alloc(), EnemyKind::Zombie, Vec2::new(800.0, 300.0), &tuning.zombie),
        Enemy::new(alloc(), EnemyKind::Zombie, Vec2::new(1000.0, 500.0), &tuning.zombie),
        Enemy::new(alloc(), EnemyKind::Ghost, Vec2::new(400.0, 200.0), &tuning.ghost),
    ];
    let coins: Vec<Coin> = [(500.0, 300.0), (700.0, 400.0), (900.0, 200.0)]
        .into_iter()
        .map(|(x, y)| Coin {
            id: alloc(),
            pos: Vec2::new(x, y),
            size: tuning.pickups.coin_size,
            value: tuning.pickups.coin_value,
            phase: 0.0,
        })
        .collect();
    let power_ups = vec![new_power_up(
        alloc(),
        PowerUpKind::Speed,
        Vec2::new(600.0, 600.0),
        tuning,
    )];

    Population {
        player_pos,
        enemies,
        coins,
        power_ups,
    }
}

fn new_power_up(id: u32, kind: PowerUpKind, pos: Vec2, tuning: &Tuning) -> PowerUp {
    let pickups = &tuning.pickups;
    let effect = match kind {
        PowerUpKind::Health => pickups.health,
        PowerUpKind::Speed => pickups.speed,
        PowerUpKind::Damage => pickups.damage,
        PowerUpKind::Shield => pickups.shield,
    };
    PowerUp {
        id,
        kind,
        pos,
        size: pickups.power_up_size,
        effect,
        phase: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::{Tile, generate};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const PLAYER: Vec2 = Vec2::splat(40.0);

    fn is_clear(grid: &TileGrid, pos: Vec2, size: Vec2) -> bool {
        !overlaps_grid(grid, &Rect::from_center(pos, size), Blocking::WallsAndObstacles)
    }

    /// Grid blocked everywhere except one 2x2 pocket with top-left (col, row)
    fn single_pocket(col: usize, row: usize) -> TileGrid {
        let mut grid = TileGrid::bordered(GRID_WIDTH, GRID_HEIGHT);
        for r in 1..GRID_HEIGHT - 1 {
            for c in 1..GRID_WIDTH - 1 {
                grid.set(c, r, Tile::SmallObstacle);
            }
        }
        for (c, r) in [(col, row), (col + 1, row), (col, row + 1), (col + 1, row + 1)] {
            grid.set(c, r, Tile::Empty);
        }
        grid
    }

    #[test]
    fn test_random_probe_is_inside_margin() {
        let grid = generate(1);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let pos = find_position(&grid, PLAYER, &[], Rect::world(), &mut rng);
            assert!(is_clear(&grid, pos, PLAYER));
            assert!(pos.x >= SPAWN_MARGIN && pos.x <= WORLD_WIDTH - SPAWN_MARGIN);
            assert!(pos.y >= SPAWN_MARGIN && pos.y <= WORLD_HEIGHT - SPAWN_MARGIN);
        }
    }

    #[test]
    fn test_same_seed_same_position() {
        let grid = generate(3);
        let a = find_position(&grid, PLAYER, &[], Rect::world(), &mut Pcg32::seed_from_u64(99));
        let b = find_position(&grid, PLAYER, &[], Rect::world(), &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_existing_rects_are_avoided() {
        let grid = TileGrid::bordered(GRID_WIDTH, GRID_HEIGHT);
        // Covers every probe and the centre; only a thin strip inside the border stays open
        let blocker = [Rect::world().inset(80.0)];
        let size = Vec2::splat(20.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let pos = find_position(&grid, size, &blocker, Rect::world(), &mut rng);
        assert!(!Rect::from_center(pos, size).intersects(&blocker[0]));
        // First scan point, flush with the border tiles
        assert_eq!(pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_center_fallback() {
        // Only the pocket under the centre (600, 400) is open: tiles 14..16 x 9..11
        let grid = single_pocket(14, 9);
        let mut rng = Pcg32::seed_from_u64(3);
        let pos = find_position(&grid, PLAYER, &[], Rect::world(), &mut rng);
        assert!(is_clear(&grid, pos, PLAYER));
    }

    #[test]
    fn test_scan_fallback_finds_pocket() {
        // Pocket covering x 400..480, y 200..280; scan point (450, 250) fits
        let grid = single_pocket(10, 5);
        let mut rng = Pcg32::seed_from_u64(5);
        let pos = find_position(&grid, PLAYER, &[], Rect::world(), &mut rng);
        assert!(is_clear(&grid, pos, PLAYER), "got {pos}");
    }

    #[test]
    fn test_full_grid_uses_fixed_fallback() {
        let mut grid = TileGrid::bordered(GRID_WIDTH, GRID_HEIGHT);
        for r in 1..GRID_HEIGHT - 1 {
            for c in 1..GRID_WIDTH - 1 {
                grid.set(c, r, Tile::SmallObstacle);
            }
        }
        let mut rng = Pcg32::seed_from_u64(11);
        let pos = find_position(&grid, PLAYER, &[], Rect::world(), &mut rng);
        assert_eq!(pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_populate_counts_and_kinds() {
        let grid = generate(2);
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut next_id = 1;
        let pop = populate(&grid, 2, 5, &tuning, &mut rng, &mut next_id);

        assert_eq!(pop.enemies.len(), 4);
        let kinds: Vec<_> = pop.enemies.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [EnemyKind::Zombie, EnemyKind::Ghost, EnemyKind::Zombie, EnemyKind::Ghost]
        );
        assert_eq!(pop.coins.len(), 5);
        assert!(pop.power_ups.len() <= 1);

        let player = Rect::from_center(pop.player_pos, PLAYER);
        for enemy in &pop.enemies {
            assert!(!enemy.rect().intersects(&player), "enemy spawned on the player");
            assert!(is_clear(&grid, enemy.pos, Vec2::splat(enemy.size)));
        }

        // Ids are unique and increasing
        let mut ids: Vec<u32> = pop.enemies.iter().map(|e| e.id).collect();
        ids.extend(pop.coins.iter().map(|c| c.id));
        ids.extend(pop.power_ups.iter().map(|p| p.id));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(next_id, ids.last().copied().unwrap_or(0) + 1);
    }

    #[test]
    fn test_opening_population() {
        let grid = generate(1);
        let tuning = Tuning::default();
        let mut next_id = 1;
        let pop = opening_population(&grid, &tuning, &mut Pcg32::seed_from_u64(0), &mut next_id);
        assert_eq!(pop.enemies[0].pos, Vec2::new(800.0, 300.0));
        assert_eq!(pop.enemies[2].kind, EnemyKind::Ghost);
        assert_eq!(pop.coins.len(), 3);
        assert_eq!(pop.power_ups[0].kind, PowerUpKind::Speed);
        assert_eq!(pop.power_ups[0].effect.magnitude, 2.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn placements_never_overlap_obstacles(
            level in 1_u32..=20,
            seed in any::<u64>(),
            size in 10.0_f32..=40.0,
        ) {
            let grid = generate(level);
            let mut rng = Pcg32::seed_from_u64(seed);
            let size = Vec2::splat(size);
            let pos = find_position(&grid, size, &[], Rect::world(), &mut rng);
            prop_assert!(is_clear(&grid, pos, size), "level {level}: {pos} overlaps an obstacle");
        }
    }
}
