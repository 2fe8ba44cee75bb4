//! Enemy and collectible spawners.
//!
//! Each spawner seeds its own `ChaCha8Rng` from the level seed XOR a
//! per-spawner stream constant, so adding draws to one spawner never
//! shifts the other's output.

use berrymaze_core::Position;
use indexmap::IndexSet;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::difficulty::Concept;
use crate::grid::{MazeGrid, TileType};

/// Stream constant mixed into the level seed for enemy spawning.
pub const ENEMY_STREAM: u64 = 0x454E_454D_5900_0001;
/// Stream constant mixed into the level seed for collectible spawning.
pub const COLLECTIBLE_STREAM: u64 = 0x434F_4C4C_4543_0002;

/// An enemy standing on a maze cell.
///
/// `speed` and `vision` scale with the enemy cap but are static: the
/// execution engine only looks at the position.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Cell the enemy occupies.
    pub position: Position,
    /// Movement speed in cells per tick.
    pub speed: f64,
    /// Sight radius in cells.
    pub vision: u32,
}

/// A strawberry waiting to be picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Collectible {
    /// Cell the strawberry sits on.
    pub position: Position,
}

/// Per-cell placement chance for a given enemy cap.
pub fn enemy_chance(cap: u32) -> f64 {
    if cap >= 5 {
        0.15
    } else {
        0.08
    }
}

/// Place up to `cap` enemies on interior `Path` cells in row-major order.
pub fn spawn_enemies(grid: &MazeGrid, cap: u32, level_seed: u64) -> Vec<Enemy> {
    let mut rng = ChaCha8Rng::seed_from_u64(level_seed ^ ENEMY_STREAM);
    let chance = enemy_chance(cap);
    let speed = 1.0 + 0.25 * f64::from(cap);
    let vision = 2 + cap / 2;

    let mut out = Vec::new();
    for (pos, tile) in grid.cells() {
        if out.len() as u32 >= cap {
            break;
        }
        if tile != TileType::Path || !grid.is_interior(pos) {
            continue;
        }
        if rng.random_bool(chance) {
            out.push(Enemy {
                position: pos,
                speed,
                vision,
            });
        }
    }
    log::trace!("spawned {} of at most {cap} enemies", out.len());
    out
}

/// How many collectibles a grid of `cells` cells should carry.
pub fn collectible_target(cells: usize, concepts: &[Concept]) -> usize {
    let mut target = 3 + cells / 60;
    if concepts.contains(&Concept::Loops) {
        target += 2;
    }
    target
}

/// Place collectibles: first one per `Reward` tile in scan order, then
/// uniformly sampled `Path` cells not in `avoid`, until the target is met
/// or no cells are left.
pub fn spawn_collectibles(
    grid: &MazeGrid,
    concepts: &[Concept],
    avoid: &IndexSet<Position>,
    level_seed: u64,
) -> Vec<Collectible> {
    let target = collectible_target(grid.cell_count(), concepts);

    let mut used: IndexSet<Position> = grid
        .positions_of(TileType::Reward)
        .take(target)
        .collect();

    if used.len() < target {
        let mut rng = ChaCha8Rng::seed_from_u64(level_seed ^ COLLECTIBLE_STREAM);
        let mut pool: Vec<Position> = grid
            .positions_of(TileType::Path)
            .filter(|p| !avoid.contains(p))
            .collect();
        while used.len() < target && !pool.is_empty() {
            let i = rng.random_range(0..pool.len());
            used.insert(pool.swap_remove(i));
        }
        if used.len() < target {
            log::warn!(
                "only {} of {target} collectibles fit on a {}x{} grid",
                used.len(),
                grid.width(),
                grid.height()
            );
        }
    }

    used.into_iter()
        .map(|position| Collectible { position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{DifficultyMode, DifficultyParams};
    use crate::generator::generate;

    fn grid(seed: u64) -> MazeGrid {
        let p = DifficultyParams::for_level(10, DifficultyMode::Strict);
        generate(&p, seed, &[])
    }

    #[test]
    fn enemies_respect_cap_and_tiles() {
        let g = grid(11);
        let enemies = spawn_enemies(&g, 3, 11);
        assert!(enemies.len() <= 3);
        for e in &enemies {
            assert!(g.is(e.position, TileType::Path));
            assert!(g.is_interior(e.position));
            assert_eq!(e.speed, 1.75);
            assert_eq!(e.vision, 3);
        }
    }

    #[test]
    fn zero_cap_spawns_nothing() {
        assert!(spawn_enemies(&grid(1), 0, 1).is_empty());
    }

    #[test]
    fn enemies_are_in_scan_order() {
        let enemies = spawn_enemies(&grid(5), 8, 5);
        let positions: Vec<_> = enemies.iter().map(|e| (e.position.y, e.position.x)).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn chance_depends_on_cap() {
        assert_eq!(enemy_chance(4), 0.08);
        assert_eq!(enemy_chance(5), 0.15);
    }

    #[test]
    fn target_formula() {
        assert_eq!(collectible_target(49, &[]), 3);
        assert_eq!(collectible_target(121, &[]), 5);
        assert_eq!(collectible_target(121, &[Concept::Loops]), 7);
    }

    #[test]
    fn collectibles_prefer_reward_tiles() {
        let g = grid(21);
        let rewards: Vec<_> = g.positions_of(TileType::Reward).collect();
        let items = spawn_collectibles(&g, &[], &IndexSet::new(), 21);
        let target = collectible_target(g.cell_count(), &[]);
        assert_eq!(items.len(), target);
        let prefix = rewards.len().min(target);
        for (item, reward) in items.iter().zip(&rewards[..prefix]) {
            assert_eq!(item.position, *reward);
        }
    }

    #[test]
    fn collectibles_avoid_enemies() {
        let g = grid(33);
        let enemies = spawn_enemies(&g, 8, 33);
        let avoid: IndexSet<Position> = enemies.iter().map(|e| e.position).collect();
        let items = spawn_collectibles(&g, &[Concept::Loops], &avoid, 33);
        for item in &items {
            if !g.is(item.position, TileType::Reward) {
                assert!(!avoid.contains(&item.position));
            }
        }
    }

    #[test]
    fn collectibles_stop_when_cells_run_out() {
        let mut g = MazeGrid::filled(5, 5);
        g.set(Position::new(1, 1), TileType::Path);
        let items = spawn_collectibles(&g, &[], &IndexSet::new(), 0);
        assert_eq!(items, vec![Collectible { position: Position::new(1, 1) }]);
    }
}
