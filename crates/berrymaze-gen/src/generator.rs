//! Seeded maze generation: carving, start/goal placement, and
//! hazard/reward sprinkling.
//!
//! Generation is a pure function of `(params, seed, concepts)`. The only
//! source of randomness is a `ChaCha8Rng` seeded from `seed`, consulted
//! in a fixed order (carving, then sprinkling), so the same inputs yield
//! the same grid in every process.

use std::collections::VecDeque;

use berrymaze_core::{Direction, Position};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::difficulty::{Concept, DifficultyParams};
use crate::grid::{MazeGrid, TileType};

/// Hazard density bonus when conditionals are taught.
pub const CONDITIONALS_HAZARD_BONUS: f64 = 0.03;
/// Reward density bonus when loops are taught.
pub const LOOPS_REWARD_BONUS: f64 = 0.05;
/// Minimum Manhattan distance of a short exit from the start.
pub const SHORT_EXIT_MIN_DISTANCE: u32 = 4;

/// Generate a maze grid.
///
/// # Panics
///
/// Panics if `params` is degenerate: width or height below 5, carving
/// weights that are negative, non-finite or sum to zero, or densities
/// outside `[0, 1]`. Parameters from [`DifficultyParams::for_level`]
/// never trigger these.
pub fn generate(params: &DifficultyParams, seed: u64, concepts: &[Concept]) -> MazeGrid {
    assert_params(params);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = MazeGrid::filled(params.width, params.height);

    carve(&mut grid, params, &mut rng);

    let start = grid
        .positions_of(TileType::Path)
        .next()
        .unwrap_or(Position::new(1, 1));
    grid.place_start(start);

    let goal = if params.short_exit {
        short_exit(&grid, start)
    } else {
        farthest_by_bfs(&grid, start)
    };
    grid.place_goal(goal);

    sprinkle(&mut grid, params, concepts, &mut rng);

    log::debug!(
        "generated {}x{} maze (seed {seed:#x}): start {start}, goal {goal}, {} hazards, {} rewards",
        params.width,
        params.height,
        grid.count(TileType::Hazard),
        grid.count(TileType::Reward),
    );
    grid
}

/// Reusable generator bound to one set of parameters.
///
/// # Examples
///
/// ```
/// use berrymaze_gen::{Concept, DifficultyMode, DifficultyParams, MazeGenerator, TileType};
///
/// let params = DifficultyParams::for_level(4, DifficultyMode::Strict);
/// let gen = MazeGenerator::new(params);
/// let a = gen.generate(42, &[Concept::Loops]);
/// let b = gen.generate(42, &[Concept::Loops]);
/// assert_eq!(a, b);
/// assert_eq!(a.count(TileType::Start), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    params: DifficultyParams,
}

impl MazeGenerator {
    /// Bind a generator to `params`.
    pub fn new(params: DifficultyParams) -> Self {
        Self { params }
    }

    /// The bound parameters.
    pub fn params(&self) -> &DifficultyParams {
        &self.params
    }

    /// Generate one grid. See [`generate`].
    pub fn generate(&self, seed: u64, concepts: &[Concept]) -> MazeGrid {
        generate(&self.params, seed, concepts)
    }
}

fn assert_params(p: &DifficultyParams) {
    assert!(
        p.width >= 5 && p.height >= 5,
        "maze must be at least 5x5, got {}x{}",
        p.width,
        p.height
    );
    assert!(
        p.width <= i32::MAX as u32 && p.height <= i32::MAX as u32,
        "maze dimensions exceed coordinate range"
    );
    for (name, w) in [
        ("branching_factor", p.branching_factor),
        ("dead_end_favor", p.dead_end_favor),
    ] {
        assert!(w.is_finite() && w >= 0.0, "{name} must be finite and >= 0, got {w}");
    }
    assert!(
        p.branching_factor + p.dead_end_favor > 0.0,
        "carving weights must not both be zero"
    );
    for (name, d) in [
        ("hazard_density", p.hazard_density),
        ("reward_density", p.reward_density),
        ("hazard_ceiling", p.hazard_ceiling),
    ] {
        assert!((0.0..=1.0).contains(&d), "{name} must be in [0, 1], got {d}");
    }
}

// ── Carving ────────────────────────────────────────────────────────

/// Lattice cells two steps from `pos` along an axis, inside the border.
fn lattice_neighbours(grid: &MazeGrid, pos: Position) -> SmallVec<[(Position, Position); 4]> {
    Direction::ALL
        .iter()
        .filter_map(|&d| {
            let (dx, dy) = d.delta();
            let mid = pos.offset((dx, dy));
            let dest = pos.offset((2 * dx, 2 * dy));
            grid.is_interior(dest).then_some((mid, dest))
        })
        .collect()
}

/// Randomised depth-first carving on the odd lattice from `(1, 1)`.
///
/// Candidate weight is `branching × (1 + n) + dead_end × (1 + max(0, 2 − n))`
/// where `n` counts the candidate's already-carved lattice neighbours.
fn carve(grid: &mut MazeGrid, params: &DifficultyParams, rng: &mut ChaCha8Rng) {
    let origin = Position::new(1, 1);
    grid.set(origin, TileType::Path);
    let mut stack = vec![origin];

    while let Some(&here) = stack.last() {
        let view: &MazeGrid = grid;
        let candidates: SmallVec<[(Position, Position, f64); 4]> = lattice_neighbours(view, here)
            .into_iter()
            .filter(|&(_, dest)| view.is(dest, TileType::Wall))
            .map(|(mid, dest)| {
                let n = lattice_neighbours(view, dest)
                    .iter()
                    .filter(|&&(_, p)| view.is(p, TileType::Path))
                    .count() as f64;
                let weight = params.branching_factor * (1.0 + n)
                    + params.dead_end_favor * (1.0 + (2.0 - n).max(0.0));
                (mid, dest, weight)
            })
            .collect();

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let (mid, dest) = weighted_pick(&candidates, rng);
        grid.set(mid, TileType::Path);
        grid.set(dest, TileType::Path);
        stack.push(dest);
    }
}

fn weighted_pick(
    candidates: &[(Position, Position, f64)],
    rng: &mut ChaCha8Rng,
) -> (Position, Position) {
    let total: f64 = candidates.iter().map(|c| c.2).sum();
    let mut roll = rng.random::<f64>() * total;
    for &(mid, dest, w) in candidates {
        if roll < w {
            return (mid, dest);
        }
        roll -= w;
    }
    // float rounding can leave roll just above the last bucket
    let (mid, dest, _) = candidates[candidates.len() - 1];
    (mid, dest)
}

// ── Goal placement ─────────────────────────────────────────────────

/// Farthest walkable cell from `start` by BFS; ties go to the first reached.
fn farthest_by_bfs(grid: &MazeGrid, start: Position) -> Position {
    let w = grid.width() as usize;
    let idx = |p: Position| p.y as usize * w + p.x as usize;
    let mut dist = vec![u32::MAX; grid.cell_count()];
    dist[idx(start)] = 0;

    let mut queue = VecDeque::from([start]);
    let mut best = (start, 0u32);
    while let Some(p) = queue.pop_front() {
        let d = dist[idx(p)];
        if d > best.1 {
            best = (p, d);
        }
        for n in grid.neighbours(p) {
            let walkable = grid.get(n).is_some_and(TileType::is_walkable);
            if walkable && dist[idx(n)] == u32::MAX {
                dist[idx(n)] = d + 1;
                queue.push_back(n);
            }
        }
    }
    best.0
}

/// First path cell in scan order within `[4, (w + h) / 3]` Manhattan
/// distance of `start`, or `start` itself if none qualifies.
fn short_exit(grid: &MazeGrid, start: Position) -> Position {
    let max = (grid.width() + grid.height()) / 3;
    let found = grid
        .positions_of(TileType::Path)
        .find(|p| (SHORT_EXIT_MIN_DISTANCE..=max).contains(&p.manhattan(start)));
    match found {
        Some(p) => p,
        None => {
            log::warn!(
                "no short exit within [{SHORT_EXIT_MIN_DISTANCE}, {max}] of {start}; using start"
            );
            start
        }
    }
}

// ── Sprinkling ─────────────────────────────────────────────────────

/// Effective `(hazard, reward)` densities after concept bonuses and caps.
pub fn effective_densities(params: &DifficultyParams, concepts: &[Concept]) -> (f64, f64) {
    let mut hazard = params.hazard_density;
    let mut reward = params.reward_density;
    if concepts.contains(&Concept::Conditionals) {
        hazard += CONDITIONALS_HAZARD_BONUS;
    }
    if concepts.contains(&Concept::Loops) {
        reward += LOOPS_REWARD_BONUS;
    }
    (hazard.min(params.hazard_ceiling), reward.min(1.0))
}

fn sprinkle(
    grid: &mut MazeGrid,
    params: &DifficultyParams,
    concepts: &[Concept],
    rng: &mut ChaCha8Rng,
) {
    let mut floor: Vec<Position> = grid.positions_of(TileType::Path).collect();
    floor.shuffle(rng);

    let (hd, rd) = effective_densities(params, concepts);
    let n = floor.len() as f64;
    let hazards = (n * hd).floor() as usize;
    let rewards = ((n * rd).floor() as usize).min(floor.len() - hazards);

    for &p in &floor[..hazards] {
        grid.set(p, TileType::Hazard);
    }
    for &p in &floor[hazards..hazards + rewards] {
        grid.set(p, TileType::Reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyMode;

    fn params(w: u32, h: u32) -> DifficultyParams {
        DifficultyParams {
            width: w,
            height: h,
            hazard_density: 0.1,
            reward_density: 0.1,
            enemy_cap: 2,
            branching_factor: 1.0,
            dead_end_favor: 1.0,
            hazard_ceiling: 0.2,
            short_exit: false,
        }
    }

    #[test]
    fn border_stays_wall() {
        let g = generate(&params(11, 9), 7, &[]);
        for (p, t) in g.cells() {
            if !g.is_interior(p) {
                assert_eq!(t, TileType::Wall, "border cell {p} is {t:?}");
            }
        }
    }

    #[test]
    fn every_lattice_cell_is_carved() {
        let g = generate(&params(11, 11), 99, &[]);
        for y in (1..10).step_by(2) {
            for x in (1..10).step_by(2) {
                assert!(g.get(Position::new(x, y)).is_some_and(TileType::is_walkable));
            }
        }
    }

    #[test]
    fn start_is_first_floor_cell() {
        let g = generate(&params(9, 9), 3, &[]);
        assert_eq!(g.start(), Position::new(1, 1));
        assert!(g.is(g.start(), TileType::Start));
    }

    #[test]
    fn goal_is_farthest_and_reachable() {
        let g = generate(&params(9, 9), 12, &[]);
        assert_ne!(g.goal(), g.start());
        assert!(g.is(g.goal(), TileType::Exit));
        assert_eq!(g.count(TileType::Exit), 1);
    }

    #[test]
    fn short_exit_is_within_range() {
        let mut p = params(15, 15);
        p.short_exit = true;
        let g = generate(&p, 5, &[]);
        let d = g.goal().manhattan(g.start());
        assert!((4..=10).contains(&d), "distance {d}");
    }

    #[test]
    fn short_exit_falls_back_to_start() {
        // 5x5 has max distance (5+5)/3 = 3 < 4
        let mut p = params(5, 5);
        p.short_exit = true;
        let g = generate(&p, 1, &[]);
        assert_eq!(g.goal(), g.start());
        assert_eq!(g.count(TileType::Exit), 0);
    }

    #[test]
    fn concept_bonuses_apply_and_cap() {
        let mut p = params(9, 9);
        p.hazard_density = 0.19;
        p.hazard_ceiling = 0.2;
        let (h, r) = effective_densities(&p, &[Concept::Conditionals, Concept::Loops]);
        assert_eq!(h, 0.2);
        assert!((r - 0.15).abs() < 1e-12);
        let (h, r) = effective_densities(&p, &[]);
        assert_eq!(h, 0.19);
        assert_eq!(r, 0.1);
    }

    #[test]
    fn sprinkle_counts_follow_densities() {
        let mut p = params(21, 21);
        p.hazard_density = 0.2;
        p.reward_density = 0.3;
        p.hazard_ceiling = 1.0;
        let g = generate(&p, 8, &[]);
        let candidates =
            g.count(TileType::Path) + g.count(TileType::Hazard) + g.count(TileType::Reward);
        assert_eq!(g.count(TileType::Hazard), (candidates as f64 * 0.2).floor() as usize);
        assert_eq!(g.count(TileType::Reward), (candidates as f64 * 0.3).floor() as usize);
    }

    #[test]
    fn same_seed_same_grid() {
        let p = DifficultyParams::for_level(7, DifficultyMode::Strict);
        let c = [Concept::Loops, Concept::Conditionals];
        assert_eq!(generate(&p, 1234, &c), generate(&p, 1234, &c));
        assert_ne!(generate(&p, 1234, &c), generate(&p, 1235, &c));
    }

    #[test]
    #[should_panic(expected = "at least 5x5")]
    fn tiny_maze_panics() {
        generate(&params(4, 9), 0, &[]);
    }

    #[test]
    #[should_panic(expected = "both be zero")]
    fn zero_weights_panic() {
        let mut p = params(9, 9);
        p.branching_factor = 0.0;
        p.dead_end_favor = 0.0;
        generate(&p, 0, &[]);
    }
}
