//! Level assembly and the level orchestrator.
//!
//! [`build_level`] sequences generator → enemy spawner → collectible
//! spawner into one immutable [`MazeLevel`]. [`LevelOrchestrator`] adds
//! the "current level" bookkeeping on top.

use berrymaze_core::{CompletionRecorder, LevelCompletion, Maze, MazeError, Position};
use indexmap::IndexSet;

use crate::difficulty::{concepts_for_level, Concept, DifficultyMode, DifficultyParams};
use crate::generator::generate;
use crate::grid::{MazeGrid, TileType};
use crate::spawn::{spawn_collectibles, spawn_enemies, Collectible, Enemy};

/// Seed for `level` in `mode`: `base ^ (level << 16) ^ mode.ordinal()`.
pub fn level_seed(base_seed: u64, level: u32, mode: DifficultyMode) -> u64 {
    base_seed ^ (u64::from(level) << 16) ^ mode.ordinal()
}

// ── MazeLevel ──────────────────────────────────────────────────────

/// A fully assembled level. Immutable; advancing builds a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeLevel {
    level: u32,
    mode: DifficultyMode,
    concepts: Vec<Concept>,
    seed: u64,
    grid: MazeGrid,
    enemies: Vec<Enemy>,
    collectibles: Vec<Collectible>,
}

impl MazeLevel {
    /// Level number (1-based).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Difficulty tier.
    pub fn mode(&self) -> DifficultyMode {
        self.mode
    }

    /// Concepts this level teaches.
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// The mixed level seed everything was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The generated tile grid.
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    /// Spawned enemies.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Spawned collectibles.
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    /// The engine's view of this level.
    ///
    /// Walls come from `Wall` tiles; hazards from `Hazard` tiles plus enemy
    /// positions; rewards from `Reward` tiles plus collectible positions.
    ///
    /// # Errors
    ///
    /// Propagates [`MazeError`] from maze validation. Grids produced by
    /// the generator always validate.
    pub fn to_maze(&self) -> Result<Maze, MazeError> {
        let g = &self.grid;
        Maze::builder(g.width(), g.height())
            .start(g.start())
            .goal(g.goal())
            .walls(g.positions_of(TileType::Wall))
            .hazards(g.positions_of(TileType::Hazard))
            .hazards(self.enemies.iter().map(|e| e.position))
            .rewards(g.positions_of(TileType::Reward))
            .rewards(self.collectibles.iter().map(|c| c.position))
            .build()
    }
}

/// Generate level `level` in `mode` from `base_seed`. Pure.
pub fn build_level(base_seed: u64, level: u32, mode: DifficultyMode) -> MazeLevel {
    let level = level.max(1);
    let seed = level_seed(base_seed, level, mode);
    let params = DifficultyParams::for_level(level, mode);
    let concepts = concepts_for_level(level);

    let grid = generate(&params, seed, &concepts);
    let enemies = spawn_enemies(&grid, params.enemy_cap, seed);
    let avoid: IndexSet<Position> = enemies.iter().map(|e| e.position).collect();
    let collectibles = spawn_collectibles(&grid, &concepts, &avoid, seed);

    log::debug!(
        "built {mode} level {level}: {} enemies, {} collectibles",
        enemies.len(),
        collectibles.len()
    );

    MazeLevel {
        level,
        mode,
        concepts,
        seed,
        grid,
        enemies,
        collectibles,
    }
}

// ── LevelOrchestrator ──────────────────────────────────────────────

/// Hands out levels and remembers the last one generated.
///
/// State is process-local; persisting progress is the job of a
/// [`CompletionRecorder`].
///
/// # Examples
///
/// ```
/// use berrymaze_gen::{DifficultyMode, LevelOrchestrator};
///
/// let mut orch = LevelOrchestrator::new(7);
/// assert_eq!(orch.next_level(DifficultyMode::Lenient).level(), 1);
/// assert_eq!(orch.next_level(DifficultyMode::Lenient).level(), 2);
/// assert_eq!(orch.level(DifficultyMode::Strict, 9).level(), 9);
/// assert_eq!(orch.current_level(), Some(9));
/// ```
#[derive(Clone, Debug)]
pub struct LevelOrchestrator {
    base_seed: u64,
    current: Option<u32>,
}

impl LevelOrchestrator {
    /// An orchestrator with no level generated yet.
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed,
            current: None,
        }
    }

    /// The base seed all level seeds are mixed from.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// The last generated level number.
    pub fn current_level(&self) -> Option<u32> {
        self.current
    }

    /// Generate the level after the current one (level 1 first).
    pub fn next_level(&mut self, mode: DifficultyMode) -> MazeLevel {
        let n = self.current.map_or(1, |c| c.saturating_add(1));
        self.level(mode, n)
    }

    /// Generate level `n` and make it current.
    pub fn level(&mut self, mode: DifficultyMode, n: u32) -> MazeLevel {
        let built = build_level(self.base_seed, n, mode);
        self.current = Some(built.level());
        built
    }

    /// `level(mode, n)` when `n` is given, otherwise `next_level(mode)`.
    pub fn request(&mut self, mode: DifficultyMode, level: Option<u32>) -> MazeLevel {
        match level {
            Some(n) => self.level(mode, n),
            None => self.next_level(mode),
        }
    }
}

/// Hand a completion fact to an external recorder.
pub fn record_completion<R>(recorder: &mut R, level: &MazeLevel, strawberries: u32)
where
    R: CompletionRecorder + ?Sized,
{
    log::debug!("level {} completed with {strawberries} strawberries", level.level());
    recorder.record(LevelCompletion {
        level: level.level(),
        strawberries,
    });
}
