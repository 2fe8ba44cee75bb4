//! Difficulty tiers, pedagogical concepts, and the level → parameters
//! factory the generator is configured from.

use std::fmt;

// ── DifficultyMode ─────────────────────────────────────────────────

/// Difficulty tier selected by the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifficultyMode {
    /// Smaller mazes, fewer enemies, short exits on the first levels.
    Lenient,
    /// Larger, denser, more branching mazes.
    Strict,
}

impl DifficultyMode {
    /// Both tiers, in ordinal order.
    pub const ALL: [DifficultyMode; 2] = [DifficultyMode::Lenient, DifficultyMode::Strict];

    /// Stable ordinal mixed into level seeds.
    pub fn ordinal(self) -> u64 {
        match self {
            DifficultyMode::Lenient => 0,
            DifficultyMode::Strict => 1,
        }
    }
}

impl fmt::Display for DifficultyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DifficultyMode::Lenient => "lenient",
            DifficultyMode::Strict => "strict",
        })
    }
}

// ── Concept ────────────────────────────────────────────────────────

/// Programming concept a level is meant to teach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Concept {
    /// Straight-line sequences of moves.
    Sequencing,
    /// Bounded repetition.
    Loops,
    /// The strawberry-count conditional.
    Conditionals,
    /// User-defined function blocks.
    Functions,
}

/// Concepts taught at `level` (levels are 1-based; 0 is treated as 1).
///
/// | Levels | Concepts |
/// |--------|----------|
/// | 1–2    | Sequencing |
/// | 3–5    | Sequencing, Loops |
/// | 6–8    | Sequencing, Loops, Conditionals |
/// | 9+     | all four |
pub fn concepts_for_level(level: u32) -> Vec<Concept> {
    let level = level.max(1);
    let mut out = vec![Concept::Sequencing];
    if level >= 3 {
        out.push(Concept::Loops);
    }
    if level >= 6 {
        out.push(Concept::Conditionals);
    }
    if level >= 9 {
        out.push(Concept::Functions);
    }
    out
}

// ── DifficultyParams ───────────────────────────────────────────────

/// Generator configuration derived from `(level, mode)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyParams {
    /// Grid width in cells. Must be at least 5.
    pub width: u32,
    /// Grid height in cells. Must be at least 5.
    pub height: u32,
    /// Fraction of candidate floor cells that become hazards.
    pub hazard_density: f64,
    /// Fraction of candidate floor cells that become rewards.
    pub reward_density: f64,
    /// Upper bound on spawned enemies.
    pub enemy_cap: u32,
    /// Carving weight favouring candidates next to carved cells.
    pub branching_factor: f64,
    /// Carving weight favouring isolated candidates.
    pub dead_end_favor: f64,
    /// Hazard density never exceeds this, concept bonus included.
    pub hazard_ceiling: f64,
    /// Place the exit near the start instead of as far away as possible.
    pub short_exit: bool,
}

impl DifficultyParams {
    /// Parameters for `level` in `mode`. Deterministic; levels are
    /// 1-based and 0 is treated as 1.
    pub fn for_level(level: u32, mode: DifficultyMode) -> Self {
        let level = level.max(1);
        let lf = f64::from(level);
        // sizes stop growing well before this
        let half = (level / 2).min(16);
        match mode {
            DifficultyMode::Lenient => {
                let size = (7 + 2 * half).min(21);
                Self {
                    width: size,
                    height: size,
                    hazard_density: (0.03 + 0.01 * lf).min(0.10),
                    reward_density: 0.12,
                    enemy_cap: (1 + level / 3).min(4),
                    branching_factor: 1.0,
                    dead_end_favor: 0.5,
                    hazard_ceiling: 0.12,
                    short_exit: level <= 2,
                }
            }
            DifficultyMode::Strict => {
                let size = (9 + 2 * half).min(25);
                Self {
                    width: size,
                    height: size,
                    hazard_density: (0.05 + 0.015 * lf).min(0.18),
                    reward_density: 0.08,
                    enemy_cap: (2 + level / 2).min(8),
                    branching_factor: (1.0 + 0.1 * lf).min(2.0),
                    dead_end_favor: (1.0 + 0.2 * lf).min(3.0),
                    hazard_ceiling: 0.25,
                    short_exit: false,
                }
            }
        }
    }
}
