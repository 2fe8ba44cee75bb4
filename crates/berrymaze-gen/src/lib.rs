//! Seeded procedural maze generation for Berrymaze.
//!
//! Everything here is a pure function of its inputs: the same
//! `(params, seed, concepts)` produce the same [`MazeGrid`] in every
//! process, and the same `(base_seed, level, mode)` produce the same
//! [`MazeLevel`]. Levels can be generated concurrently without locking.
//!
//! - [`difficulty`]: tiers, concepts and the `(level, mode)` factory
//! - [`generator`]: carving, goal placement, hazard/reward sprinkling
//! - [`spawn`]: enemy and collectible entities
//! - [`level`]: level assembly and the orchestrator
//! - [`hash`]: FNV-1a grid hashing

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod difficulty;
pub mod generator;
pub mod grid;
pub mod hash;
pub mod level;
pub mod spawn;

pub use difficulty::{concepts_for_level, Concept, DifficultyMode, DifficultyParams};
pub use generator::{generate, MazeGenerator};
pub use grid::{MazeGrid, TileType};
pub use hash::grid_hash;
pub use level::{build_level, level_seed, record_completion, LevelOrchestrator, MazeLevel};
pub use spawn::{spawn_collectibles, spawn_enemies, Collectible, Enemy};
