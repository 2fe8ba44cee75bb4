//! Berrymaze: an educational maze platform where learners steer a player
//! with a small command language.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Berrymaze sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use berrymaze::prelude::*;
//!
//! // Level 3 of a fixed campaign, converted to a playable maze.
//! let level = build_level(7, 3, DifficultyMode::Lenient);
//! let maze = level.to_maze().unwrap();
//!
//! // The same program, written as text and as blocks.
//! let text = parse_program("repeat 2 { move right }").unwrap();
//! let blocks = build_blocks([
//!     BlockToken::RepeatStart(2),
//!     BlockToken::Move(Direction::Right),
//!     BlockToken::End,
//! ])
//! .unwrap();
//! assert_eq!(text, blocks);
//!
//! let runner = LockstepRunner::new(EngineConfig::instant()).unwrap();
//! let (events, report) = runner.run_collect(&text, &maze, PlayerState::at_start(maze.start()));
//! assert!(matches!(events.first(), Some(ExecEvent::Started(_))));
//! assert!(matches!(events.last(), Some(ExecEvent::Finished(_))));
//! assert!(report.final_state.is_some());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `berrymaze-core` | Positions, mazes, instructions, events, errors |
//! | [`lang`] | `berrymaze-lang` | Text parser, block builder, serializers |
//! | [`gen`] | `berrymaze-gen` | Difficulty tiers, maze generation, spawners, levels |
//! | [`engine`] | `berrymaze-engine` | Interpreter, lockstep and realtime runners |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`berrymaze-core`).
///
/// Contains [`types::Maze`], [`types::Instruction`], [`types::ExecEvent`]
/// and the [`types::EventSink`] / [`types::CompletionRecorder`] traits.
pub use berrymaze_core as types;

/// The command language (`berrymaze-lang`).
///
/// [`lang::parse_program`] for text, [`lang::BlockBuilder`] for block
/// sequences, and [`lang::to_source`] / [`lang::to_blocks`] back again.
pub use berrymaze_lang as lang;

/// Seeded maze and level generation (`berrymaze-gen`).
pub use berrymaze_gen as gen;

/// Execution engine (`berrymaze-engine`).
///
/// [`engine::LockstepRunner`] runs on the calling thread,
/// [`engine::RealtimeRunner`] on a cancellable background thread.
pub use berrymaze_engine as engine;

/// Common imports for typical Berrymaze usage.
///
/// ```rust
/// use berrymaze::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use berrymaze_core::{
        CompletionRecorder, Direction, EventSink, ExecEvent, Instruction, LevelCompletion, Maze,
        PlayerState, Position,
    };

    // Errors
    pub use berrymaze_core::{BuildError, MazeError, ParseError, RunError};

    // Language
    pub use berrymaze_lang::{
        build_blocks, parse_program, to_blocks, to_source, BlockBuilder, BlockToken,
    };

    // Generation
    pub use berrymaze_gen::{build_level, DifficultyMode, LevelOrchestrator, MazeLevel};

    // Engine
    pub use berrymaze_engine::{
        CancelToken, EngineConfig, LockstepRunner, RealtimeRunner, RunHandle, RunOutcome,
        RunReport,
    };
}
