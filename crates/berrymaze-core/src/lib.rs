//! Core types and traits for the Berrymaze learning platform.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the language, generator and
//! engine crates: positions and directions, the instruction tree, the
//! maze and player state consumed by the engine, the execution event
//! stream, error types, and the boundary traits used by external
//! collaborators.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod instruction;
pub mod maze;
pub mod position;
pub mod traits;

pub use error::{BuildError, MazeError, ParseError, RunError};
pub use event::ExecEvent;
pub use instruction::Instruction;
pub use maze::{Maze, PlayerState};
pub use position::{Direction, Position};
pub use traits::{CompletionRecorder, EventSink, LevelCompletion};
