//! Error types for the Berrymaze core, organized by subsystem:
//! program text parsing, block building, maze construction, and
//! runtime failures inside the execution engine.

use std::error::Error;
use std::fmt;

use crate::position::Position;

/// A syntax error in program text.
///
/// `index` is the position of the offending token in the token stream
/// (not a byte offset). When input ends early, `index` is one past the
/// last token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Index of the token where the expectation failed.
    pub index: usize,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Create a parse error at `index`.
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at token {}: {}", self.index, self.message)
    }
}

impl Error for ParseError {}

/// A malformed block-token sequence handed to the structural builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A block-end marker with no open block.
    UnmatchedEnd {
        /// Index of the block token.
        index: usize,
    },
    /// Blocks were still open when the sequence ended.
    UnclosedBlocks {
        /// Number of blocks left open.
        open: usize,
    },
    /// A function-start while a function body was already pending.
    NestedFunction {
        /// Index of the block token.
        index: usize,
    },
    /// A function-end with no pending function.
    UnmatchedFunctionEnd {
        /// Index of the block token.
        index: usize,
    },
    /// A function-end while blocks opened inside the function were still open.
    FunctionEndInsideBlock {
        /// Index of the block token.
        index: usize,
    },
    /// A block-end that would close a block opened before the pending function began.
    EndCrossesFunction {
        /// Index of the block token.
        index: usize,
    },
    /// The sequence ended with a function body still pending.
    UnclosedFunction,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedEnd { index } => write!(f, "block end at {index} has no open block"),
            Self::UnclosedBlocks { open } => write!(f, "{open} block(s) left open"),
            Self::NestedFunction { index } => {
                write!(f, "function start at {index} inside another function")
            }
            Self::UnmatchedFunctionEnd { index } => {
                write!(f, "function end at {index} has no function start")
            }
            Self::FunctionEndInsideBlock { index } => {
                write!(f, "function end at {index} while a block inside it is open")
            }
            Self::EndCrossesFunction { index } => {
                write!(f, "block end at {index} would close a block outside the function")
            }
            Self::UnclosedFunction => write!(f, "function body left open"),
        }
    }
}

impl Error for BuildError {}

/// Invalid [`Maze`](crate::Maze) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is zero.
    EmptyGrid,
    /// A dimension does not fit the `i32` coordinate space.
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A position lies outside the grid.
    OutOfBounds {
        /// Which kind of position was out of bounds.
        what: &'static str,
        /// The offending position.
        pos: Position,
    },
    /// The start or goal is inside a wall.
    BlockedCell {
        /// `"start"` or `"goal"`.
        what: &'static str,
        /// The offending position.
        pos: Position,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "maze must have at least one cell"),
            Self::TooLarge { width, height } => {
                write!(f, "maze {width}x{height} exceeds the coordinate range")
            }
            Self::OutOfBounds { what, pos } => write!(f, "{what} {pos} is outside the grid"),
            Self::BlockedCell { what, pos } => write!(f, "{what} {pos} is inside a wall"),
        }
    }
}

impl Error for MazeError {}

/// Fatal conditions that abort a run.
///
/// These never escape the engine as a crash: the runner turns them
/// into a `Log` event followed by the normal `Finished` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// Nested bodies went deeper than the configured limit.
    MaxDepthExceeded {
        /// The configured limit.
        limit: u32,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDepthExceeded { limit } => write!(f, "max depth {limit} exceeded"),
        }
    }
}

impl Error for RunError {}
