//! Execution events emitted by the engine, one per discrete step.

use std::fmt;

use crate::maze::PlayerState;
use crate::position::Position;

/// Log line emitted when a run is cancelled.
pub const CANCELLED_MESSAGE: &str = "Execution cancelled";

/// An immutable record of something that happened during a run.
///
/// Events arrive strictly in execution order. A non-cancelled run
/// always starts with [`ExecEvent::Started`] and ends with
/// [`ExecEvent::Finished`]; a cancelled run ends with a single
/// `Log(CANCELLED_MESSAGE)` instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecEvent {
    /// The run began with this player state.
    Started(PlayerState),
    /// A move was attempted. `position` is unchanged when the move was
    /// blocked by a wall or the grid edge.
    Step {
        /// Position after the move.
        position: Position,
        /// Strawberries held after the move.
        strawberries: u32,
    },
    /// The player entered a reward cell and picked it up.
    CollectedStrawberry {
        /// The reward cell.
        position: Position,
        /// Strawberries held after pickup.
        strawberries: u32,
    },
    /// The player hit an enemy and lost one strawberry.
    HitEnemyConsumedLife {
        /// The hazard cell.
        position: Position,
        /// Strawberries remaining.
        strawberries: u32,
    },
    /// The player hit an enemy with nothing to lose and was sent back.
    HitEnemyNoLifeReset {
        /// Where the player was reset to.
        position: Position,
    },
    /// The program ended on the goal cell.
    Success {
        /// The goal cell.
        position: Position,
    },
    /// Human-readable diagnostic, including run failures and cancellation.
    Log(String),
    /// The run completed with this final player state.
    Finished(PlayerState),
}

impl ExecEvent {
    /// Whether this event ends the stream for its run.
    pub fn is_terminal(&self) -> bool {
        match self {
            ExecEvent::Finished(_) => true,
            ExecEvent::Log(msg) => msg == CANCELLED_MESSAGE,
            _ => false,
        }
    }

    /// The player position this event reports, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            ExecEvent::Started(state) | ExecEvent::Finished(state) => Some(state.position),
            ExecEvent::Step { position, .. }
            | ExecEvent::CollectedStrawberry { position, .. }
            | ExecEvent::HitEnemyConsumedLife { position, .. }
            | ExecEvent::HitEnemyNoLifeReset { position }
            | ExecEvent::Success { position } => Some(*position),
            ExecEvent::Log(_) => None,
        }
    }
}

impl fmt::Display for ExecEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecEvent::Started(s) => write!(f, "started at {} with {}", s.position, s.strawberries),
            ExecEvent::Step {
                position,
                strawberries,
            } => write!(f, "step to {position} ({strawberries})"),
            ExecEvent::CollectedStrawberry {
                position,
                strawberries,
            } => write!(f, "collected strawberry at {position} ({strawberries})"),
            ExecEvent::HitEnemyConsumedLife {
                position,
                strawberries,
            } => write!(f, "hit enemy at {position}, {strawberries} left"),
            ExecEvent::HitEnemyNoLifeReset { position } => {
                write!(f, "hit enemy, reset to {position}")
            }
            ExecEvent::Success { position } => write!(f, "reached goal at {position}"),
            ExecEvent::Log(msg) => f.write_str(msg),
            ExecEvent::Finished(s) => {
                write!(f, "finished at {} with {}", s.position, s.strawberries)
            }
        }
    }
}
