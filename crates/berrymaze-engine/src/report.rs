//! How a run ended.

use berrymaze_core::{PlayerState, RunError};

use crate::metrics::RunMetrics;

/// Terminal status of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The whole program ran.
    Completed {
        /// Whether the player ended on the goal.
        reached_goal: bool,
    },
    /// A runtime failure stopped the run early.
    Aborted(RunError),
    /// The run was cancelled or its consumer went away.
    Cancelled,
}

impl RunOutcome {
    /// `true` only for a completed run that ended on the goal.
    pub fn reached_goal(&self) -> bool {
        matches!(self, RunOutcome::Completed { reached_goal: true })
    }
}

/// Summary handed back when a run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Final player state. `None` for a cancelled run.
    pub final_state: Option<PlayerState>,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Counters for the run.
    pub metrics: RunMetrics,
}
