//! Lockstep (synchronous) runner.
//!
//! [`LockstepRunner`] drives the interpreter on the calling thread and
//! hands events to an [`EventSink`] as they happen. It does not sleep
//! between steps unless pacing is turned on, which makes it the
//! deterministic harness for tests and for callers that do their own
//! pacing. No background threads are involved.

use std::time::Duration;

use berrymaze_core::{EventSink, ExecEvent, Instruction, Maze, PlayerState};

use crate::cancel::CancelToken;
use crate::config::{ConfigError, EngineConfig};
use crate::interpreter::Interpreter;
use crate::report::RunReport;
use crate::run_loop::drive;

/// Synchronous runner.
///
/// # Examples
///
/// ```
/// use berrymaze_core::{ExecEvent, Maze, PlayerState, Position};
/// use berrymaze_engine::{EngineConfig, LockstepRunner};
/// use berrymaze_lang::parse_program;
///
/// let maze = Maze::builder(4, 1).goal(Position::new(3, 0)).build().unwrap();
/// let program = parse_program("repeat 3 { move right }").unwrap();
/// let runner = LockstepRunner::new(EngineConfig::default()).unwrap();
/// let player = PlayerState::at_start(maze.start());
/// let (events, report) = runner.run_collect(&program, &maze, player);
///
/// assert!(report.outcome.reached_goal());
/// assert!(matches!(events.last(), Some(ExecEvent::Finished(_))));
/// ```
#[derive(Clone, Debug)]
pub struct LockstepRunner {
    config: EngineConfig,
    paced: bool,
}

impl LockstepRunner {
    /// Create a runner from a validated configuration. Pacing is off.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            paced: false,
        })
    }

    /// Sleep the configured step delay between paced instructions.
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run to completion, delivering events to `sink`.
    pub fn run<S>(
        &self,
        program: &[Instruction],
        maze: &Maze,
        player: PlayerState,
        sink: &mut S,
    ) -> RunReport
    where
        S: EventSink + ?Sized,
    {
        self.run_cancellable(program, maze, player, sink, &CancelToken::new())
    }

    /// Run until completion or until `cancel` fires.
    pub fn run_cancellable<S>(
        &self,
        program: &[Instruction],
        maze: &Maze,
        player: PlayerState,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> RunReport
    where
        S: EventSink + ?Sized,
    {
        let mut interp = Interpreter::new(program, maze, player, self.config.max_depth);
        let delay = if self.paced {
            self.config.step_delay
        } else {
            Duration::ZERO
        };
        drive(&mut interp, sink, cancel, delay)
    }

    /// Run to completion and return every event.
    pub fn run_collect(
        &self,
        program: &[Instruction],
        maze: &Maze,
        player: PlayerState,
    ) -> (Vec<ExecEvent>, RunReport) {
        let mut events = Vec::new();
        let report = self.run(program, maze, player, &mut events);
        (events, report)
    }
}
