//! The instruction-tree walk as an explicit state machine.
//!
//! [`Interpreter`] owns the run's private [`PlayerState`] and the set of
//! rewards collected so far. Each [`step`](Interpreter::step) does one
//! unit of work:
//!
//! - the first step emits `Started`
//! - an instruction dispatch (`Move` emits one event; `Repeat`/`If` may
//!   push a body frame; reserved markers do nothing)
//! - a loop-iteration boundary (rewind the top frame)
//! - a frame exit (pop; popping the root finishes the run)
//!
//! Pacing and cancellation are the runner's concern: the interpreter
//! only reports, via [`StepOutcome::pace`], that a paced instruction has
//! just completed.

use berrymaze_core::{ExecEvent, Instruction, Maze, PlayerState, Position, RunError};
use indexmap::IndexSet;
use smallvec::SmallVec;

use crate::metrics::RunMetrics;
use crate::report::RunOutcome;

/// What one [`Interpreter::step`] produced.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// Events to deliver, in order.
    pub events: SmallVec<[ExecEvent; 2]>,
    /// A `Move`, `Repeat` or `If` just completed; the runner should wait
    /// the step delay before the next step.
    pub pace: bool,
}

struct Frame<'p> {
    body: &'p [Instruction],
    pc: usize,
    /// Iterations left after the current one.
    remaining: u32,
    depth: u32,
    /// Leaving this frame completes a paced instruction.
    pace_on_exit: bool,
}

/// Stepwise executor for one run.
///
/// # Examples
///
/// ```
/// use berrymaze_core::{Direction, ExecEvent, Instruction, Maze, PlayerState, Position};
/// use berrymaze_engine::Interpreter;
///
/// let maze = Maze::builder(3, 1).build().unwrap();
/// let program = [Instruction::Move(Direction::Right)];
/// let player = PlayerState::at_start(Position::new(0, 0));
/// let mut interp = Interpreter::new(&program, &maze, player, 64);
///
/// let mut events = Vec::new();
/// while !interp.is_finished() {
///     events.extend(interp.step().events);
/// }
/// assert_eq!(events[1].position(), Some(Position::new(1, 0)));
/// ```
pub struct Interpreter<'p> {
    program: &'p [Instruction],
    maze: &'p Maze,
    state: PlayerState,
    collected: IndexSet<Position>,
    frames: Vec<Frame<'p>>,
    max_depth: u32,
    started: bool,
    outcome: Option<RunOutcome>,
    metrics: RunMetrics,
}

impl<'p> Interpreter<'p> {
    /// Prepare a run of `program` on `maze` from `player`.
    pub fn new(
        program: &'p [Instruction],
        maze: &'p Maze,
        player: PlayerState,
        max_depth: u32,
    ) -> Self {
        Self {
            program,
            maze,
            state: player,
            collected: IndexSet::new(),
            frames: Vec::new(),
            max_depth,
            started: false,
            outcome: None,
            metrics: RunMetrics::default(),
        }
    }

    /// Current player state.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Rewards collected in this run, in pickup order.
    pub fn collected(&self) -> &IndexSet<Position> {
        &self.collected
    }

    /// Whether the run has emitted its terminal `Finished`.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// How the run ended, once it has.
    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Current body nesting (0 at top level, before start and after finish).
    pub fn depth(&self) -> u32 {
        self.frames.last().map_or(0, |f| f.depth)
    }

    /// Advance by one unit of work. After the run finishes this returns
    /// an empty outcome.
    pub fn step(&mut self) -> StepOutcome {
        let mut out = StepOutcome::default();
        if self.outcome.is_some() {
            return out;
        }
        if !self.started {
            self.started = true;
            out.events.push(ExecEvent::Started(self.state));
            self.frames.push(Frame {
                body: self.program,
                pc: 0,
                remaining: 0,
                depth: 0,
                pace_on_exit: false,
            });
            return out;
        }

        self.metrics.steps += 1;
        let Some(frame) = self.frames.last_mut() else {
            self.finish(&mut out);
            return out;
        };

        if frame.pc < frame.body.len() {
            let body = frame.body;
            let ins = &body[frame.pc];
            frame.pc += 1;
            let depth = frame.depth;
            self.dispatch(ins, depth, &mut out);
        } else if frame.remaining > 0 {
            frame.remaining -= 1;
            frame.pc = 0;
        } else {
            out.pace = frame.pace_on_exit;
            self.frames.pop();
            if self.frames.is_empty() {
                self.finish(&mut out);
            }
        }
        out
    }

    fn dispatch(&mut self, ins: &'p Instruction, depth: u32, out: &mut StepOutcome) {
        match ins {
            Instruction::Move(dir) => {
                let event = self.do_move(self.state.position.step(*dir));
                out.events.push(event);
                out.pace = true;
            }
            Instruction::Repeat { count, body } => {
                if *count == 0 {
                    out.pace = true;
                } else {
                    self.enter(body, count - 1, depth, out);
                }
            }
            Instruction::IfAtLeastStrawberries { min, body } => {
                if self.state.strawberries >= *min {
                    self.enter(body, 0, depth, out);
                } else {
                    out.pace = true;
                }
            }
            Instruction::RepeatUntilGoal { .. }
            | Instruction::RepeatWhileHasStrawberry { .. }
            | Instruction::FunctionDefinition { .. }
            | Instruction::FunctionCall
            | Instruction::NoOp => {}
        }
    }

    fn enter(
        &mut self,
        body: &'p [Instruction],
        remaining: u32,
        parent: u32,
        out: &mut StepOutcome,
    ) {
        let depth = parent + 1;
        if depth > self.max_depth {
            self.abort(
                RunError::MaxDepthExceeded {
                    limit: self.max_depth,
                },
                out,
            );
            return;
        }
        self.metrics.deepest = self.metrics.deepest.max(depth);
        self.frames.push(Frame {
            body,
            pc: 0,
            remaining,
            depth,
            pace_on_exit: true,
        });
    }

    fn do_move(&mut self, target: Position) -> ExecEvent {
        self.metrics.moves += 1;
        if !self.maze.is_walkable(target) {
            self.metrics.blocked_moves += 1;
            return ExecEvent::Step {
                position: self.state.position,
                strawberries: self.state.strawberries,
            };
        }
        self.state.position = target;

        // a reward wins outright over a hazard on the same cell
        if self.maze.is_reward(target) && self.collected.insert(target) {
            self.state.strawberries = self.state.strawberries.saturating_add(1);
            self.metrics.collected += 1;
            return ExecEvent::CollectedStrawberry {
                position: target,
                strawberries: self.state.strawberries,
            };
        }

        if self.maze.is_hazard(target) {
            if self.state.strawberries > 0 {
                self.state.strawberries -= 1;
                self.metrics.lives_consumed += 1;
                return ExecEvent::HitEnemyConsumedLife {
                    position: target,
                    strawberries: self.state.strawberries,
                };
            }
            self.state.position = self.state.start;
            self.metrics.resets += 1;
            return ExecEvent::HitEnemyNoLifeReset {
                position: self.state.start,
            };
        }

        ExecEvent::Step {
            position: target,
            strawberries: self.state.strawberries,
        }
    }

    fn abort(&mut self, err: RunError, out: &mut StepOutcome) {
        log::warn!("run aborted at {}: {err}", self.state.position);
        out.events.push(ExecEvent::Log(format!("Execution aborted: {err}")));
        out.events.push(ExecEvent::Finished(self.state));
        out.pace = false;
        self.frames.clear();
        self.outcome = Some(RunOutcome::Aborted(err));
    }

    fn finish(&mut self, out: &mut StepOutcome) {
        let reached_goal = self.maze.goal() == Some(self.state.position);
        if reached_goal {
            out.events.push(ExecEvent::Success {
                position: self.state.position,
            });
        }
        out.events.push(ExecEvent::Finished(self.state));
        self.outcome = Some(RunOutcome::Completed { reached_goal });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berrymaze_core::Direction;

    fn run(program: &[Instruction], maze: &Maze) -> (Vec<ExecEvent>, RunOutcome, usize) {
        let mut interp = Interpreter::new(program, maze, PlayerState::at_start(maze.start()), 64);
        let mut events = Vec::new();
        let mut paced = 0;
        while !interp.is_finished() {
            let out = interp.step();
            paced += usize::from(out.pace);
            events.extend(out.events);
        }
        (events, interp.outcome().cloned().unwrap(), paced)
    }

    fn open(w: u32, h: u32) -> Maze {
        Maze::builder(w, h).build().unwrap()
    }

    #[test]
    fn empty_program() {
        let (events, outcome, paced) = run(&[], &open(2, 2));
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ExecEvent::Started(_)));
        assert!(matches!(events[1], ExecEvent::Finished(_)));
        assert_eq!(outcome, RunOutcome::Completed { reached_goal: false });
        assert_eq!(paced, 0);
    }

    #[test]
    fn repeat_paces_moves_and_itself() {
        let program = [Instruction::repeat(3, vec![Instruction::Move(Direction::Right)])];
        let (events, _, paced) = run(&program, &open(5, 1));
        // three moves plus the repeat
        assert_eq!(paced, 4);
        let steps = events
            .iter()
            .filter(|e| matches!(e, ExecEvent::Step { .. }))
            .count();
        assert_eq!(steps, 3);
    }

    #[test]
    fn reserved_markers_are_silent_and_unpaced() {
        let program = [
            Instruction::FunctionCall,
            Instruction::NoOp,
            Instruction::FunctionDefinition {
                body: vec![Instruction::Move(Direction::Right)],
            },
            Instruction::RepeatUntilGoal {
                body: vec![Instruction::Move(Direction::Right)],
            },
            Instruction::RepeatWhileHasStrawberry {
                body: vec![Instruction::Move(Direction::Right)],
            },
        ];
        let (events, outcome, paced) = run(&program, &open(3, 3));
        assert_eq!(events.len(), 2);
        assert_eq!(paced, 0);
        assert_eq!(outcome, RunOutcome::Completed { reached_goal: false });
    }

    #[test]
    fn failed_condition_still_paces() {
        let program = [Instruction::if_at_least(1, vec![Instruction::Move(Direction::Right)])];
        let (events, _, paced) = run(&program, &open(3, 1));
        assert_eq!(events.len(), 2);
        assert_eq!(paced, 1);
    }

    #[test]
    fn reward_collected_once_per_run() {
        let maze = Maze::builder(3, 1).reward(Position::new(1, 0)).build().unwrap();
        let program = [
            Instruction::Move(Direction::Right),
            Instruction::Move(Direction::Left),
            Instruction::Move(Direction::Right),
        ];
        let (events, _, _) = run(&program, &maze);
        assert_eq!(
            events[1],
            ExecEvent::CollectedStrawberry {
                position: Position::new(1, 0),
                strawberries: 1
            }
        );
        assert_eq!(
            events[3],
            ExecEvent::Step {
                position: Position::new(1, 0),
                strawberries: 1
            }
        );
        assert!(maze.is_reward(Position::new(1, 0)));
    }

    #[test]
    fn dual_tile_reward_wins_then_hazard() {
        let maze = Maze::builder(3, 1)
            .reward(Position::new(1, 0))
            .hazard(Position::new(1, 0))
            .build()
            .unwrap();
        let program = [
            Instruction::Move(Direction::Right),
            Instruction::Move(Direction::Left),
            Instruction::Move(Direction::Right),
        ];
        let (events, _, _) = run(&program, &maze);
        assert!(matches!(events[1], ExecEvent::CollectedStrawberry { strawberries: 1, .. }));
        assert_eq!(
            events[3],
            ExecEvent::HitEnemyConsumedLife {
                position: Position::new(1, 0),
                strawberries: 0
            }
        );
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let mut program = vec![Instruction::Move(Direction::Right)];
        for _ in 0..64 {
            program = vec![Instruction::repeat(1, program)];
        }
        let (_, outcome, _) = run(&program, &open(3, 1));
        assert_eq!(outcome, RunOutcome::Completed { reached_goal: false });

        let program = vec![Instruction::repeat(1, program)];
        let (events, outcome, _) = run(&program, &open(3, 1));
        assert_eq!(outcome, RunOutcome::Aborted(RunError::MaxDepthExceeded { limit: 64 }));
        assert_eq!(
            events[events.len() - 2],
            ExecEvent::Log("Execution aborted: max depth 64 exceeded".into())
        );
    }

    #[test]
    fn steps_after_finish_are_empty() {
        let maze = open(2, 2);
        let mut interp = Interpreter::new(&[], &maze, PlayerState::at_start(maze.start()), 64);
        while !interp.is_finished() {
            interp.step();
        }
        let out = interp.step();
        assert!(out.events.is_empty());
        assert!(!out.pace);
    }

    #[test]
    fn metrics_track_moves() {
        let maze = Maze::builder(2, 1).build().unwrap();
        let program = [
            Instruction::Move(Direction::Right),
            Instruction::Move(Direction::Right),
        ];
        let mut interp = Interpreter::new(&program, &maze, PlayerState::at_start(maze.start()), 64);
        while !interp.is_finished() {
            interp.step();
        }
        assert_eq!(interp.metrics().moves, 2);
        assert_eq!(interp.metrics().blocked_moves, 1);
    }
}
