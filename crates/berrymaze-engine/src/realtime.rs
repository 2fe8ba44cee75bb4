//! Threaded runner: one run at a time on a dedicated worker thread.
//!
//! ```text
//! Caller thread                      berrymaze-run thread
//!     |                                    |
//!     |--start(program, maze, player)----->| Interpreter::new
//!     |<--RunHandle { events, cancel }     | loop:
//!     |                                    |   cancelled? -> Log, exit
//!     |<--ExecEvent via events channel-----|   step(), send events
//!     |                                    |   sleep(step_delay) / wake on cancel
//!     |--handle.cancel()------------------>|
//!     |--wait()--------------------------->| join -> RunReport
//! ```
//!
//! Starting a new run cancels and joins the previous one first, so at
//! most one run holds a player state at any time. Every run delivers
//! exactly one terminal event (`Finished` or the cancellation log) unless
//! its handle has been dropped.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use berrymaze_core::{EventSink, ExecEvent, Instruction, Maze, PlayerState};
use crossbeam_channel::{Receiver, Sender};

use crate::cancel::CancelToken;
use crate::config::{ConfigError, EngineConfig};
use crate::interpreter::Interpreter;
use crate::report::RunReport;
use crate::run_loop::drive;

/// How long a sink waiting for buffer room sleeps between checks.
const SEND_RECHECK: Duration = Duration::from_millis(10);

/// The caller's side of a started run.
///
/// Dropping the handle cancels the run.
#[derive(Debug)]
pub struct RunHandle {
    events: Receiver<ExecEvent>,
    cancel: CancelToken,
}

impl RunHandle {
    /// Events in execution order. The stream disconnects after the
    /// terminal event.
    pub fn events(&self) -> &Receiver<ExecEvent> {
        &self.events
    }

    /// Cancel this run. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether this run has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Block until the stream ends and return every event.
    pub fn collect(self) -> Vec<ExecEvent> {
        self.events.iter().collect()
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct ActiveRun {
    cancel: CancelToken,
    thread: JoinHandle<RunReport>,
}

/// Sends events over a channel.
///
/// With a bounded buffer of `limit` events the channel holds one slot
/// more than `limit`. Ordinary events wait until fewer than `limit` are
/// queued, so a terminal event always finds room. An ordinary event still
/// waiting when the run is cancelled is dropped.
struct ChannelSink {
    tx: Sender<ExecEvent>,
    cancel: CancelToken,
    limit: Option<usize>,
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: ExecEvent) -> bool {
        if let Some(limit) = self.limit.filter(|_| !event.is_terminal()) {
            while self.tx.len() >= limit {
                if self.cancel.sleep(SEND_RECHECK) {
                    return false;
                }
            }
        }
        self.tx.try_send(event).is_ok()
    }
}

/// Runs programs on a background thread named `berrymaze-run`.
///
/// Dropping the runner cancels and joins any active run.
pub struct RealtimeRunner {
    config: EngineConfig,
    active: Option<ActiveRun>,
}

impl RealtimeRunner {
    /// Create a runner from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            active: None,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a run, cancelling and joining the previous one first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThreadSpawnFailed`] if the worker thread
    /// cannot be spawned.
    pub fn start(
        &mut self,
        program: Vec<Instruction>,
        maze: impl Into<Arc<Maze>>,
        player: PlayerState,
    ) -> Result<RunHandle, ConfigError> {
        if let Some(previous) = self.take_finished_or_cancel() {
            let _ = Self::join(previous);
        }

        let maze: Arc<Maze> = maze.into();
        let limit = self.config.event_buffer;
        let (tx, rx) = match limit {
            Some(n) => crossbeam_channel::bounded(n.saturating_add(1)),
            None => crossbeam_channel::unbounded(),
        };
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let max_depth = self.config.max_depth;
        let step_delay = self.config.step_delay;

        let thread = thread::Builder::new()
            .name("berrymaze-run".into())
            .spawn(move || {
                let mut sink = ChannelSink {
                    tx,
                    cancel: worker_cancel.clone(),
                    limit,
                };
                let mut interp = Interpreter::new(&program, &maze, player, max_depth);
                log::debug!(
                    "run started: {} instructions from {}",
                    Instruction::count(&program),
                    player.position
                );
                let report = drive(&mut interp, &mut sink, &worker_cancel, step_delay);
                log::debug!("run ended: {:?}", report.outcome);
                report
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: format!("berrymaze-run: {e}"),
            })?;

        self.active = Some(ActiveRun {
            cancel: cancel.clone(),
            thread,
        });
        Ok(RunHandle { events: rx, cancel })
    }

    /// Cancel the active run, if any. Does not wait for it.
    pub fn cancel(&self) {
        if let Some(active) = &self.active {
            active.cancel.cancel();
        }
    }

    /// Whether a run is still executing.
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| !a.thread.is_finished())
    }

    /// Wait for the active run to end and return its report.
    ///
    /// Returns `None` if no run was started since the last `wait`, or if
    /// the worker thread panicked.
    pub fn wait(&mut self) -> Option<RunReport> {
        self.active.take().and_then(Self::join)
    }

    fn take_finished_or_cancel(&mut self) -> Option<ActiveRun> {
        let active = self.active.take()?;
        if !active.thread.is_finished() {
            log::debug!("cancelling previous run before starting a new one");
            active.cancel.cancel();
        }
        Some(active)
    }

    fn join(active: ActiveRun) -> Option<RunReport> {
        match active.thread.join() {
            Ok(report) => Some(report),
            Err(_) => {
                log::error!("berrymaze-run thread panicked");
                None
            }
        }
    }
}

impl Drop for RealtimeRunner {
    fn drop(&mut self) {
        if let Some(active) = self.take_finished_or_cancel() {
            let _ = Self::join(active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berrymaze_core::event::CANCELLED_MESSAGE;
    use crate::report::RunOutcome;
    use berrymaze_core::{Direction, Position};
    use std::time::Instant;

    fn open() -> Maze {
        Maze::builder(6, 1).goal(Position::new(5, 0)).build().unwrap()
    }

    fn origin() -> PlayerState {
        PlayerState::at_start(Position::new(0, 0))
    }

    fn five_right() -> Vec<Instruction> {
        vec![Instruction::repeat(5, vec![Instruction::Move(Direction::Right)])]
    }

    fn slow() -> EngineConfig {
        EngineConfig::default().with_step_delay(Duration::from_secs(30))
    }

    #[test]
    fn run_streams_events_and_reports() {
        let mut runner = RealtimeRunner::new(EngineConfig::instant()).unwrap();
        let handle = runner.start(five_right(), open(), origin()).unwrap();
        let events = handle.collect();
        assert!(matches!(events.first(), Some(ExecEvent::Started(_))));
        assert!(matches!(events[events.len() - 2], ExecEvent::Success { .. }));
        let report = runner.wait().unwrap();
        assert!(report.outcome.reached_goal());
        assert!(runner.wait().is_none());
    }

    #[test]
    fn cancel_during_delay_is_prompt() {
        let mut runner = RealtimeRunner::new(slow()).unwrap();
        let handle = runner.start(five_right(), open(), origin()).unwrap();

        // wait for the first move, then cancel while the worker sleeps
        let first_step = handle
            .events()
            .iter()
            .find(|e| matches!(e, ExecEvent::Step { .. }));
        assert!(first_step.is_some());
        let begin = Instant::now();
        handle.cancel();
        let rest: Vec<ExecEvent> = handle.events().iter().collect();
        assert_eq!(rest, vec![ExecEvent::Log(CANCELLED_MESSAGE.into())]);
        assert!(begin.elapsed() < Duration::from_secs(10));
        assert_eq!(runner.wait().unwrap().final_state, None);
    }

    #[test]
    fn start_replaces_active_run() {
        let mut runner = RealtimeRunner::new(slow()).unwrap();
        let first = runner.start(five_right(), open(), origin()).unwrap();
        let second = runner.start(vec![], open(), origin()).unwrap();

        let first_events: Vec<ExecEvent> = first.events().iter().collect();
        assert_eq!(
            first_events.last(),
            Some(&ExecEvent::Log(CANCELLED_MESSAGE.into()))
        );
        let second_events = second.collect();
        assert!(matches!(second_events.last(), Some(ExecEvent::Finished(_))));
        assert!(runner.wait().is_some());
    }

    #[test]
    fn bounded_buffer_still_delivers_everything() {
        let config = EngineConfig {
            event_buffer: Some(1),
            ..EngineConfig::instant()
        };
        let mut runner = RealtimeRunner::new(config).unwrap();
        let handle = runner.start(five_right(), open(), origin()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        let events = handle.collect();
        // Started, 5 steps, Success, Finished
        assert_eq!(events.len(), 8);
    }

    #[test]
    fn cancel_with_full_buffer_still_ends_stream() {
        let config = EngineConfig {
            event_buffer: Some(1),
            ..EngineConfig::instant()
        };
        let mut runner = RealtimeRunner::new(config).unwrap();
        let maze = Maze::builder(52, 1).build().unwrap();
        let program = vec![Instruction::repeat(50, vec![Instruction::Move(Direction::Right)])];
        let handle = runner.start(program, maze, origin()).unwrap();

        // the worker is now blocked on a full buffer; read only after cancelling
        std::thread::sleep(Duration::from_millis(50));
        handle.cancel();
        std::thread::sleep(Duration::from_millis(100));
        let events = handle.collect();

        assert_eq!(events.last(), Some(&ExecEvent::Log(CANCELLED_MESSAGE.into())));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        assert_eq!(runner.wait().unwrap().outcome, RunOutcome::Cancelled);
    }

    #[test]
    fn dropping_handle_cancels_blocked_run() {
        let config = EngineConfig {
            event_buffer: Some(1),
            ..EngineConfig::instant()
        };
        let mut runner = RealtimeRunner::new(config).unwrap();
        let handle = runner.start(five_right(), open(), origin()).unwrap();
        drop(handle);
        assert_eq!(runner.wait().unwrap().outcome, RunOutcome::Cancelled);
    }

    #[test]
    fn dropping_runner_stops_worker() {
        let mut runner = RealtimeRunner::new(slow()).unwrap();
        let handle = runner.start(five_right(), open(), origin()).unwrap();
        let begin = Instant::now();
        drop(runner);
        assert!(begin.elapsed() < Duration::from_secs(10));
        assert!(handle.is_cancelled());
    }
}
