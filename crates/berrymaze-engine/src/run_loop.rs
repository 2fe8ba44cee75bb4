//! The driving loop shared by both runners.
//!
//! Checks cancellation before every interpreter step, forwards events in
//! order, and sleeps the step delay after each paced instruction. A
//! consumer that stops accepting events is treated as a cancellation. A
//! cancelled run always offers the sink one final cancellation log, even
//! when the cancel interrupted delivery of another event.

use std::time::{Duration, Instant};

use berrymaze_core::event::CANCELLED_MESSAGE;
use berrymaze_core::{EventSink, ExecEvent};

use crate::cancel::CancelToken;
use crate::interpreter::Interpreter;
use crate::report::{RunOutcome, RunReport};

/// Drive `interp` to completion or cancellation.
///
/// `step_delay` of zero disables pacing.
pub(crate) fn drive<S>(
    interp: &mut Interpreter<'_>,
    sink: &mut S,
    cancel: &CancelToken,
    step_delay: Duration,
) -> RunReport
where
    S: EventSink + ?Sized,
{
    let begin = Instant::now();
    let mut emitted: u64 = 0;

    loop {
        if cancel.is_cancelled() {
            return cancelled(interp, sink, emitted, begin);
        }

        let out = interp.step();
        for event in out.events {
            if !sink.emit(event) {
                // a cancel that interrupted delivery still ends the stream
                if cancel.is_cancelled() {
                    return cancelled(interp, sink, emitted, begin);
                }
                log::debug!("event consumer disconnected; stopping run");
                cancel.cancel();
                return report(interp, None, RunOutcome::Cancelled, emitted, begin);
            }
            emitted += 1;
        }

        if let Some(outcome) = interp.outcome().cloned() {
            let state = Some(interp.state());
            return report(interp, state, outcome, emitted, begin);
        }

        if out.pace && !step_delay.is_zero() {
            cancel.sleep(step_delay);
        }
    }
}

/// Emit the cancellation log and report the run as cancelled.
fn cancelled<S>(
    interp: &Interpreter<'_>,
    sink: &mut S,
    mut emitted: u64,
    begin: Instant,
) -> RunReport
where
    S: EventSink + ?Sized,
{
    if sink.emit(ExecEvent::Log(CANCELLED_MESSAGE.to_string())) {
        emitted += 1;
    }
    log::debug!("run cancelled after {emitted} events");
    report(interp, None, RunOutcome::Cancelled, emitted, begin)
}

fn report(
    interp: &Interpreter<'_>,
    final_state: Option<berrymaze_core::PlayerState>,
    outcome: RunOutcome,
    emitted: u64,
    begin: Instant,
) -> RunReport {
    let mut metrics = interp.metrics().clone();
    metrics.events_emitted = emitted;
    metrics.total_us = begin.elapsed().as_micros() as u64;
    RunReport {
        final_state,
        outcome,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berrymaze_core::{Direction, Instruction, Maze, PlayerState};

    #[test]
    fn pre_cancelled_run_emits_only_cancel_log() {
        let maze = Maze::builder(3, 3).build().unwrap();
        let program = [Instruction::Move(Direction::Right)];
        let mut interp = Interpreter::new(&program, &maze, PlayerState::at_start(maze.start()), 64);
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut events: Vec<ExecEvent> = Vec::new();
        let report = drive(&mut interp, &mut events, &cancel, Duration::ZERO);
        assert_eq!(events, vec![ExecEvent::Log(CANCELLED_MESSAGE.into())]);
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.final_state, None);
    }

    #[test]
    fn refusing_sink_stops_run() {
        let maze = Maze::builder(5, 1).build().unwrap();
        let program = [Instruction::repeat(4, vec![Instruction::Move(Direction::Right)])];
        let mut interp = Interpreter::new(&program, &maze, PlayerState::at_start(maze.start()), 64);
        let cancel = CancelToken::new();
        let mut accepted = 0;
        let mut sink = |_e: ExecEvent| {
            accepted += 1;
            accepted <= 2
        };
        let report = drive(&mut interp, &mut sink, &cancel, Duration::ZERO);
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.metrics.events_emitted, 2);
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn cancel_during_refused_delivery_still_logs() {
        let maze = Maze::builder(5, 1).build().unwrap();
        let program = [Instruction::repeat(4, vec![Instruction::Move(Direction::Right)])];
        let mut interp = Interpreter::new(&program, &maze, PlayerState::at_start(maze.start()), 64);
        let cancel = CancelToken::new();
        let mut delivered: Vec<ExecEvent> = Vec::new();
        // accepts Started, then refuses the first step after cancelling
        let mut sink = |e: ExecEvent| {
            if matches!(e, ExecEvent::Step { .. }) && !cancel.is_cancelled() {
                cancel.cancel();
                return false;
            }
            delivered.push(e);
            true
        };
        let report = drive(&mut interp, &mut sink, &cancel.clone(), Duration::ZERO);
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert_eq!(report.metrics.events_emitted, 2);
        assert!(matches!(delivered[0], ExecEvent::Started(_)));
        assert_eq!(delivered[1], ExecEvent::Log(CANCELLED_MESSAGE.into()));
        assert_eq!(delivered.len(), 2);
    }
}
