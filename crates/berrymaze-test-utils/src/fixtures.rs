//! Reusable program and event fixtures.
//!
//! - [`nested_repeats`]: a single move wrapped in `depth` one-shot repeats.
//! - [`step_positions`]: positions of the `Step` events in a stream.
//! - [`without_logs`]: drops `Log` events for shape comparisons.

use berrymaze_core::{Direction, ExecEvent, Instruction, Position};

/// `repeat 1 { repeat 1 { ... move right ... } }`, `depth` repeats deep.
pub fn nested_repeats(depth: usize) -> Vec<Instruction> {
    let mut program = vec![Instruction::Move(Direction::Right)];
    for _ in 0..depth {
        program = vec![Instruction::repeat(1, program)];
    }
    program
}

/// Positions reported by `Step` events, in order.
pub fn step_positions(events: &[ExecEvent]) -> Vec<Position> {
    events
        .iter()
        .filter_map(|e| match e {
            ExecEvent::Step { position, .. } => Some(*position),
            _ => None,
        })
        .collect()
}

/// The stream with `Log` events removed.
pub fn without_logs(events: &[ExecEvent]) -> Vec<ExecEvent> {
    events
        .iter()
        .filter(|e| !matches!(e, ExecEvent::Log(_)))
        .cloned()
        .collect()
}
