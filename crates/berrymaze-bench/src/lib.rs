//! Benchmark profiles and utilities for Berrymaze.
//!
//! Provides pre-built generator parameters and programs for benchmarks
//! and examples:
//!
//! - [`reference_params`]: the hardest built-in tier (25x25 strict)
//! - [`stress_params`]: a 101x101 grid outside the built-in tiers
//! - [`sweep_program`]: a serpentine walk covering a whole grid
//! - [`nested_program`]: a deep tree of one-shot repeats

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use berrymaze_core::{Direction, Instruction};
use berrymaze_gen::{DifficultyMode, DifficultyParams};

/// Level used by the reference profile; sizes are capped well before it.
pub const REFERENCE_LEVEL: u32 = 20;

/// Strict-mode parameters at [`REFERENCE_LEVEL`]: 25x25 grid.
pub fn reference_params() -> DifficultyParams {
    DifficultyParams::for_level(REFERENCE_LEVEL, DifficultyMode::Strict)
}

/// Reference parameters scaled to a 101x101 grid (~10K cells).
pub fn stress_params() -> DifficultyParams {
    DifficultyParams {
        width: 101,
        height: 101,
        ..reference_params()
    }
}

/// Walk right across `width` cells, step down, walk back, step down,
/// `height / 2` times. Blocked moves still cost a step, so the event
/// count is independent of the maze layout.
pub fn sweep_program(width: u32, height: u32) -> Vec<Instruction> {
    let run = i64::from(width.saturating_sub(1));
    vec![Instruction::repeat(
        i64::from(height / 2),
        vec![
            Instruction::repeat(run, vec![Instruction::Move(Direction::Right)]),
            Instruction::Move(Direction::Down),
            Instruction::repeat(run, vec![Instruction::Move(Direction::Left)]),
            Instruction::Move(Direction::Down),
        ],
    )]
}

/// `depth` nested `repeat 2` blocks around a right/left pair:
/// `2^(depth+1)` moves.
pub fn nested_program(depth: u32) -> Vec<Instruction> {
    let mut program = vec![
        Instruction::Move(Direction::Right),
        Instruction::Move(Direction::Left),
    ];
    for _ in 0..depth {
        program = vec![Instruction::repeat(2, program)];
    }
    program
}
