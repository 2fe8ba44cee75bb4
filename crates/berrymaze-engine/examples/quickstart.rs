//! Generate a level, parse a program, and watch it run in real time.
//!
//! Demonstrates: level orchestrator → Maze → parse_program →
//! RealtimeRunner → event stream → completion record.
//!
//! Run with `RUST_LOG=debug` to see engine and generator logs.

use std::time::Duration;

use berrymaze_core::{CompletionRecorder, ExecEvent, LevelCompletion, PlayerState};
use berrymaze_engine::{EngineConfig, RealtimeRunner};
use berrymaze_gen::{record_completion, DifficultyMode, LevelOrchestrator};
use berrymaze_lang::parse_program;

const PROGRAM: &str = "
    repeat 3 { move right; move down }
    if strawberries >= 1 { move right; move right }
    move down
";

/// Prints each completion; a real game would persist it.
struct PrintRecorder;

impl CompletionRecorder for PrintRecorder {
    fn record(&mut self, completion: LevelCompletion) {
        println!(
            "Recorded: level {} completed with {} strawberries",
            completion.level, completion.strawberries
        );
    }
}

fn main() {
    env_logger::init();
    println!("=== Berrymaze Quickstart ===\n");

    let mut levels = LevelOrchestrator::new(42);
    let level = levels.next_level(DifficultyMode::Lenient);
    println!(
        "Level {} ({}), seed {:#x}, {} enemies, {} collectibles",
        level.level(),
        level.mode(),
        level.seed(),
        level.enemies().len(),
        level.collectibles().len(),
    );
    println!("{}", level.grid());

    let maze = match level.to_maze() {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("level does not form a valid maze: {e}");
            return;
        }
    };
    let program = match parse_program(PROGRAM) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("syntax error: {e}");
            return;
        }
    };

    let config = EngineConfig::default().with_step_delay(Duration::from_millis(50));
    let mut runner = match RealtimeRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("bad engine config: {e}");
            return;
        }
    };
    let start = PlayerState::at_start(maze.start());
    let handle = match runner.start(program, maze, start) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("could not start run: {e}");
            return;
        }
    };

    let mut strawberries = 0;
    for event in handle.events().iter() {
        println!("  {event}");
        if let ExecEvent::Finished(state) = &event {
            strawberries = state.strawberries;
        }
    }

    if let Some(report) = runner.wait() {
        println!(
            "\nOutcome: {:?}, {} moves ({} blocked), {} strawberries, {}μs",
            report.outcome,
            report.metrics.moves,
            report.metrics.blocked_moves,
            strawberries,
            report.metrics.total_us,
        );
        if report.outcome.reached_goal() {
            record_completion(&mut PrintRecorder, &level, strawberries);
        } else {
            println!("Goal not reached; nothing recorded.");
        }
    }
}
