//! Test utilities for Berrymaze development.
//!
//! Provides an ASCII maze builder ([`ascii_maze`]), an [`open_maze`]
//! shortcut, a [`MemoryRecorder`] implementing
//! [`CompletionRecorder`], and program/event fixtures in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use berrymaze_core::{CompletionRecorder, LevelCompletion, Maze, Position};

/// Build a maze from ASCII rows.
///
/// | Glyph | Meaning |
/// |-------|---------|
/// | `#`   | wall |
/// | `.`   | floor |
/// | `S`   | start (default `(0, 0)` if absent) |
/// | `G`   | goal |
/// | `X`   | hazard |
/// | `*`   | reward |
/// | `B`   | reward and hazard on the same cell |
///
/// # Panics
///
/// Panics on ragged rows, unknown glyphs, or an invalid maze.
pub fn ascii_maze(rows: &[&str]) -> Maze {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut b = Maze::builder(width, height);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(
            row.chars().count() as u32,
            width,
            "row {y} has a different width"
        );
        for (x, ch) in row.chars().enumerate() {
            let p = Position::new(x as i32, y as i32);
            b = match ch {
                '#' => b.wall(p),
                '.' => b,
                'S' => b.start(p),
                'G' => b.goal(p),
                'X' => b.hazard(p),
                '*' => b.reward(p),
                'B' => b.reward(p).hazard(p),
                other => panic!("unknown maze glyph {other:?} at ({x}, {y})"),
            };
        }
    }
    b.build().expect("fixture maze is invalid")
}

/// A `width × height` maze with no walls, starting at `(0, 0)`.
pub fn open_maze(width: u32, height: u32) -> Maze {
    Maze::builder(width, height)
        .build()
        .expect("open maze dimensions are invalid")
}

/// [`CompletionRecorder`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    pub completions: Vec<LevelCompletion>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Best strawberry count recorded for `level`.
    pub fn best(&self, level: u32) -> Option<u32> {
        self.completions
            .iter()
            .filter(|c| c.level == level)
            .map(|c| c.strawberries)
            .max()
    }
}

impl CompletionRecorder for MemoryRecorder {
    fn record(&mut self, completion: LevelCompletion) {
        self.completions.push(completion);
    }
}
