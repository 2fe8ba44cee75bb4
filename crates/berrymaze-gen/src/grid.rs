//! Tile grid produced by the maze generator.

use std::fmt;

use berrymaze_core::{Direction, Position};
use smallvec::SmallVec;

/// Kind of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileType {
    /// Impassable.
    Wall,
    /// Plain walkable floor.
    Path,
    /// Where the player starts.
    Start,
    /// The goal cell.
    Exit,
    /// Floor with an enemy on it.
    Hazard,
    /// Floor with a strawberry on it.
    Reward,
}

impl TileType {
    /// Stable ordinal used for hashing.
    pub fn ordinal(self) -> u8 {
        match self {
            TileType::Wall => 0,
            TileType::Path => 1,
            TileType::Start => 2,
            TileType::Exit => 3,
            TileType::Hazard => 4,
            TileType::Reward => 5,
        }
    }

    /// Whether the player may stand on this tile.
    pub fn is_walkable(self) -> bool {
        self != TileType::Wall
    }

    /// Single-character glyph used by [`MazeGrid::render`].
    pub fn glyph(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Path => '.',
            TileType::Start => 'S',
            TileType::Exit => 'E',
            TileType::Hazard => 'X',
            TileType::Reward => '*',
        }
    }
}

/// Row-major grid of tiles with fixed dimensions.
///
/// Also records where the generator placed the start and goal. When no
/// goal distinct from the start could be placed, `goal == start` and no
/// `Exit` tile exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
    start: Position,
    goal: Position,
}

impl MazeGrid {
    /// An all-wall grid.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileType::Wall; width as usize * height as usize],
            start: Position::new(0, 0),
            goal: Position::new(0, 0),
        }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// The placed start cell.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The placed goal cell.
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// All tiles, row-major.
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Whether `pos` lies strictly inside the border ring.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && (pos.x as u32) < self.width.saturating_sub(1)
            && (pos.y as u32) < self.height.saturating_sub(1)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    /// Tile at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<TileType> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Whether `pos` holds exactly `tile`.
    pub fn is(&self, pos: Position, tile: TileType) -> bool {
        self.get(pos) == Some(tile)
    }

    pub(crate) fn set(&mut self, pos: Position, tile: TileType) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    pub(crate) fn place_start(&mut self, pos: Position) {
        self.start = pos;
        self.set(pos, TileType::Start);
    }

    /// Records the goal; the Exit tile is only written when it differs from the start.
    pub(crate) fn place_goal(&mut self, pos: Position) {
        self.goal = pos;
        if pos != self.start {
            self.set(pos, TileType::Exit);
        }
    }

    /// Every cell with its tile, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, TileType)> + '_ {
        let w = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &t)| (Position::new((i % w) as i32, (i / w) as i32), t))
    }

    /// Positions holding `tile`, row-major.
    pub fn positions_of(&self, tile: TileType) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(move |&(_, t)| t == tile)
            .map(|(p, _)| p)
    }

    /// Number of cells holding `tile`.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// In-bounds 4-neighbours of `pos`, in [`Direction::ALL`] order.
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 4]> {
        Direction::ALL
            .iter()
            .map(|&d| pos.step(d))
            .filter(|&p| self.in_bounds(p))
            .collect()
    }

    /// ASCII rendering, one line per row (see [`TileType::glyph`]).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() + self.height as usize);
        for row in self.tiles.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|t| t.glyph()));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
