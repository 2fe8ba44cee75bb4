//! Grid positions and the four movement directions.

use std::fmt;

/// An integer cell coordinate on a maze grid.
///
/// `x` is the column and `y` the row; `y` grows downwards, so
/// [`Direction::Up`] decreases it. Equality and hashing are by value,
/// which makes `Position` usable as a set or map key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl Position {
    /// Create a position from a column and a row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one cell away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction.delta())
    }

    /// The position shifted by `(dx, dy)`.
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan (L1) distance to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction for a `move` instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One row up (`y - 1`).
    Up,
    /// One row down (`y + 1`).
    Down,
    /// One column left (`x - 1`).
    Left,
    /// One column right (`x + 1`).
    Right,
}

impl Direction {
    /// All four directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the `(dx, dy)` unit delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a lowercase direction keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// The keyword this direction is written as in program text.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_position() -> impl Strategy<Value = Position> {
        (-1000i32..1000, -1000i32..1000).prop_map(|(x, y)| Position::new(x, y))
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    #[test]
    fn deltas_are_unit_vectors() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{dir} is not a unit step");
        }
    }

    #[test]
    fn step_follows_screen_coordinates() {
        let p = Position::new(2, 2);
        assert_eq!(p.step(Direction::Up), Position::new(2, 1));
        assert_eq!(p.step(Direction::Down), Position::new(2, 3));
        assert_eq!(p.step(Direction::Left), Position::new(1, 2));
        assert_eq!(p.step(Direction::Right), Position::new(3, 2));
    }

    #[test]
    fn keyword_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_keyword(dir.keyword()), Some(dir));
        }
        assert_eq!(Direction::from_keyword("north"), None);
        assert_eq!(Direction::from_keyword("UP"), None);
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Position::new(1, 5);
        let b = Position::new(4, 1);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    proptest! {
        #[test]
        fn step_is_undone_by_negated_delta(p in arb_position(), dir in arb_direction()) {
            let (dx, dy) = dir.delta();
            prop_assert_eq!(p.step(dir).offset((-dx, -dy)), p);
            prop_assert_eq!(p.step(dir).manhattan(p), 1);
        }

        #[test]
        fn manhattan_triangle_inequality(
            a in arb_position(),
            b in arb_position(),
            c in arb_position(),
        ) {
            prop_assert!(a.manhattan(c) <= a.manhattan(b) + b.manhattan(c));
        }
    }
}
