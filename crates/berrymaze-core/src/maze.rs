//! The maze and player state the execution engine runs against.

use indexmap::IndexSet;

use crate::error::MazeError;
use crate::position::Position;

/// Read-only maze description consumed by the execution engine.
///
/// Sets are insertion-ordered so that iteration (and anything derived
/// from it) is deterministic. Construct through [`Maze::builder`], which
/// checks that every position lies inside the grid and that the start
/// and goal are not walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: u32,
    height: u32,
    walls: IndexSet<Position>,
    hazards: IndexSet<Position>,
    rewards: IndexSet<Position>,
    start: Position,
    goal: Option<Position>,
}

impl Maze {
    /// Start building a `width × height` maze with no walls, hazards or
    /// rewards, starting at `(0, 0)`.
    pub fn builder(width: u32, height: u32) -> MazeBuilder {
        MazeBuilder {
            width,
            height,
            walls: IndexSet::new(),
            hazards: IndexSet::new(),
            rewards: IndexSet::new(),
            start: Position::new(0, 0),
            goal: None,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Where every run starts and where a penniless player is sent back to.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The exit cell, if this maze has one.
    pub fn goal(&self) -> Option<Position> {
        self.goal
    }

    /// Wall positions.
    pub fn walls(&self) -> &IndexSet<Position> {
        &self.walls
    }

    /// Hazard (enemy) positions.
    pub fn hazards(&self) -> &IndexSet<Position> {
        &self.hazards
    }

    /// Reward (strawberry) positions.
    pub fn rewards(&self) -> &IndexSet<Position> {
        &self.rewards
    }

    /// Whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    /// Whether `pos` is a wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    /// Whether `pos` holds a hazard.
    pub fn is_hazard(&self, pos: Position) -> bool {
        self.hazards.contains(&pos)
    }

    /// Whether `pos` holds a reward.
    pub fn is_reward(&self, pos: Position) -> bool {
        self.rewards.contains(&pos)
    }

    /// Whether the player may stand on `pos`.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && !self.is_wall(pos)
    }

    /// A copy of this maze without the reward at `pos`.
    ///
    /// This is how a consumer of `CollectedStrawberry` events maintains
    /// its live reward set between runs; the engine itself never calls it.
    pub fn without_reward(&self, pos: Position) -> Maze {
        let mut next = self.clone();
        next.rewards.shift_remove(&pos);
        next
    }
}

fn in_bounds(width: u32, height: u32, pos: Position) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < width && (pos.y as u32) < height
}

/// Builder for [`Maze`].
#[derive(Clone, Debug)]
pub struct MazeBuilder {
    width: u32,
    height: u32,
    walls: IndexSet<Position>,
    hazards: IndexSet<Position>,
    rewards: IndexSet<Position>,
    start: Position,
    goal: Option<Position>,
}

impl MazeBuilder {
    /// Set the start position (default `(0, 0)`).
    pub fn start(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    /// Set the goal position (default: none).
    pub fn goal(mut self, goal: Position) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Add a wall.
    pub fn wall(mut self, pos: Position) -> Self {
        self.walls.insert(pos);
        self
    }

    /// Add several walls.
    pub fn walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    /// Add a hazard.
    pub fn hazard(mut self, pos: Position) -> Self {
        self.hazards.insert(pos);
        self
    }

    /// Add several hazards.
    pub fn hazards(mut self, hazards: impl IntoIterator<Item = Position>) -> Self {
        self.hazards.extend(hazards);
        self
    }

    /// Add a reward.
    pub fn reward(mut self, pos: Position) -> Self {
        self.rewards.insert(pos);
        self
    }

    /// Add several rewards.
    pub fn rewards(mut self, rewards: impl IntoIterator<Item = Position>) -> Self {
        self.rewards.extend(rewards);
        self
    }

    /// Validate and build the maze.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - either dimension is zero or exceeds `i32::MAX`
    /// - any wall, hazard, reward, start or goal lies outside the grid
    /// - the start or goal is a wall
    pub fn build(self) -> Result<Maze, MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::EmptyGrid);
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(MazeError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }

        let (w, h) = (self.width, self.height);
        let check = |what: &'static str, pos: Position| {
            if in_bounds(w, h, pos) {
                Ok(())
            } else {
                Err(MazeError::OutOfBounds { what, pos })
            }
        };
        check("start", self.start)?;
        if let Some(goal) = self.goal {
            check("goal", goal)?;
        }
        for &pos in &self.walls {
            check("wall", pos)?;
        }
        for &pos in &self.hazards {
            check("hazard", pos)?;
        }
        for &pos in &self.rewards {
            check("reward", pos)?;
        }

        if self.walls.contains(&self.start) {
            return Err(MazeError::BlockedCell {
                what: "start",
                pos: self.start,
            });
        }
        if let Some(goal) = self.goal.filter(|g| self.walls.contains(g)) {
            return Err(MazeError::BlockedCell { what: "goal", pos: goal });
        }

        Ok(Maze {
            width: self.width,
            height: self.height,
            walls: self.walls,
            hazards: self.hazards,
            rewards: self.rewards,
            start: self.start,
            goal: self.goal,
        })
    }
}

/// The avatar's state during and between runs.
///
/// The engine owns a private mutable copy for the duration of one run
/// and publishes snapshots of it through events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerState {
    /// Current cell.
    pub position: Position,
    /// Strawberries held.
    pub strawberries: u32,
    /// Reset target when an enemy is hit with no strawberries.
    pub start: Position,
}

impl PlayerState {
    /// A player standing on `start` holding nothing.
    pub fn at_start(start: Position) -> Self {
        Self {
            position: start,
            strawberries: 0,
            start,
        }
    }

    /// Same player, holding `strawberries`.
    pub fn with_strawberries(mut self, strawberries: u32) -> Self {
        self.strawberries = strawberries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accepts_open_maze() {
        let maze = Maze::builder(3, 3)
            .goal(Position::new(2, 2))
            .build()
            .unwrap();
        assert_eq!(maze.start(), Position::new(0, 0));
        assert_eq!(maze.goal(), Some(Position::new(2, 2)));
        assert!(maze.is_walkable(Position::new(1, 1)));
        assert!(!maze.in_bounds(Position::new(3, 0)));
        assert!(!maze.in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn start_inside_wall_is_rejected() {
        let err = Maze::builder(3, 3)
            .wall(Position::new(0, 0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::BlockedCell {
                what: "start",
                pos: Position::new(0, 0)
            }
        );
    }

    #[test]
    fn goal_inside_wall_is_rejected() {
        let err = Maze::builder(3, 3)
            .goal(Position::new(1, 1))
            .wall(Position::new(1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, MazeError::BlockedCell { what: "goal", .. }));
    }

    #[test]
    fn out_of_bounds_sets_are_rejected() {
        let err = Maze::builder(2, 2)
            .reward(Position::new(5, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, MazeError::OutOfBounds { what: "reward", .. }));
        assert_eq!(Maze::builder(0, 4).build().unwrap_err(), MazeError::EmptyGrid);
    }

    #[test]
    fn without_reward_leaves_original_untouched() {
        let maze = Maze::builder(3, 1)
            .reward(Position::new(1, 0))
            .reward(Position::new(2, 0))
            .build()
            .unwrap();
        let next = maze.without_reward(Position::new(1, 0));
        assert!(maze.is_reward(Position::new(1, 0)));
        assert!(!next.is_reward(Position::new(1, 0)));
        assert!(next.is_reward(Position::new(2, 0)));
    }

    #[test]
    fn player_starts_empty_handed() {
        let p = PlayerState::at_start(Position::new(1, 1));
        assert_eq!(p.position, p.start);
        assert_eq!(p.strawberries, 0);
        assert_eq!(p.with_strawberries(2).strawberries, 2);
    }
}
