//! The instruction tree shared by the text parser and the block builder.

use crate::position::Direction;

/// One node of a compiled learner program.
///
/// Both the textual grammar and the structured block form compile to a
/// `Vec<Instruction>`. Bodies nest arbitrarily deep; depth is bounded
/// when the program runs, not when it is built.
///
/// `RepeatUntilGoal`, `RepeatWhileHasStrawberry`, `FunctionDefinition`
/// and `FunctionCall` are reserved markers. The engine treats them as
/// strict no-ops: they consume no step delay and emit no event.
///
/// # Examples
///
/// ```
/// use berrymaze_core::{Direction, Instruction};
///
/// let program = vec![
///     Instruction::Move(Direction::Right),
///     Instruction::repeat(3, vec![Instruction::Move(Direction::Down)]),
/// ];
/// assert_eq!(Instruction::max_depth(&program), 2);
/// assert_eq!(Instruction::count(&program), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Attempt to move one cell.
    Move(Direction),
    /// Run `body` `count` times.
    Repeat {
        /// Number of iterations, already clamped to be non-negative.
        count: u32,
        /// Instructions executed each iteration.
        body: Vec<Instruction>,
    },
    /// Run `body` once if the player holds at least `min` strawberries.
    IfAtLeastStrawberries {
        /// Threshold, already clamped to be non-negative.
        min: u32,
        /// Instructions executed when the condition holds.
        body: Vec<Instruction>,
    },
    /// Reserved loop-until-goal block.
    RepeatUntilGoal {
        /// Block contents (not executed).
        body: Vec<Instruction>,
    },
    /// Reserved loop-while-holding-a-strawberry block.
    RepeatWhileHasStrawberry {
        /// Block contents (not executed).
        body: Vec<Instruction>,
    },
    /// Reserved user-defined function body.
    FunctionDefinition {
        /// Function contents (not executed).
        body: Vec<Instruction>,
    },
    /// Reserved call of the user-defined function.
    FunctionCall,
    /// Does nothing.
    NoOp,
}

impl Instruction {
    /// Build a `Repeat`, clamping a negative literal count to zero.
    pub fn repeat(count: i64, body: Vec<Instruction>) -> Self {
        Instruction::Repeat {
            count: clamp_count(count),
            body,
        }
    }

    /// Build an `IfAtLeastStrawberries`, clamping a negative threshold to zero.
    pub fn if_at_least(min: i64, body: Vec<Instruction>) -> Self {
        Instruction::IfAtLeastStrawberries {
            min: clamp_count(min),
            body,
        }
    }

    /// Returns `true` for the markers the engine executes as no-ops.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            Instruction::RepeatUntilGoal { .. }
                | Instruction::RepeatWhileHasStrawberry { .. }
                | Instruction::FunctionDefinition { .. }
                | Instruction::FunctionCall
                | Instruction::NoOp
        )
    }

    /// The nested body of a block instruction, if it has one.
    pub fn body(&self) -> Option<&[Instruction]> {
        match self {
            Instruction::Repeat { body, .. }
            | Instruction::IfAtLeastStrawberries { body, .. }
            | Instruction::RepeatUntilGoal { body }
            | Instruction::RepeatWhileHasStrawberry { body }
            | Instruction::FunctionDefinition { body } => Some(body),
            Instruction::Move(_) | Instruction::FunctionCall | Instruction::NoOp => None,
        }
    }

    fn body_mut(&mut self) -> Option<&mut Vec<Instruction>> {
        match self {
            Instruction::Repeat { body, .. }
            | Instruction::IfAtLeastStrawberries { body, .. }
            | Instruction::RepeatUntilGoal { body }
            | Instruction::RepeatWhileHasStrawberry { body }
            | Instruction::FunctionDefinition { body } => Some(body),
            Instruction::Move(_) | Instruction::FunctionCall | Instruction::NoOp => None,
        }
    }

    /// Deepest nesting level in `program`. A flat program has depth 1,
    /// an empty one depth 0.
    pub fn max_depth(program: &[Instruction]) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(program, 1)];
        while let Some((body, depth)) = pending.pop() {
            for ins in body {
                deepest = deepest.max(depth);
                if let Some(inner) = ins.body() {
                    pending.push((inner, depth + 1));
                }
            }
        }
        deepest
    }

    /// Total number of instruction nodes in `program`, bodies included.
    pub fn count(program: &[Instruction]) -> usize {
        let mut total = 0;
        let mut pending = vec![program];
        while let Some(body) = pending.pop() {
            total += body.len();
            pending.extend(body.iter().filter_map(Instruction::body));
        }
        total
    }
}

// Nested bodies are moved onto a worklist before they drop, so releasing
// an arbitrarily deep tree uses constant stack.
impl Drop for Instruction {
    fn drop(&mut self) {
        let Some(body) = self.body_mut() else {
            return;
        };
        if body.iter().all(|ins| ins.body().is_none_or(<[Instruction]>::is_empty)) {
            return;
        }
        let mut pending = std::mem::take(body);
        while let Some(mut ins) = pending.pop() {
            if let Some(inner) = ins.body_mut() {
                pending.append(inner);
            }
        }
    }
}

/// Clamp a signed literal to the non-negative `u32` range.
pub fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
