//! Structural builder for the block editor's flat token sequence.
//!
//! A block editor emits a linear list of pieces: plain moves, block
//! openers, block ends, and the function markers. [`BlockBuilder`] folds
//! that list into the same [`Instruction`] tree the text parser produces,
//! using an explicit stack of open bodies rather than recursion.

use berrymaze_core::{BuildError, Direction, Instruction};

/// Threshold the editor uses for a freshly dropped `if` block.
pub const DEFAULT_IF_THRESHOLD: i64 = 1;

/// One piece of a block-editor program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockToken {
    /// A move block.
    Move(Direction),
    /// Opens a repeat block with the given count.
    RepeatStart(i64),
    /// Opens an `if strawberries >= min` block.
    IfStart(i64),
    /// Opens a reserved repeat-until-goal block.
    UntilGoalStart,
    /// Opens a reserved repeat-while-holding-a-strawberry block.
    WhileHasStrawberryStart,
    /// Closes the innermost open block.
    End,
    /// Starts the (single) user function body.
    FunctionStart,
    /// Ends the user function body.
    FunctionEnd,
    /// Calls the user function.
    FunctionCall,
}

impl BlockToken {
    /// An `if` opener with the editor's default threshold.
    pub fn if_default() -> Self {
        BlockToken::IfStart(DEFAULT_IF_THRESHOLD)
    }
}

#[derive(Debug)]
enum FrameKind {
    Repeat(i64),
    If(i64),
    UntilGoal,
    WhileHasStrawberry,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    body: Vec<Instruction>,
}

impl Frame {
    fn finish(self) -> Instruction {
        match self.kind {
            FrameKind::Repeat(n) => Instruction::repeat(n, self.body),
            FrameKind::If(min) => Instruction::if_at_least(min, self.body),
            FrameKind::UntilGoal => Instruction::RepeatUntilGoal { body: self.body },
            FrameKind::WhileHasStrawberry => {
                Instruction::RepeatWhileHasStrawberry { body: self.body }
            }
        }
    }
}

#[derive(Debug)]
struct PendingFunction {
    /// Stack depth when the function started.
    base: usize,
    body: Vec<Instruction>,
}

/// Incremental builder for block-token sequences.
///
/// Feed tokens with [`push`](Self::push), then call
/// [`finish`](Self::finish). While a function is pending, instructions
/// completed at the function's base level go into the function body
/// instead of the surrounding one.
///
/// # Examples
///
/// ```
/// use berrymaze_core::{Direction, Instruction};
/// use berrymaze_lang::{BlockBuilder, BlockToken};
///
/// let mut b = BlockBuilder::new();
/// for tok in [
///     BlockToken::RepeatStart(2),
///     BlockToken::Move(Direction::Up),
///     BlockToken::End,
/// ] {
///     b.push(tok).unwrap();
/// }
/// assert_eq!(
///     b.finish().unwrap(),
///     vec![Instruction::repeat(2, vec![Instruction::Move(Direction::Up)])]
/// );
/// ```
#[derive(Debug, Default)]
pub struct BlockBuilder {
    root: Vec<Instruction>,
    stack: Vec<Frame>,
    function: Option<PendingFunction>,
    next_index: usize,
}

impl BlockBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks currently open.
    pub fn open_blocks(&self) -> usize {
        self.stack.len()
    }

    /// Whether a function body is being collected.
    pub fn in_function(&self) -> bool {
        self.function.is_some()
    }

    /// Feed one token.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] carrying this token's index when it does
    /// not fit the current structure. The builder is left unchanged.
    pub fn push(&mut self, token: BlockToken) -> Result<(), BuildError> {
        let index = self.next_index;
        match token {
            BlockToken::Move(dir) => self.append(Instruction::Move(dir)),
            BlockToken::FunctionCall => self.append(Instruction::FunctionCall),
            BlockToken::RepeatStart(n) => self.open(FrameKind::Repeat(n)),
            BlockToken::IfStart(min) => self.open(FrameKind::If(min)),
            BlockToken::UntilGoalStart => self.open(FrameKind::UntilGoal),
            BlockToken::WhileHasStrawberryStart => self.open(FrameKind::WhileHasStrawberry),
            BlockToken::End => {
                if self.stack.is_empty() {
                    return Err(BuildError::UnmatchedEnd { index });
                }
                if self
                    .function
                    .as_ref()
                    .is_some_and(|f| f.base == self.stack.len())
                {
                    return Err(BuildError::EndCrossesFunction { index });
                }
                if let Some(frame) = self.stack.pop() {
                    let done = frame.finish();
                    self.append(done);
                }
            }
            BlockToken::FunctionStart => {
                if self.function.is_some() {
                    return Err(BuildError::NestedFunction { index });
                }
                self.function = Some(PendingFunction {
                    base: self.stack.len(),
                    body: Vec::new(),
                });
            }
            BlockToken::FunctionEnd => {
                let Some(pending) = self.function.as_ref() else {
                    return Err(BuildError::UnmatchedFunctionEnd { index });
                };
                if self.stack.len() > pending.base {
                    return Err(BuildError::FunctionEndInsideBlock { index });
                }
                if let Some(pending) = self.function.take() {
                    self.append(Instruction::FunctionDefinition { body: pending.body });
                }
            }
        }
        self.next_index += 1;
        Ok(())
    }

    /// Close the sequence and return the program.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnclosedBlocks`] if blocks are still open,
    /// or [`BuildError::UnclosedFunction`] if a function body is pending.
    pub fn finish(self) -> Result<Vec<Instruction>, BuildError> {
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedBlocks {
                open: self.stack.len(),
            });
        }
        if self.function.is_some() {
            return Err(BuildError::UnclosedFunction);
        }
        Ok(self.root)
    }

    fn open(&mut self, kind: FrameKind) {
        self.stack.push(Frame {
            kind,
            body: Vec::new(),
        });
    }

    /// Append a completed instruction to whichever body is active.
    fn append(&mut self, ins: Instruction) {
        let depth = self.stack.len();
        if let Some(f) = self.function.as_mut().filter(|f| f.base == depth) {
            f.body.push(ins);
        } else if let Some(top) = self.stack.last_mut() {
            top.body.push(ins);
        } else {
            self.root.push(ins);
        }
    }
}

/// Build a program from a complete token sequence.
///
/// # Errors
///
/// See [`BlockBuilder::push`] and [`BlockBuilder::finish`].
pub fn build_blocks(
    tokens: impl IntoIterator<Item = BlockToken>,
) -> Result<Vec<Instruction>, BuildError> {
    let mut builder = BlockBuilder::new();
    for tok in tokens {
        builder.push(tok)?;
    }
    builder.finish()
}
