//! Parser for program text.
//!
//! ```text
//! program   := statement*
//! statement := move | repeat | if | ';'
//! move      := "move" direction
//! repeat    := "repeat" integer '{' program '}'
//! if        := "if" "strawberries" ">=" integer '{' program '}'
//! ```
//!
//! Open blocks live on an explicit stack rather than the call stack, so
//! nesting depth is limited only by memory. Depth is enforced when the
//! program runs.

use berrymaze_core::{Direction, Instruction, ParseError};

use crate::token::{tokenize, Token};

/// Parse program text into an instruction tree.
///
/// Either the whole program parses or an error is returned; no partial
/// tree is produced. A `;` statement contributes no instruction.
///
/// # Errors
///
/// Returns a [`ParseError`] at the index of the first token that does
/// not fit the grammar, or one past the last token if input ends early.
///
/// # Examples
///
/// ```
/// use berrymaze_core::{Direction, Instruction};
/// use berrymaze_lang::parse_program;
///
/// let program = parse_program("repeat 2 { move down }").unwrap();
/// assert_eq!(
///     program,
///     vec![Instruction::repeat(2, vec![Instruction::Move(Direction::Down)])]
/// );
///
/// let err = parse_program("repeat { move up }").unwrap_err();
/// assert_eq!(err.index, 1);
/// ```
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, ParseError> {
    let tokens = tokenize(text);
    let mut parser = Parser::new(&tokens);
    let program = parser.program()?;
    if let Some(tok) = parser.peek() {
        return Err(ParseError::new(
            tok.index,
            format!("unexpected tokens at end, starting with '{}'", tok.text),
        ));
    }
    log::trace!(
        "parsed {} instruction(s) from {} token(s)",
        Instruction::count(&program),
        tokens.len()
    );
    Ok(program)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.pos, message)
    }

    /// Consume the next token, which must be `expected`.
    fn expect(&mut self, expected: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(tok) if tok.is(expected) => {
                self.pos += 1;
                Ok(())
            }
            Some(tok) => Err(self.error_here(format!(
                "expected '{expected}', found '{}'",
                tok.text
            ))),
            None => Err(self.error_here(format!("expected '{expected}', found end of input"))),
        }
    }

    fn integer(&mut self) -> Result<i64, ParseError> {
        match self.peek() {
            Some(tok) => match tok.text.parse::<i64>() {
                Ok(n) => {
                    self.pos += 1;
                    Ok(n)
                }
                Err(_) => Err(self.error_here(format!("expected integer, found '{}'", tok.text))),
            },
            None => Err(self.error_here("expected integer, found end of input")),
        }
    }

    fn direction(&mut self) -> Result<Direction, ParseError> {
        match self.peek() {
            Some(tok) => match Direction::from_keyword(&tok.text) {
                Some(dir) => {
                    self.pos += 1;
                    Ok(dir)
                }
                None => Err(self.error_here(format!("unknown direction '{}'", tok.text))),
            },
            None => Err(self.error_here("expected direction, found end of input")),
        }
    }

    /// The whole token stream up to a closing brace that matches no open
    /// block, or end of input.
    fn program(&mut self) -> Result<Vec<Instruction>, ParseError> {
        let mut root = Vec::new();
        let mut open: Vec<OpenBlock> = Vec::new();

        while let Some(tok) = self.peek() {
            if tok.is("}") {
                let Some(block) = open.pop() else {
                    break;
                };
                self.pos += 1;
                current_body(&mut root, &mut open).push(block.close());
                continue;
            }
            self.pos += 1;
            match tok.text.as_str() {
                ";" => {}
                "move" => {
                    let dir = self.direction()?;
                    current_body(&mut root, &mut open).push(Instruction::Move(dir));
                }
                "repeat" => {
                    let count = self.integer()?;
                    self.expect("{")?;
                    open.push(OpenBlock::new(BlockKind::Repeat(count)));
                }
                "if" => {
                    self.expect("strawberries")?;
                    self.expect(">=")?;
                    let min = self.integer()?;
                    self.expect("{")?;
                    open.push(OpenBlock::new(BlockKind::If(min)));
                }
                other => {
                    return Err(ParseError::new(
                        tok.index,
                        format!("unknown keyword '{other}'"),
                    ))
                }
            }
        }

        if !open.is_empty() {
            return Err(self.error_here("expected '}', found end of input"));
        }
        Ok(root)
    }
}

enum BlockKind {
    Repeat(i64),
    If(i64),
}

struct OpenBlock {
    kind: BlockKind,
    body: Vec<Instruction>,
}

impl OpenBlock {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            body: Vec::new(),
        }
    }

    fn close(self) -> Instruction {
        match self.kind {
            BlockKind::Repeat(n) => Instruction::repeat(n, self.body),
            BlockKind::If(min) => Instruction::if_at_least(min, self.body),
        }
    }
}

/// The innermost open body, or the top level.
fn current_body<'v>(
    root: &'v mut Vec<Instruction>,
    open: &'v mut [OpenBlock],
) -> &'v mut Vec<Instruction> {
    match open.last_mut() {
        Some(block) => &mut block.body,
        None => root,
    }
}
