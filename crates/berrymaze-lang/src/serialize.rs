//! Rendering instruction trees back to text and to block tokens.

use berrymaze_core::Instruction;

use crate::blocks::BlockToken;

/// Render a program as canonical text.
///
/// Statements are separated by `"; "` and blocks use `{ ... }`.
/// Reserved markers and `NoOp` have no textual form and are omitted, so
/// `parse_program(&to_source(p))` equals `p` only for programs built from
/// moves, repeats and conditionals.
pub fn to_source(program: &[Instruction]) -> String {
    let mut out = String::new();
    write_body(&mut out, program);
    out
}

fn write_body(out: &mut String, body: &[Instruction]) {
    let mut first = true;
    for ins in body {
        let start = out.len();
        if !first {
            out.push_str("; ");
        }
        let before = out.len();
        match ins {
            Instruction::Move(dir) => {
                out.push_str(&format!("move {dir}"));
            }
            Instruction::Repeat { count, body } => {
                out.push_str(&format!("repeat {count} "));
                write_block(out, body);
            }
            Instruction::IfAtLeastStrawberries { min, body } => {
                out.push_str(&format!("if strawberries >= {min} "));
                write_block(out, body);
            }
            _ => {}
        }
        if out.len() == before {
            // nothing rendered; drop the separator
            out.truncate(start);
        } else {
            first = false;
        }
    }
}

fn write_block(out: &mut String, body: &[Instruction]) {
    let start = out.len();
    out.push_str("{ ");
    write_body(out, body);
    if out.len() == start + 2 {
        out.truncate(start);
        out.push_str("{}");
    } else {
        out.push_str(" }");
    }
}

/// Render a program as the block-token sequence that
/// [`build_blocks`](crate::build_blocks) turns back into it.
///
/// `NoOp` has no block and is omitted. A `FunctionDefinition` nested in
/// another one renders, but the builder rejects it on the way back.
pub fn to_blocks(program: &[Instruction]) -> Vec<BlockToken> {
    let mut out = Vec::new();
    push_blocks(&mut out, program);
    out
}

fn push_blocks(out: &mut Vec<BlockToken>, body: &[Instruction]) {
    for ins in body {
        match ins {
            Instruction::Move(dir) => out.push(BlockToken::Move(*dir)),
            Instruction::Repeat { count, body } => {
                out.push(BlockToken::RepeatStart(i64::from(*count)));
                push_blocks(out, body);
                out.push(BlockToken::End);
            }
            Instruction::IfAtLeastStrawberries { min, body } => {
                out.push(BlockToken::IfStart(i64::from(*min)));
                push_blocks(out, body);
                out.push(BlockToken::End);
            }
            Instruction::RepeatUntilGoal { body } => {
                out.push(BlockToken::UntilGoalStart);
                push_blocks(out, body);
                out.push(BlockToken::End);
            }
            Instruction::RepeatWhileHasStrawberry { body } => {
                out.push(BlockToken::WhileHasStrawberryStart);
                push_blocks(out, body);
                out.push(BlockToken::End);
            }
            Instruction::FunctionDefinition { body } => {
                out.push(BlockToken::FunctionStart);
                push_blocks(out, body);
                out.push(BlockToken::FunctionEnd);
            }
            Instruction::FunctionCall => out.push(BlockToken::FunctionCall),
            Instruction::NoOp => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use berrymaze_core::Direction;

    #[test]
    fn renders_canonical_text() {
        let p = vec![
            Instruction::Move(Direction::Right),
            Instruction::repeat(
                3,
                vec![
                    Instruction::Move(Direction::Down),
                    Instruction::if_at_least(1, vec![]),
                ],
            ),
        ];
        assert_eq!(
            to_source(&p),
            "move right; repeat 3 { move down; if strawberries >= 1 {} }"
        );
    }

    #[test]
    fn reserved_markers_are_omitted_from_text() {
        let p = vec![
            Instruction::FunctionCall,
            Instruction::Move(Direction::Up),
            Instruction::NoOp,
            Instruction::RepeatUntilGoal {
                body: vec![Instruction::Move(Direction::Left)],
            },
            Instruction::Move(Direction::Down),
        ];
        assert_eq!(to_source(&p), "move up; move down");
        assert_eq!(to_source(&[]), "");
    }

    #[test]
    fn blocks_include_markers() {
        let p = vec![
            Instruction::FunctionDefinition {
                body: vec![Instruction::Move(Direction::Up)],
            },
            Instruction::FunctionCall,
            Instruction::NoOp,
        ];
        assert_eq!(
            to_blocks(&p),
            vec![
                BlockToken::FunctionStart,
                BlockToken::Move(Direction::Up),
                BlockToken::FunctionEnd,
                BlockToken::FunctionCall,
            ]
        );
    }
}
