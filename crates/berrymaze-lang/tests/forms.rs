//! Text and block forms must compile to the same tree.

use berrymaze_core::{Direction, Instruction};
use berrymaze_lang::{build_blocks, parse_program, to_blocks, to_source, BlockToken};
use proptest::prelude::*;

#[test]
fn text_and_blocks_agree() {
    let text = "move right; repeat 2 { move down; if strawberries >= 1 { move left } }";
    let blocks = [
        BlockToken::Move(Direction::Right),
        BlockToken::RepeatStart(2),
        BlockToken::Move(Direction::Down),
        BlockToken::IfStart(1),
        BlockToken::Move(Direction::Left),
        BlockToken::End,
        BlockToken::End,
    ];
    assert_eq!(parse_program(text).unwrap(), build_blocks(blocks).unwrap());
}

#[test]
fn source_roundtrip_of_a_sample_program() {
    let text = "repeat 3 { move right }; move up";
    let program = parse_program(text).unwrap();
    assert_eq!(to_source(&program), "repeat 3 { move right }; move up");
}

#[test]
fn blocks_roundtrip_keeps_function_markers() {
    let program = vec![
        Instruction::FunctionDefinition {
            body: vec![Instruction::repeat(2, vec![Instruction::Move(Direction::Up)])],
        },
        Instruction::FunctionCall,
        Instruction::RepeatWhileHasStrawberry { body: vec![] },
    ];
    assert_eq!(build_blocks(to_blocks(&program)).unwrap(), program);
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

/// Programs made only of constructs with a textual form.
fn program() -> impl Strategy<Value = Vec<Instruction>> {
    let leaf = direction().prop_map(Instruction::Move);
    let tree = leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (0i64..6, prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(n, body)| Instruction::repeat(n, body)),
            (0i64..4, prop::collection::vec(inner, 0..4))
                .prop_map(|(m, body)| Instruction::if_at_least(m, body)),
        ]
    });
    prop::collection::vec(tree, 0..6)
}

proptest! {
    #[test]
    fn text_form_reparses_to_same_tree(p in program()) {
        prop_assert_eq!(parse_program(&to_source(&p)).unwrap(), p);
    }

    #[test]
    fn block_form_rebuilds_to_same_tree(p in program()) {
        prop_assert_eq!(build_blocks(to_blocks(&p)).unwrap(), p);
    }
}
