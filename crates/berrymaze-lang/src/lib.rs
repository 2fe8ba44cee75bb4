//! The Berrymaze command language.
//!
//! Learner programs come in two equivalent forms that compile to the
//! same [`Instruction`](berrymaze_core::Instruction) tree:
//!
//! - **Text**, parsed by [`parse_program`]:
//!   `move right; repeat 3 { move down }; if strawberries >= 1 { move left }`
//! - **Blocks**, a flat sequence of [`BlockToken`]s as produced by a
//!   drag-and-drop editor, assembled by [`BlockBuilder`].
//!
//! [`to_source`] and [`to_blocks`] go the other way.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blocks;
pub mod parser;
pub mod serialize;
pub mod token;

pub use blocks::{build_blocks, BlockBuilder, BlockToken};
pub use parser::parse_program;
pub use serialize::{to_blocks, to_source};
pub use token::{tokenize, Token};
