//! Wire protocol for slate remote displays.
//!
//! A drawing instruction travels as a single 64-bit word: a 4-bit kind tag
//! and six 10-bit sign-magnitude operands. This crate owns everything about
//! that wire form:
//! - the canonical command set ([`DrawCommand`], [`CommandKind`]),
//! - the codec ([`encode`]/[`decode`] and the operand helpers),
//! - packed RGBA colors ([`PackedColor`]),
//! - the producer-side instruction set and its lowering ([`DrawOp`]), and
//! - a word-stream builder for tooling and tests ([`CommandWriter`]).
//!
//! It performs no I/O and knows nothing about surfaces or queues; the
//! `slate-display` crate interprets the words this crate produces.
#![forbid(unsafe_code)]

pub mod codec;
pub mod color;
pub mod command;
pub mod op;
pub mod writer;

pub use codec::{
    clamp_operand, decode, encode, unpack_operand, DecodeError, EncodeError, PackedWord,
    OPERAND_BITS, OPERAND_MAX, OPERAND_MIN, OPERAND_SLOTS,
};
pub use color::PackedColor;
pub use command::{CommandKind, DrawCommand};
pub use op::DrawOp;
pub use writer::CommandWriter;
