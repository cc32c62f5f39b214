//! The 64-bit wire codec.
//!
//! One instruction packs into one `u64`: a 4-bit kind tag in bits 63..=60,
//! then six 10-bit operand fields, most significant slot first (operand 1 in
//! bits 59..=50, operand 6 in bits 9..=0). Each field is sign-magnitude: 9
//! magnitude bits plus a sign bit above them. That gives the operand range
//! [-511, 511] and makes an all-zero-magnitude field with the sign bit set a
//! "negative zero", which decodes equal to zero.
//!
//! `encode` rejects out-of-range operands instead of masking them; see
//! [`EncodeError`]. `decode` accepts any operand bits and fails only on tags
//! that name no wire instruction.

use thiserror::Error;

use crate::command::{CommandKind, DrawCommand};

/// Wire form of one instruction.
pub type PackedWord = u64;

/// Bits per operand field.
pub const OPERAND_BITS: u32 = 10;
/// Operand fields per word.
pub const OPERAND_SLOTS: usize = 6;
/// Largest encodable operand (9-bit magnitude).
pub const OPERAND_MAX: i32 = 511;
/// Smallest encodable operand.
pub const OPERAND_MIN: i32 = -511;

const KIND_SHIFT: u32 = 60;
const MAGNITUDE_MASK: u64 = 0x1ff;
const SIGN_BIT: u64 = 0x200;
const FIELD_MASK: u64 = 0x3ff;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// An operand falls outside [`OPERAND_MIN`]..=[`OPERAND_MAX`]. Nothing is
    /// emitted and no field is truncated; the producer decides whether to
    /// clamp (see [`clamp_operand`]) or drop the instruction. `index` is the
    /// zero-based operand slot.
    #[error("operand {index} out of range: {value} does not fit a 10-bit sign-magnitude field")]
    OperandOutOfRange { index: usize, value: i32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The tag names no command kind. The word is corrupt; interpreters skip
    /// it and keep draining.
    #[error("unknown command tag {tag}")]
    UnknownTag { tag: u8 },
    /// The tag names a producer-side virtual kind, which is never legal on
    /// the wire. Skipped like an unknown tag.
    #[error("virtual command tag {tag} is not a wire instruction")]
    VirtualTag { tag: u8 },
}

/// Shift that places operand slot `index` (0-based, wire order).
const fn slot_shift(index: usize) -> u32 {
    50 - OPERAND_BITS * index as u32
}

/// Clamps a value into the representable operand range, preserving sign.
///
/// Producers that prefer pinned-to-edge coordinates over encode failures
/// (text layout does, for glyphs that run off the surface) apply this before
/// building an instruction.
pub const fn clamp_operand(value: i32) -> i32 {
    if value > OPERAND_MAX {
        OPERAND_MAX
    } else if value < OPERAND_MIN {
        OPERAND_MIN
    } else {
        value
    }
}

/// Decodes one 10-bit sign-magnitude field.
pub const fn unpack_operand(field: u64) -> i32 {
    let magnitude = (field & MAGNITUDE_MASK) as i32;
    if field & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    }
}

fn pack_operand(value: i32, index: usize) -> Result<u64, EncodeError> {
    if value < OPERAND_MIN || value > OPERAND_MAX {
        return Err(EncodeError::OperandOutOfRange { index, value });
    }
    let sign = if value < 0 { SIGN_BIT } else { 0 };
    Ok(sign | value.unsigned_abs() as u64)
}

/// Encodes an instruction into its wire word.
pub fn encode(cmd: &DrawCommand) -> Result<PackedWord, EncodeError> {
    let mut word = (cmd.kind().tag() as u64) << KIND_SHIFT;
    for (index, &value) in cmd.operands().iter().enumerate() {
        word |= pack_operand(value, index)? << slot_shift(index);
    }
    Ok(word)
}

/// Decodes a wire word.
pub fn decode(word: PackedWord) -> Result<DrawCommand, DecodeError> {
    let tag = (word >> KIND_SHIFT) as u8;
    let kind = CommandKind::from_tag(tag).ok_or(DecodeError::UnknownTag { tag })?;

    let mut ops = [0i32; OPERAND_SLOTS];
    for (index, op) in ops.iter_mut().enumerate() {
        *op = unpack_operand((word >> slot_shift(index)) & FIELD_MASK);
    }

    Ok(match kind {
        CommandKind::SetColorPacked => return Err(DecodeError::VirtualTag { tag }),
        CommandKind::Clear => DrawCommand::Clear {
            r: ops[0],
            g: ops[1],
            b: ops[2],
        },
        CommandKind::SetColor => DrawCommand::SetColor {
            r: ops[0],
            g: ops[1],
            b: ops[2],
            a: ops[3],
        },
        CommandKind::SetStroke => DrawCommand::SetStroke { width: ops[0] },
        CommandKind::Line => DrawCommand::Line {
            x1: ops[0],
            y1: ops[1],
            x2: ops[2],
            y2: ops[3],
        },
        CommandKind::FillRect => DrawCommand::FillRect {
            x: ops[0],
            y: ops[1],
            width: ops[2],
            height: ops[3],
        },
        CommandKind::StrokeRect => DrawCommand::StrokeRect {
            x: ops[0],
            y: ops[1],
            width: ops[2],
            height: ops[3],
        },
        CommandKind::FillPoly => DrawCommand::FillPoly {
            x: ops[0],
            y: ops[1],
            sides: ops[2],
            radius: ops[3],
            rotation: ops[4],
        },
        CommandKind::StrokePoly => DrawCommand::StrokePoly {
            x: ops[0],
            y: ops[1],
            sides: ops[2],
            radius: ops[3],
            rotation: ops[4],
        },
        CommandKind::Triangle => DrawCommand::Triangle {
            x1: ops[0],
            y1: ops[1],
            x2: ops[2],
            y2: ops[3],
            x3: ops[4],
            y3: ops[5],
        },
        CommandKind::Image => DrawCommand::Image {
            x: ops[0],
            y: ops[1],
            icon: ops[2],
            size: ops[3],
            rotation: ops[4],
        },
        CommandKind::Print => DrawCommand::Print {
            x: ops[0],
            y: ops[1],
            glyph: ops[2],
        },
        CommandKind::Reset => DrawCommand::Reset,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encodes_the_documented_layout() {
        // Line(1, -2, 511, 0) => tag 4, then sign-magnitude fields MSB first.
        let word = encode(&DrawCommand::Line {
            x1: 1,
            y1: -2,
            x2: 511,
            y2: 0,
        })
        .unwrap();
        assert_eq!(word >> 60, 4);
        assert_eq!((word >> 50) & 0x3ff, 0x001);
        assert_eq!((word >> 40) & 0x3ff, 0x202);
        assert_eq!((word >> 30) & 0x3ff, 0x1ff);
        assert_eq!((word >> 20) & 0x3ff, 0x000);
        // Unused slots stay zero.
        assert_eq!(word & 0xfffff, 0);
    }

    #[test]
    fn boundary_operands_round_trip() {
        for value in [OPERAND_MIN, -1, 0, 1, OPERAND_MAX] {
            let cmd = DrawCommand::SetStroke { width: value };
            assert_eq!(decode(encode(&cmd).unwrap()).unwrap(), cmd);
        }
    }

    #[test]
    fn out_of_range_operands_are_rejected_with_slot_and_value() {
        let err = encode(&DrawCommand::Line {
            x1: 0,
            y1: 512,
            x2: 0,
            y2: 0,
        })
        .unwrap_err();
        assert_eq!(err, EncodeError::OperandOutOfRange { index: 1, value: 512 });

        let err = encode(&DrawCommand::SetStroke { width: -512 }).unwrap_err();
        assert_eq!(
            err,
            EncodeError::OperandOutOfRange {
                index: 0,
                value: -512
            }
        );
    }

    #[test]
    fn negative_zero_decodes_to_zero() {
        // A hand-built Line word with the first field set to sign-only 0x200.
        let word = (4u64 << 60) | (SIGN_BIT << 50);
        assert_eq!(
            decode(word).unwrap(),
            DrawCommand::Line {
                x1: 0,
                y1: 0,
                x2: 0,
                y2: 0,
            }
        );
        // encode never produces the sign-only form.
        let canonical = encode(&decode(word).unwrap()).unwrap();
        assert_eq!(canonical, 4u64 << 60);
    }

    #[test]
    fn unknown_tags_fail_decode() {
        for tag in 13..=15u64 {
            let err = decode(tag << 60).unwrap_err();
            assert_eq!(err, DecodeError::UnknownTag { tag: tag as u8 });
        }
    }

    #[test]
    fn virtual_tag_fails_decode() {
        let err = decode(2u64 << 60).unwrap_err();
        assert_eq!(err, DecodeError::VirtualTag { tag: 2 });
    }

    #[test]
    fn clamp_pins_to_the_representable_edge() {
        assert_eq!(clamp_operand(1000), OPERAND_MAX);
        assert_eq!(clamp_operand(-1000), OPERAND_MIN);
        assert_eq!(clamp_operand(37), 37);
    }

    #[test]
    fn reset_is_a_bare_tag() {
        let word = encode(&DrawCommand::Reset).unwrap();
        assert_eq!(word, 12u64 << 60);
        assert_eq!(decode(word).unwrap(), DrawCommand::Reset);
    }
}
