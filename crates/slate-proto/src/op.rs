//! Producer-side drawing operations and their lowering.
//!
//! Producers express drawing as [`DrawOp`]s, a superset of the wire command
//! set that adds the virtual packed-color form. [`DrawOp::lower`] is the
//! explicit compile step down to [`DrawCommand`]; the codec only ever sees
//! lowered instructions, so it needs no special cases.
//!
//! The other virtual form, printing a whole string, expands to one print op
//! per glyph and needs font advances, so it lives with the display crate's
//! text layout rather than here.

use crate::color::PackedColor;
use crate::command::DrawCommand;

/// One producer-side drawing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Clear { r: i32, g: i32, b: i32 },
    SetColor { r: i32, g: i32, b: i32, a: i32 },
    /// Virtual: a whole packed RGBA value instead of four channel operands.
    SetColorPacked { color: PackedColor },
    SetStroke { width: i32 },
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    FillRect { x: i32, y: i32, width: i32, height: i32 },
    StrokeRect { x: i32, y: i32, width: i32, height: i32 },
    FillPoly { x: i32, y: i32, sides: i32, radius: i32, rotation: i32 },
    StrokePoly { x: i32, y: i32, sides: i32, radius: i32, rotation: i32 },
    Triangle { x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32 },
    Image { x: i32, y: i32, icon: i32, size: i32, rotation: i32 },
    /// Draw one glyph. Strings are laid out into a run of these.
    Print { x: i32, y: i32, glyph: i32 },
    Reset,
}

impl DrawOp {
    /// Lowers to the canonical wire command set.
    ///
    /// Lowering never fails: the packed color splits into four channel
    /// operands, one byte each and therefore always in range.
    pub fn lower(self) -> DrawCommand {
        match self {
            DrawOp::Clear { r, g, b } => DrawCommand::Clear { r, g, b },
            DrawOp::SetColor { r, g, b, a } => DrawCommand::SetColor { r, g, b, a },
            DrawOp::SetColorPacked { color } => {
                let [r, g, b, a] = color.channel_operands();
                DrawCommand::SetColor { r, g, b, a }
            }
            DrawOp::SetStroke { width } => DrawCommand::SetStroke { width },
            DrawOp::Line { x1, y1, x2, y2 } => DrawCommand::Line { x1, y1, x2, y2 },
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
            } => DrawCommand::FillRect {
                x,
                y,
                width,
                height,
            },
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
            } => DrawCommand::StrokeRect {
                x,
                y,
                width,
                height,
            },
            DrawOp::FillPoly {
                x,
                y,
                sides,
                radius,
                rotation,
            } => DrawCommand::FillPoly {
                x,
                y,
                sides,
                radius,
                rotation,
            },
            DrawOp::StrokePoly {
                x,
                y,
                sides,
                radius,
                rotation,
            } => DrawCommand::StrokePoly {
                x,
                y,
                sides,
                radius,
                rotation,
            },
            DrawOp::Triangle {
                x1,
                y1,
                x2,
                y2,
                x3,
                y3,
            } => DrawCommand::Triangle {
                x1,
                y1,
                x2,
                y2,
                x3,
                y3,
            },
            DrawOp::Image {
                x,
                y,
                icon,
                size,
                rotation,
            } => DrawCommand::Image {
                x,
                y,
                icon,
                size,
                rotation,
            },
            DrawOp::Print { x, y, glyph } => DrawCommand::Print { x, y, glyph },
            DrawOp::Reset => DrawCommand::Reset,
        }
    }
}
