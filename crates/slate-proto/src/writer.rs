//! Producer-side command stream builder.
//!
//! Lowers and encodes drawing operations into packed words, in producer
//! order. Intended for tests, fixtures and host-side tooling that needs
//! canonical word streams; the display crate accepts the words directly.

use crate::codec::{encode, EncodeError, PackedWord};
use crate::color::PackedColor;
use crate::op::DrawOp;

/// Accumulates encoded words.
///
/// Every method rejects out-of-range operands via [`EncodeError`]; a failed
/// push appends nothing.
#[derive(Debug, Default, Clone)]
pub struct CommandWriter {
    words: Vec<PackedWord>,
}

impl CommandWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowers, encodes and appends one operation.
    pub fn push(&mut self, op: DrawOp) -> Result<(), EncodeError> {
        let word = encode(&op.lower())?;
        self.words.push(word);
        Ok(())
    }

    /// Appends a clear-to-RGB command (the display keeps it opaque).
    pub fn clear(&mut self, r: i32, g: i32, b: i32) -> Result<(), EncodeError> {
        self.push(DrawOp::Clear { r, g, b })
    }

    pub fn set_color(&mut self, r: i32, g: i32, b: i32, a: i32) -> Result<(), EncodeError> {
        self.push(DrawOp::SetColor { r, g, b, a })
    }

    /// Appends the packed-color form; lowered to four channel operands here,
    /// never encoded raw.
    pub fn set_color_packed(&mut self, color: PackedColor) -> Result<(), EncodeError> {
        self.push(DrawOp::SetColorPacked { color })
    }

    pub fn set_stroke(&mut self, width: i32) -> Result<(), EncodeError> {
        self.push(DrawOp::SetStroke { width })
    }

    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), EncodeError> {
        self.push(DrawOp::Line { x1, y1, x2, y2 })
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<(), EncodeError> {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        })
    }

    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), EncodeError> {
        self.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
        })
    }

    pub fn fill_poly(
        &mut self,
        x: i32,
        y: i32,
        sides: i32,
        radius: i32,
        rotation: i32,
    ) -> Result<(), EncodeError> {
        self.push(DrawOp::FillPoly {
            x,
            y,
            sides,
            radius,
            rotation,
        })
    }

    pub fn stroke_poly(
        &mut self,
        x: i32,
        y: i32,
        sides: i32,
        radius: i32,
        rotation: i32,
    ) -> Result<(), EncodeError> {
        self.push(DrawOp::StrokePoly {
            x,
            y,
            sides,
            radius,
            rotation,
        })
    }

    pub fn triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
    ) -> Result<(), EncodeError> {
        self.push(DrawOp::Triangle {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
        })
    }

    pub fn image(
        &mut self,
        x: i32,
        y: i32,
        icon: i32,
        size: i32,
        rotation: i32,
    ) -> Result<(), EncodeError> {
        self.push(DrawOp::Image {
            x,
            y,
            icon,
            size,
            rotation,
        })
    }

    /// Appends a single-glyph print. Fails for characters whose code exceeds
    /// the operand range; such characters have no wire representation.
    pub fn print(&mut self, x: i32, y: i32, c: char) -> Result<(), EncodeError> {
        self.push(DrawOp::Print {
            x,
            y,
            glyph: c as i32,
        })
    }

    /// Appends the marker command that interpreters treat as a no-op.
    pub fn reset(&mut self) -> Result<(), EncodeError> {
        self.push(DrawOp::Reset)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[PackedWord] {
        &self.words
    }

    pub fn finish(self) -> Vec<PackedWord> {
        self.words
    }
}
