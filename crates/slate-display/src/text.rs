//! Host-side text layout: expands a string into per-glyph print commands.
//!
//! The display itself interprets exactly one glyph per print word. This
//! module is producer-side sugar that measures a string against an
//! [`Atlas`], applies an anchor alignment and emits one
//! [`DrawCommand::Print`] per resolvable character.

use slate_proto::{clamp_operand, DrawCommand, OPERAND_MAX};

use crate::atlas::{Atlas, Glyph};

/// Nine-position anchor for a laid-out string.
///
/// The anchor names the point of the text block that lands on the given
/// coordinates. `BottomLeft` matches what a raw print word does.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    BottomLeft,
    Bottom,
    BottomRight,
    Left,
    Center,
    Right,
    TopLeft,
    Top,
    TopRight,
}

impl TextAlign {
    /// Fraction of the block width to shift left: 0 for left-anchored,
    /// 1 for right-anchored.
    fn horizontal(self) -> f32 {
        match self {
            TextAlign::BottomLeft | TextAlign::Left | TextAlign::TopLeft => 0.0,
            TextAlign::Bottom | TextAlign::Center | TextAlign::Top => 0.5,
            TextAlign::BottomRight | TextAlign::Right | TextAlign::TopRight => 1.0,
        }
    }

    /// Fraction of the block height to shift down: 0 for bottom-anchored,
    /// 1 for top-anchored.
    fn vertical(self) -> f32 {
        match self {
            TextAlign::BottomLeft | TextAlign::Bottom | TextAlign::BottomRight => 0.0,
            TextAlign::Left | TextAlign::Center | TextAlign::Right => 0.5,
            TextAlign::TopLeft | TextAlign::Top | TextAlign::TopRight => 1.0,
        }
    }
}

/// Lays `text` out as print commands anchored at `(x, y)`.
///
/// The pen walks left to right, advancing by each glyph's `xadvance`.
/// Characters the atlas has no glyph for, and characters whose code does
/// not fit an operand, advance nothing and emit nothing. Pen positions are
/// rounded to integers and pinned into the operand range, so the result
/// always encodes.
pub fn layout_text(
    text: &str,
    x: i32,
    y: i32,
    align: TextAlign,
    atlas: &dyn Atlas,
) -> Vec<DrawCommand> {
    let width: f32 = text
        .chars()
        .filter_map(|c| printable(c, atlas))
        .map(|(_, glyph)| glyph.xadvance)
        .sum();
    let height = atlas.metrics().cap_height;

    let mut pen = x as f32 - width * align.horizontal();
    let base = y as f32 - height * align.vertical();
    let mut commands = Vec::new();
    for (code, glyph) in text.chars().filter_map(|c| printable(c, atlas)) {
        commands.push(DrawCommand::Print {
            x: clamp_operand(pen.round() as i32),
            y: clamp_operand(base.round() as i32),
            glyph: code,
        });
        pen += glyph.xadvance;
    }
    commands
}

fn printable(c: char, atlas: &dyn Atlas) -> Option<(i32, Glyph)> {
    let code = c as i32;
    if code > OPERAND_MAX {
        return None;
    }
    atlas.glyph(code).map(|glyph| (code, glyph))
}
