//! The canonical command set.
//!
//! Tags are wire values and must not be renumbered. Tag 2 is reserved for the
//! producer-side packed-color form, which is lowered before encoding and never
//! appears in a queue (see [`crate::op`]).

/// Command tag stored in the top 4 bits of a packed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    Clear = 0,
    SetColor = 1,
    /// Virtual: producers lower this to [`CommandKind::SetColor`] before
    /// encoding.
    SetColorPacked = 2,
    SetStroke = 3,
    Line = 4,
    FillRect = 5,
    StrokeRect = 6,
    FillPoly = 7,
    StrokePoly = 8,
    Triangle = 9,
    Image = 10,
    Print = 11,
    Reset = 12,
}

impl CommandKind {
    /// Maps a 4-bit tag back to its kind. `None` for the unassigned tags
    /// 13..=15.
    pub fn from_tag(tag: u8) -> Option<CommandKind> {
        Some(match tag {
            0 => CommandKind::Clear,
            1 => CommandKind::SetColor,
            2 => CommandKind::SetColorPacked,
            3 => CommandKind::SetStroke,
            4 => CommandKind::Line,
            5 => CommandKind::FillRect,
            6 => CommandKind::StrokeRect,
            7 => CommandKind::FillPoly,
            8 => CommandKind::StrokePoly,
            9 => CommandKind::Triangle,
            10 => CommandKind::Image,
            11 => CommandKind::Print,
            12 => CommandKind::Reset,
            _ => return None,
        })
    }

    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Virtual kinds exist only before lowering; `encode` never emits them
    /// and `decode` rejects them.
    pub const fn is_virtual(self) -> bool {
        matches!(self, CommandKind::SetColorPacked)
    }
}

/// One decoded wire instruction.
///
/// Operands are signed integers in the 10-bit sign-magnitude range (see
/// [`crate::codec`]). Coordinates are display pixels with the origin at the
/// bottom left; rotations are degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    /// Clear the whole surface to an opaque RGB color. Leaves the persisted
    /// draw color and stroke untouched.
    Clear { r: i32, g: i32, b: i32 },
    /// Set the current draw color; the interpreter persists it across drains.
    SetColor { r: i32, g: i32, b: i32, a: i32 },
    /// Set the current stroke width; persisted like the color.
    SetStroke { width: i32 },
    Line { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Filled axis-aligned rectangle with its corner at (x, y).
    FillRect { x: i32, y: i32, width: i32, height: i32 },
    /// Rectangle outline drawn with the current stroke width.
    StrokeRect { x: i32, y: i32, width: i32, height: i32 },
    /// Filled regular polygon centered at (x, y). The interpreter clamps
    /// `sides` to its configured maximum before dispatch.
    FillPoly { x: i32, y: i32, sides: i32, radius: i32, rotation: i32 },
    /// Outlined regular polygon; same clamping as [`DrawCommand::FillPoly`].
    StrokePoly { x: i32, y: i32, sides: i32, radius: i32, rotation: i32 },
    Triangle { x1: i32, y1: i32, x2: i32, y2: i32, x3: i32, y3: i32 },
    /// Draw the icon with id `icon` centered at (x, y), scaled to `size`
    /// wide with the icon's aspect ratio preserved.
    Image { x: i32, y: i32, icon: i32, size: i32, rotation: i32 },
    /// Draw the single glyph for character code `glyph`, anchored at (x, y)
    /// via the font's metrics. Multi-character text is lowered to one print
    /// per glyph before encoding.
    Print { x: i32, y: i32, glyph: i32 },
    /// Marker instruction; interpreting it has no effect.
    Reset,
}

impl DrawCommand {
    pub const fn kind(self) -> CommandKind {
        match self {
            DrawCommand::Clear { .. } => CommandKind::Clear,
            DrawCommand::SetColor { .. } => CommandKind::SetColor,
            DrawCommand::SetStroke { .. } => CommandKind::SetStroke,
            DrawCommand::Line { .. } => CommandKind::Line,
            DrawCommand::FillRect { .. } => CommandKind::FillRect,
            DrawCommand::StrokeRect { .. } => CommandKind::StrokeRect,
            DrawCommand::FillPoly { .. } => CommandKind::FillPoly,
            DrawCommand::StrokePoly { .. } => CommandKind::StrokePoly,
            DrawCommand::Triangle { .. } => CommandKind::Triangle,
            DrawCommand::Image { .. } => CommandKind::Image,
            DrawCommand::Print { .. } => CommandKind::Print,
            DrawCommand::Reset => CommandKind::Reset,
        }
    }

    /// Operand slots in wire order; unused slots are zero.
    pub(crate) fn operands(self) -> [i32; 6] {
        match self {
            DrawCommand::Clear { r, g, b } => [r, g, b, 0, 0, 0],
            DrawCommand::SetColor { r, g, b, a } => [r, g, b, a, 0, 0],
            DrawCommand::SetStroke { width } => [width, 0, 0, 0, 0, 0],
            DrawCommand::Line { x1, y1, x2, y2 } => [x1, y1, x2, y2, 0, 0],
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
            }
            | DrawCommand::StrokeRect {
                x,
                y,
                width,
                height,
            } => [x, y, width, height, 0, 0],
            DrawCommand::FillPoly {
                x,
                y,
                sides,
                radius,
                rotation,
            }
            | DrawCommand::StrokePoly {
                x,
                y,
                sides,
                radius,
                rotation,
            } => [x, y, sides, radius, rotation, 0],
            DrawCommand::Triangle {
                x1,
                y1,
                x2,
                y2,
                x3,
                y3,
            } => [x1, y1, x2, y2, x3, y3],
            DrawCommand::Image {
                x,
                y,
                icon,
                size,
                rotation,
            } => [x, y, icon, size, rotation, 0],
            DrawCommand::Print { x, y, glyph } => [x, y, glyph, 0, 0, 0],
            DrawCommand::Reset => [0; 6],
        }
    }
}
