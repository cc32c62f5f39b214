//! Packed RGBA colors.

/// An RGBA color packed as `0xRRGGBBAA`.
///
/// This is the representation the interpreter persists as its current draw
/// color and the payload of the virtual packed-color instruction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedColor(u32);

impl PackedColor {
    /// Opaque white, the initial draw color of a fresh display.
    pub const WHITE: PackedColor = PackedColor(0xffff_ffff);

    pub const fn from_rgba8888(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn from_channels(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Builds a color from instruction operands, saturating each channel into
    /// `0..=255`.
    pub fn from_operands(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self::from_channels(
            saturate_channel(r),
            saturate_channel(g),
            saturate_channel(b),
            saturate_channel(a),
        )
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Channels as `[r, g, b, a]` in `[0, 1]`, for backends that consume
    /// normalized colors.
    pub fn to_f32_rgba(self) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            self.a() as f32 / 255.0,
        ]
    }

    /// The four channel operands a color-set instruction carries for this
    /// color. Always in range: one byte per channel.
    pub const fn channel_operands(self) -> [i32; 4] {
        [
            self.r() as i32,
            self.g() as i32,
            self.b() as i32,
            self.a() as i32,
        ]
    }
}

fn saturate_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
