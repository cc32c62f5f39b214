//! Display configuration.

use slate_proto::PackedColor;

use crate::queue::BacklogPolicy;

/// Background a fresh surface is cleared to: a dark, slightly blue gray.
pub const DEFAULT_BACKGROUND: PackedColor = PackedColor::from_rgba8888(0x45454c_ff);

/// Static configuration for one display instance.
///
/// `side` is fixed for the life of a surface; changing it takes effect only
/// through dispose-and-recreate.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Side length of the square surface, in pixels.
    pub side: u32,
    /// Upper bound applied to polygon vertex counts before dispatch.
    pub max_poly_sides: i32,
    /// Color of the single clear performed when the surface is created.
    pub background: PackedColor,
    /// Queue admission policy.
    pub backlog: BacklogPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            side: 64,
            max_poly_sides: 25,
            background: DEFAULT_BACKGROUND,
            backlog: BacklogPolicy::Unbounded,
        }
    }
}
