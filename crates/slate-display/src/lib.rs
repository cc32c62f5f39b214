//! Remote display device model for slate.
//!
//! A [`Display`] owns a FIFO backlog of encoded words, the persistent draw
//! state (color, stroke) and a lazily created square surface. Producers push
//! words or operations in; a host-driven [`Display::drain`] decodes and
//! replays the backlog against a [`RasterBackend`], resolving icons and
//! glyphs through an [`Atlas`].
//!
//! Rasterization itself stays on the host side of the [`RasterBackend`]
//! seam. This crate ships a discarding [`NullRasterBackend`] and an
//! op-recording [`RecordingBackend`] for tests and headless use.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod backend;
pub mod config;
pub mod display;
pub mod queue;
pub mod text;

pub use atlas::{Atlas, EmptyAtlas, FontMetrics, Glyph, SpriteRegion, TableAtlas};
pub use backend::{
    NullRasterBackend, RasterBackend, RasterOp, RecordingBackend, SurfaceError, SurfaceId,
};
pub use config::{DisplayConfig, DEFAULT_BACKGROUND};
pub use display::{Display, DrainStats};
pub use queue::{BacklogPolicy, CommandQueue, PushOutcome};
pub use text::{layout_text, TextAlign};
