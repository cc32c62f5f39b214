//! The display device: queue, interpreter state and surface lifecycle.

use tracing::debug;

use slate_proto::{decode, encode, DrawCommand, DrawOp, EncodeError, PackedColor, PackedWord};

use crate::atlas::Atlas;
use crate::backend::{RasterBackend, SurfaceError, SurfaceId};
use crate::config::DisplayConfig;
use crate::queue::{CommandQueue, PushOutcome};

/// Counters for one drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainStats {
    /// Commands decoded and dispatched (marker no-ops included).
    pub executed: u32,
    /// Words skipped because their tag does not decode.
    pub skipped: u32,
    /// Image/print draws dropped because the atlas had no entry.
    pub missing: u32,
}

/// One remote display: a command queue, persistent draw state and a lazily
/// created square surface.
///
/// All state is per instance; two displays share nothing. The display never
/// rasterizes or owns textures itself. It drives a [`RasterBackend`] and
/// resolves icons and glyphs through an [`Atlas`], both supplied per call so
/// the host keeps ownership of its renderer.
///
/// Producer and consumer sides are plain `&mut` methods: the display assumes
/// sequential, non-overlapping access, and hosts that split production and
/// draining across threads must serialize at this boundary.
#[derive(Debug)]
pub struct Display {
    config: DisplayConfig,
    queue: CommandQueue,
    surface: Option<SurfaceId>,
    color: PackedColor,
    stroke: f32,
}

impl Display {
    pub fn new(mut config: DisplayConfig) -> Self {
        let queue = CommandQueue::new(config.backlog);
        // config() reports the queue's effective policy after cap
        // normalization.
        config.backlog = queue.policy();
        Self {
            config,
            queue,
            surface: None,
            color: PackedColor::WHITE,
            stroke: 1.0,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Words queued for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Words lost to the backlog policy since creation.
    pub fn dropped(&self) -> u64 {
        self.queue.dropped()
    }

    /// Current surface handle, if created and not disposed. Hosts sample
    /// this to composite the display into a larger scene.
    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    /// Persisted draw color; survives across drains.
    pub fn color(&self) -> PackedColor {
        self.color
    }

    /// Persisted stroke width; survives across drains.
    pub fn stroke(&self) -> f32 {
        self.stroke
    }

    /// Enqueues an already-encoded word.
    pub fn push_word(&mut self, word: PackedWord) -> PushOutcome {
        self.queue.push(word)
    }

    /// Lowers, encodes and enqueues one operation. Out-of-range operands are
    /// rejected here and never reach the queue.
    pub fn push_op(&mut self, op: DrawOp) -> Result<PushOutcome, EncodeError> {
        let word = encode(&op.lower())?;
        Ok(self.queue.push(word))
    }

    /// Creates the surface if absent: one allocation, then exactly one clear
    /// to the configured background, inside its own target scope. Idempotent;
    /// an existing surface is returned without any backend call.
    pub fn ensure_surface(
        &mut self,
        backend: &mut dyn RasterBackend,
    ) -> Result<SurfaceId, SurfaceError> {
        if let Some(surface) = self.surface {
            return Ok(surface);
        }
        let side = self.config.side;
        let surface = backend.create_surface(side)?;
        backend.begin_target(surface, side);
        backend.clear(self.config.background);
        backend.end_target(surface);
        self.surface = Some(surface);
        debug!(surface, side, "created display surface");
        Ok(surface)
    }

    /// Destroys the surface if present; a later drain or
    /// [`Display::ensure_surface`] call re-creates it. Idempotent. Queued
    /// words and persisted draw state are unaffected.
    pub fn dispose(&mut self, backend: &mut dyn RasterBackend) {
        if let Some(surface) = self.surface.take() {
            backend.destroy_surface(surface);
            debug!(surface, "disposed display surface");
        }
    }

    /// Interprets every queued word, oldest first, until the queue is empty.
    ///
    /// An empty queue does nothing at all: no surface work, no allocation,
    /// no backend calls. Otherwise the surface is acquired (created on first
    /// use), the persisted color and stroke are re-applied, and each word is
    /// popped, decoded and dispatched. Undecodable words are skipped
    /// individually; the rest of the backlog still runs. After the loop the
    /// previous render target is restored and ambient draw style is reset.
    pub fn drain(
        &mut self,
        backend: &mut dyn RasterBackend,
        atlas: &dyn Atlas,
    ) -> Result<DrainStats, SurfaceError> {
        let mut stats = DrainStats::default();
        if self.queue.is_empty() {
            return Ok(stats);
        }

        // Acquire before popping, so an allocation failure leaves the whole
        // backlog queued for a retry.
        let surface = self.ensure_surface(backend)?;

        backend.begin_target(surface, self.config.side);
        backend.set_color(self.color);
        backend.set_stroke(self.stroke);

        while let Some(word) = self.queue.pop_front() {
            match decode(word) {
                Ok(cmd) => {
                    self.dispatch(cmd, backend, atlas, &mut stats);
                    stats.executed += 1;
                }
                Err(err) => {
                    debug!(word, %err, "skipping undecodable word");
                    stats.skipped += 1;
                }
            }
        }

        backend.end_target(surface);
        backend.reset_style();
        Ok(stats)
    }

    fn dispatch(
        &mut self,
        cmd: DrawCommand,
        backend: &mut dyn RasterBackend,
        atlas: &dyn Atlas,
        stats: &mut DrainStats,
    ) {
        match cmd {
            DrawCommand::Clear { r, g, b } => {
                // Clear carries no alpha operand and always fills opaque.
                // Persisted color and stroke stay untouched.
                backend.clear(PackedColor::from_operands(r, g, b, 255));
            }
            DrawCommand::SetColor { r, g, b, a } => {
                self.color = PackedColor::from_operands(r, g, b, a);
                backend.set_color(self.color);
            }
            DrawCommand::SetStroke { width } => {
                self.stroke = width as f32;
                backend.set_stroke(self.stroke);
            }
            DrawCommand::Line { x1, y1, x2, y2 } => {
                backend.line(x1 as f32, y1 as f32, x2 as f32, y2 as f32);
            }
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
            } => {
                backend.fill_rect(x as f32, y as f32, width as f32, height as f32);
            }
            DrawCommand::StrokeRect {
                x,
                y,
                width,
                height,
            } => {
                backend.stroke_rect(x as f32, y as f32, width as f32, height as f32);
            }
            DrawCommand::FillPoly {
                x,
                y,
                sides,
                radius,
                rotation,
            } => {
                backend.fill_poly(
                    x as f32,
                    y as f32,
                    self.clamp_sides(sides),
                    radius as f32,
                    rotation as f32,
                );
            }
            DrawCommand::StrokePoly {
                x,
                y,
                sides,
                radius,
                rotation,
            } => {
                backend.stroke_poly(
                    x as f32,
                    y as f32,
                    self.clamp_sides(sides),
                    radius as f32,
                    rotation as f32,
                );
            }
            DrawCommand::Triangle {
                x1,
                y1,
                x2,
                y2,
                x3,
                y3,
            } => {
                backend.triangle(
                    x1 as f32,
                    y1 as f32,
                    x2 as f32,
                    y2 as f32,
                    x3 as f32,
                    y3 as f32,
                );
            }
            DrawCommand::Image {
                x,
                y,
                icon,
                size,
                rotation,
            } => {
                let Some(region) = atlas.icon(icon) else {
                    debug!(icon, "no icon for image command");
                    stats.missing += 1;
                    return;
                };
                let width = size as f32;
                backend.sprite(
                    &region,
                    x as f32,
                    y as f32,
                    width,
                    width / region.ratio(),
                    rotation as f32,
                );
            }
            DrawCommand::Print { x, y, glyph: code } => {
                let Some(glyph) = atlas.glyph(code) else {
                    debug!(code, "no glyph for print command");
                    stats.missing += 1;
                    return;
                };
                let metrics = atlas.metrics();
                let (w, h) = (glyph.region.width, glyph.region.height);
                backend.sprite(
                    &glyph.region,
                    x as f32 + w / 2.0 + glyph.xoffset,
                    y as f32 + h / 2.0 + glyph.yoffset + metrics.cap_height + metrics.ascent,
                    w,
                    h,
                    0.0,
                );
            }
            DrawCommand::Reset => {
                // Marker instruction; no effect by contract.
            }
        }
    }

    fn clamp_sides(&self, sides: i32) -> u32 {
        sides.clamp(0, self.config.max_poly_sides.max(0)) as u32
    }
}
