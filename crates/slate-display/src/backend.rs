//! Boundary between the display interpreter and the host's 2D renderer.

use thiserror::Error;

use slate_proto::PackedColor;

use crate::atlas::SpriteRegion;

/// Backend-issued identifier for an allocated surface.
pub type SurfaceId = u32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The backend could not allocate a render target of the requested size.
    /// Fatal to the owning display only: its queue and draw state survive,
    /// and a later drain retries the allocation.
    #[error("failed to allocate {side}x{side} surface: {reason}")]
    Allocation { side: u32, reason: String },
}

/// 2D primitive renderer a display dispatches into.
///
/// Implementations own the textures and the rasterization math. The display
/// drives them with a strict call shape:
/// - `create_surface`/`destroy_surface` bracket a surface's lifetime.
/// - Each drawing pass is `begin_target .. end_target`. Inside a pass the
///   projection covers (0, 0)..(side, side) in display pixels, origin at the
///   bottom left; `end_target` restores whatever target and projection were
///   active before.
/// - Primitive calls apply the most recent `set_color`/`set_stroke`.
/// - `reset_style` returns ambient draw style to backend defaults after a
///   pass; the display re-applies its persisted state at the start of the
///   next one.
pub trait RasterBackend {
    fn create_surface(&mut self, side: u32) -> Result<SurfaceId, SurfaceError>;

    /// Must tolerate ids that were already destroyed.
    fn destroy_surface(&mut self, surface: SurfaceId);

    fn begin_target(&mut self, surface: SurfaceId, side: u32);
    fn end_target(&mut self, surface: SurfaceId);

    /// Clear the bound target to `color`, ignoring the current draw color.
    fn clear(&mut self, color: PackedColor);
    fn set_color(&mut self, color: PackedColor);
    fn set_stroke(&mut self, width: f32);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Filled axis-aligned rectangle, corner at (x, y).
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Rectangle outline drawn with the current stroke width.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Filled regular polygon centered at (x, y); rotation in degrees.
    fn fill_poly(&mut self, x: f32, y: f32, sides: u32, radius: f32, rotation: f32);
    fn stroke_poly(&mut self, x: f32, y: f32, sides: u32, radius: f32, rotation: f32);
    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32);
    /// Textured quad centered at (x, y); rotation in degrees.
    fn sprite(
        &mut self,
        region: &SpriteRegion,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
    );

    fn reset_style(&mut self);
}

/// Backend that accepts every call and renders nothing.
#[derive(Debug, Default)]
pub struct NullRasterBackend {
    next_surface: SurfaceId,
}

impl NullRasterBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RasterBackend for NullRasterBackend {
    fn create_surface(&mut self, _side: u32) -> Result<SurfaceId, SurfaceError> {
        let id = self.next_surface;
        self.next_surface += 1;
        Ok(id)
    }

    fn destroy_surface(&mut self, _surface: SurfaceId) {}

    fn begin_target(&mut self, _surface: SurfaceId, _side: u32) {}

    fn end_target(&mut self, _surface: SurfaceId) {}

    fn clear(&mut self, _color: PackedColor) {}

    fn set_color(&mut self, _color: PackedColor) {}

    fn set_stroke(&mut self, _width: f32) {}

    fn line(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}

    fn stroke_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}

    fn fill_poly(&mut self, _x: f32, _y: f32, _sides: u32, _radius: f32, _rotation: f32) {}

    fn stroke_poly(&mut self, _x: f32, _y: f32, _sides: u32, _radius: f32, _rotation: f32) {}

    fn triangle(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x3: f32, _y3: f32) {}

    fn sprite(
        &mut self,
        _region: &SpriteRegion,
        _x: f32,
        _y: f32,
        _width: f32,
        _height: f32,
        _rotation: f32,
    ) {
    }

    fn reset_style(&mut self) {}
}

/// Every backend call a [`RecordingBackend`] observes, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterOp {
    CreateSurface { surface: SurfaceId, side: u32 },
    DestroySurface { surface: SurfaceId },
    BeginTarget { surface: SurfaceId, side: u32 },
    EndTarget { surface: SurfaceId },
    Clear { color: PackedColor },
    SetColor { color: PackedColor },
    SetStroke { width: f32 },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    StrokeRect { x: f32, y: f32, width: f32, height: f32 },
    FillPoly { x: f32, y: f32, sides: u32, radius: f32, rotation: f32 },
    StrokePoly { x: f32, y: f32, sides: u32, radius: f32, rotation: f32 },
    Triangle { x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32 },
    Sprite { page: u32, x: f32, y: f32, width: f32, height: f32, rotation: f32 },
    ResetStyle,
}

/// Backend that records every call for later inspection.
///
/// The test workhorse: scenario tests assert on the exact op sequence.
/// Surface allocation can be made to fail to exercise lifecycle error paths.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub ops: Vec<RasterOp>,
    next_surface: SurfaceId,
    fail_allocation: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent allocation fail with `reason`, until
    /// [`RecordingBackend::allow_allocations`].
    pub fn fail_allocations(&mut self, reason: &str) {
        self.fail_allocation = Some(reason.to_owned());
    }

    pub fn allow_allocations(&mut self) {
        self.fail_allocation = None;
    }

    /// Takes the recorded ops, leaving the log empty for the next phase.
    pub fn take_ops(&mut self) -> Vec<RasterOp> {
        std::mem::take(&mut self.ops)
    }
}

impl RasterBackend for RecordingBackend {
    fn create_surface(&mut self, side: u32) -> Result<SurfaceId, SurfaceError> {
        if let Some(reason) = &self.fail_allocation {
            return Err(SurfaceError::Allocation {
                side,
                reason: reason.clone(),
            });
        }
        let surface = self.next_surface;
        self.next_surface += 1;
        self.ops.push(RasterOp::CreateSurface { surface, side });
        Ok(surface)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.ops.push(RasterOp::DestroySurface { surface });
    }

    fn begin_target(&mut self, surface: SurfaceId, side: u32) {
        self.ops.push(RasterOp::BeginTarget { surface, side });
    }

    fn end_target(&mut self, surface: SurfaceId) {
        self.ops.push(RasterOp::EndTarget { surface });
    }

    fn clear(&mut self, color: PackedColor) {
        self.ops.push(RasterOp::Clear { color });
    }

    fn set_color(&mut self, color: PackedColor) {
        self.ops.push(RasterOp::SetColor { color });
    }

    fn set_stroke(&mut self, width: f32) {
        self.ops.push(RasterOp::SetStroke { width });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(RasterOp::Line { x1, y1, x2, y2 });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(RasterOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(RasterOp::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_poly(&mut self, x: f32, y: f32, sides: u32, radius: f32, rotation: f32) {
        self.ops.push(RasterOp::FillPoly {
            x,
            y,
            sides,
            radius,
            rotation,
        });
    }

    fn stroke_poly(&mut self, x: f32, y: f32, sides: u32, radius: f32, rotation: f32) {
        self.ops.push(RasterOp::StrokePoly {
            x,
            y,
            sides,
            radius,
            rotation,
        });
    }

    fn triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.ops.push(RasterOp::Triangle {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
        });
    }

    fn sprite(
        &mut self,
        region: &SpriteRegion,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
    ) {
        self.ops.push(RasterOp::Sprite {
            page: region.page,
            x,
            y,
            width,
            height,
            rotation,
        });
    }

    fn reset_style(&mut self) {
        self.ops.push(RasterOp::ResetStyle);
    }
}
