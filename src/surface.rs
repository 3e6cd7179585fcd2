//! Host-facing drawing targets.
//!
//! The effects never touch a concrete canvas. They draw through [`Surface`]
//! (a 2D raster layer) or push a transform to a [`Marker`] (a positioned
//! element such as the cursor sprite). The host implements these against
//! its own primitives; [`RecordingSurface`] and [`RecordingMarker`] keep
//! everything in memory for tests and headless use.

use alloc::vec::Vec as AllocVec;

use crate::color::Color;
use crate::cursor::MarkerTransform;
use crate::vec::Vec2;

/// Style of one draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    /// Global alpha in `[0, 1]`.
    pub alpha: f32,
    /// Stroke width. Ignored by fills.
    pub line_width: f32,
    /// Glow (shadow blur) radius. Zero disables the glow.
    pub glow: f32,
}

impl Paint {
    /// Fill style. `alpha` is clamped to `[0, 1]`.
    pub fn fill(color: Color, alpha: f32) -> Self {
        Paint { color, alpha: alpha.clamp(0.0, 1.0), line_width: 0.0, glow: 0.0 }
    }

    /// Stroke style. `alpha` is clamped to `[0, 1]`.
    pub fn stroke(color: Color, alpha: f32, line_width: f32) -> Self {
        Paint { color, alpha: alpha.clamp(0.0, 1.0), line_width, glow: 0.0 }
    }

    pub fn with_glow(mut self, glow: f32) -> Self {
        self.glow = glow;
        self
    }
}

/// Anything an effect owns on the page: it can be re-stacked and removed.
pub trait Layer {
    /// Remove the layer from the page. Called once on teardown.
    fn detach(&mut self);

    /// Update the stacking order.
    fn set_z_index(&mut self, _z_index: i32) {}
}

/// A 2D raster layer whose pixel size tracks the viewport.
pub trait Surface: Layer {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Match new viewport dimensions.
    fn resize(&mut self, width: f32, height: f32);
    /// Clear the whole layer.
    fn clear(&mut self);
    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint);
    fn stroke_circle(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint);
    fn draw_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, paint: &Paint);
}

/// A positioned element driven by a composed transform.
pub trait Marker: Layer {
    fn apply(&mut self, transform: &MarkerTransform);
}

// --------------------------------------------------------------------------
// In-memory targets
// --------------------------------------------------------------------------

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Disc { center: Vec2<f32>, radius: f32, paint: Paint },
    Circle { center: Vec2<f32>, radius: f32, paint: Paint },
    Line { from: Vec2<f32>, to: Vec2<f32>, paint: Paint },
}

/// Surface that records the draw calls since the last clear.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: AllocVec<DrawCommand>,
    clears: usize,
    z_index: i32,
    detached: bool,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        RecordingSurface { width, height, ..Default::default() }
    }

    /// Draw calls of the current frame, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many times the surface was cleared, i.e. frames rendered.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Layer for RecordingSurface {
    fn detach(&mut self) {
        self.detached = true;
        self.commands.clear();
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 { self.width }
    fn height(&self) -> f32 { self.height }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Disc { center, radius, paint: *paint });
    }

    fn stroke_circle(&mut self, center: Vec2<f32>, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle { center, radius, paint: *paint });
    }

    fn draw_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, paint: &Paint) {
        self.commands.push(DrawCommand::Line { from, to, paint: *paint });
    }
}

/// Marker that keeps the latest transform and counts the rest.
#[derive(Clone, Debug, Default)]
pub struct RecordingMarker {
    last: Option<MarkerTransform>,
    applied: usize,
    z_index: i32,
    detached: bool,
}

impl RecordingMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&MarkerTransform> {
        self.last.as_ref()
    }

    /// How many transforms were applied, i.e. frames rendered.
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

impl Layer for RecordingMarker {
    fn detach(&mut self) {
        self.detached = true;
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }
}

impl Marker for RecordingMarker {
    fn apply(&mut self, transform: &MarkerTransform) {
        self.last = Some(*transform);
        self.applied += 1;
    }
}
