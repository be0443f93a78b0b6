// Canvas state: the image being annotated plus its undo history.
// Strokes are rasterised straight into the pixel buffer; each segment first
// pushes a snapshot so undo can step back one segment at a time.

use crate::history::UndoHistory;
use crate::types::{PixelBuffer, Point, Rgba};

/// Default brush diameter in canvas pixels.
pub const DEFAULT_BRUSH_DIAMETER: u32 = 25;
/// Smallest diameter the size gesture can reach.
pub const MIN_BRUSH_DIAMETER: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapStyle {
    #[default]
    Round,
}

/// Pen used for freehand strokes. `diameter` is in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSpec {
    pub color: Rgba,
    pub diameter: u32,
    pub cap: CapStyle,
}

impl Default for BrushSpec {
    fn default() -> Self {
        Self { color: Rgba::WHITE, diameter: DEFAULT_BRUSH_DIAMETER, cap: CapStyle::Round }
    }
}

impl BrushSpec {
    pub fn new(color: Rgba, diameter: u32) -> Self {
        Self { color, diameter: diameter.max(MIN_BRUSH_DIAMETER), cap: CapStyle::Round }
    }

    pub fn grow(&mut self, step: u32) {
        self.diameter = self.diameter.saturating_add(step);
    }

    /// Shrink, never below [`MIN_BRUSH_DIAMETER`].
    pub fn shrink(&mut self, step: u32) {
        self.diameter = self.diameter.saturating_sub(step).max(MIN_BRUSH_DIAMETER);
    }
}

/// Owns the active pixel buffer and the snapshots used for undo.
#[derive(Debug, Default)]
pub struct Canvas {
    buffer: PixelBuffer,
    history: UndoHistory,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(buffer: PixelBuffer) -> Self {
        Self { buffer, history: UndoHistory::new() }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Replace the image. History from the previous image is dropped.
    pub fn set_image(&mut self, buffer: PixelBuffer) {
        tracing::debug!(width = buffer.width(), height = buffer.height(), "canvas image replaced");
        self.buffer = buffer;
        self.history.clear();
    }

    /// Paint one round-capped segment and record the state it replaced.
    pub fn draw_segment(&mut self, from: Point, to: Point, brush: &BrushSpec) {
        self.history.push(self.buffer.clone());
        stroke_segment(&mut self.buffer, from, to, brush);
    }

    /// Step back one snapshot. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.buffer = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer = PixelBuffer::empty();
        self.history.clear();
    }
}

/// Rasterise a line of width `brush.diameter` with round caps.
/// A pixel is covered when its centre lies within `diameter / 2` of the segment.
fn stroke_segment(buf: &mut PixelBuffer, from: Point, to: Point, brush: &BrushSpec) {
    if buf.is_empty() || !from.is_finite() || !to.is_finite() {
        return;
    }
    let r = brush.diameter as f32 / 2.0;
    let r2 = r * r;

    // Scan just the bounding box, clipped to the buffer
    let x0 = (from.x.min(to.x) - r).floor().max(0.0);
    let y0 = (from.y.min(to.y) - r).floor().max(0.0);
    let x1 = (from.x.max(to.x) + r).ceil().min(buf.width() as f32 - 1.0);
    let y1 = (from.y.max(to.y) + r).ceil().min(buf.height() as f32 - 1.0);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len2 = dx * dx + dy * dy;
    let src = brush.color.samples(buf.depth());
    let max = buf.depth().max_value();

    for y in (y0 as usize)..=(y1 as usize) {
        for x in (x0 as usize)..=(x1 as usize) {
            let cx = x as f32 + 0.5;
            let cy = y as f32 + 0.5;
            let t = if len2 == 0.0 {
                0.0
            } else {
                (((cx - from.x) * dx + (cy - from.y) * dy) / len2).clamp(0.0, 1.0)
            };
            let ex = cx - (from.x + t * dx);
            let ey = cy - (from.y + t * dy);
            if ex * ex + ey * ey > r2 {
                continue;
            }
            if src[3] == max {
                buf.set_pixel(x, y, src);
            } else if let Some(dst) = buf.pixel(x, y) {
                buf.set_pixel(x, y, source_over(src, dst, max));
            }
        }
    }
}

/// Straight-alpha "source over" in integer samples.
fn source_over(src: [u16; 4], dst: [u16; 4], max: u16) -> [u16; 4] {
    let max = max as u32;
    let sa = src[3] as u32;
    let inv = max - sa;
    let da = dst[3] as u32 * inv / max;
    let out_a = sa + da;
    if out_a == 0 {
        return [0; 4];
    }
    let mix = |s: u16, d: u16| ((s as u32 * sa + d as u32 * da) / out_a) as u16;
    [mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2]), out_a as u16]
}
