// Shared builders and assertions.

use iris_annotator::canvas::{BrushSpec, CapStyle, Canvas};
use iris_annotator::types::{BitDepth, PixelBuffer, Point, Rgba};
use std::ops::RangeInclusive;

pub const TRANSPARENT: [u16; 4] = [0, 0, 0, 0];

pub fn blank_canvas(width: usize, height: usize) -> Canvas {
    Canvas::with_image(PixelBuffer::new(width, height, BitDepth::Eight))
}

/// A brush that covers exactly one pixel when dabbed on a pixel centre.
pub fn pixel_brush() -> BrushSpec {
    BrushSpec { color: Rgba::RED, diameter: 1, cap: CapStyle::Round }
}

/// Dab pixel `(i, 0)`, so draw number `i` leaves a mark only in column `i`.
pub fn dab_column(canvas: &mut Canvas, i: usize) {
    let p = Point::new(i as f32 + 0.5, 0.5);
    canvas.draw_segment(p, p, &pixel_brush());
}

/// Columns of row 0 that carry paint.
pub fn painted_columns(buffer: &PixelBuffer) -> Vec<usize> {
    (0..buffer.width()).filter(|&x| buffer.pixel(x, 0) != Some(TRANSPARENT)).collect()
}

#[track_caller]
pub fn assert_untouched_outside(
    buffer: &PixelBuffer,
    xs: RangeInclusive<usize>,
    ys: RangeInclusive<usize>,
) {
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if xs.contains(&x) && ys.contains(&y) {
                continue;
            }
            assert_eq!(buffer.pixel(x, y), Some(TRANSPARENT), "pixel ({x}, {y}) changed");
        }
    }
}
