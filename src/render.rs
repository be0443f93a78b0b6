// Canvas -> screen. Samples the pixel buffer through the view transform
// (nearest neighbour) and composites it over a flat backdrop.

use crate::types::{FrameBuffer, PixelBuffer};
use crate::view::ViewTransform;

/// Backdrop around and behind the image, 0x00RRGGBB.
pub const BACKGROUND: u32 = 0x00_30_30_30;

pub fn render_view(image: &PixelBuffer, view: &ViewTransform, screen: &mut FrameBuffer) {
    screen.pixels.fill(BACKGROUND);
    if image.is_empty() {
        return;
    }
    let origin = view.origin();
    let zoom = view.zoom();

    // Column -> canvas x is the same for every row
    let columns: Vec<Option<usize>> = (0..screen.width)
        .map(|sx| canvas_index((sx as f32 + 0.5 - origin.x) / zoom, image.width()))
        .collect();

    for sy in 0..screen.height {
        let Some(cy) = canvas_index((sy as f32 + 0.5 - origin.y) / zoom, image.height()) else {
            continue;
        };
        let row = &mut screen.pixels[sy * screen.width..(sy + 1) * screen.width];
        for (dst, cx) in row.iter_mut().zip(&columns) {
            if let Some(px) = cx.and_then(|cx| image.pixel_rgba8(cx, cy)) {
                *dst = over_background(px);
            }
        }
    }
}

#[inline]
fn canvas_index(v: f32, len: usize) -> Option<usize> {
    if v >= 0.0 && v < len as f32 { Some(v as usize) } else { None }
}

/// Straight-alpha RGBA over [`BACKGROUND`], packed as 0x00RRGGBB.
#[inline]
fn over_background(px: [u8; 4]) -> u32 {
    let a = px[3] as u32;
    let mix = |c: u8, shift: u32| {
        let bg = (BACKGROUND >> shift) & 0xFF;
        (c as u32 * a + bg * (255 - a)) / 255
    };
    (mix(px[0], 16) << 16) | (mix(px[1], 8) << 8) | mix(px[2], 0)
}
