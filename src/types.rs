// Core types shared by the canvas, the controller and the window host.

use crate::error::BufferError;
use std::str::FromStr;

/// Screen-side buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // window width in device pixels
    pub height: usize,     // window height in device pixels
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A position in either device or canvas space, depending on who holds it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bits per channel of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    #[default]
    Eight,
    Sixteen,
}

impl BitDepth {
    pub fn max_value(self) -> u16 {
        match self {
            BitDepth::Eight => u8::MAX as u16,
            BitDepth::Sixteen => u16::MAX,
        }
    }
}

/// 8-bit straight-alpha color used for brushes and the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::opaque(0xFF, 0xFF, 0xFF);
    pub const RED: Rgba = Rgba::opaque(0xFF, 0x00, 0x00);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Channel samples at the given depth (16-bit widens by ×257 so 0xFF maps to 0xFFFF).
    pub fn samples(self, depth: BitDepth) -> [u16; 4] {
        let widen = |c: u8| match depth {
            BitDepth::Eight => c as u16,
            BitDepth::Sixteen => c as u16 * 257,
        };
        [widen(self.r), widen(self.g), widen(self.b), widen(self.a)]
    }
}

impl FromStr for Rgba {
    type Err = String;

    /// Accepts `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(format!("expected RRGGBB or RRGGBBAA, got {s:?}"));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad color {s:?}: {e}"))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 0xFF };
        Ok(Rgba { r: byte(0)?, g: byte(2)?, b: byte(4)?, a })
    }
}

/// Channel storage at the buffer's native depth.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Samples {
    Eight(Vec<u8>),
    Sixteen(Vec<u16>),
}

impl Default for Samples {
    fn default() -> Self {
        Samples::Eight(Vec::new())
    }
}

/// The image being annotated: `width * height` RGBA pixels, channels interleaved.
///
/// 8-bit images keep one byte per channel so undo snapshots stay small.
/// Pixel accessors speak `u16` for both depths; 8-bit values never exceed 255.
/// Cloning is a deep copy, which is what undo snapshots rely on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    samples: Samples,
}

impl PixelBuffer {
    /// A fully transparent black buffer.
    pub fn new(width: usize, height: usize, depth: BitDepth) -> Self {
        let len = width * height * 4;
        let samples = match depth {
            BitDepth::Eight => Samples::Eight(vec![0; len]),
            BitDepth::Sixteen => Samples::Sixteen(vec![0; len]),
        };
        Self { width, height, samples }
    }

    /// The 0×0 canvas.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy rows of RGBA8 bytes out of a strided source. `stride` is in bytes.
    pub fn from_rgba8(
        width: usize,
        height: usize,
        stride: usize,
        data: &[u8],
    ) -> Result<Self, BufferError> {
        let samples = pack_rows(width, height, stride, data)?;
        Ok(Self { width, height, samples: Samples::Eight(samples) })
    }

    /// Copy rows of RGBA16 samples out of a strided source. `stride` is in samples.
    pub fn from_rgba16(
        width: usize,
        height: usize,
        stride: usize,
        data: &[u16],
    ) -> Result<Self, BufferError> {
        let samples = pack_rows(width, height, stride, data)?;
        Ok(Self { width, height, samples: Samples::Sixteen(samples) })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> BitDepth {
        match self.samples {
            Samples::Eight(_) => BitDepth::Eight,
            Samples::Sixteen(_) => BitDepth::Sixteen,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Packed RGBA8 bytes, row-major. `None` for 16-bit buffers.
    pub fn as_rgba8(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::Eight(v) => Some(v.as_slice()),
            Samples::Sixteen(_) => None,
        }
    }

    /// Packed RGBA16 samples, row-major. `None` for 8-bit buffers.
    pub fn as_rgba16(&self) -> Option<&[u16]> {
        match &self.samples {
            Samples::Sixteen(v) => Some(v.as_slice()),
            Samples::Eight(_) => None,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u16; 4]> {
        let i = self.offset(x, y)?;
        Some(match &self.samples {
            Samples::Eight(v) => [v[i], v[i + 1], v[i + 2], v[i + 3]].map(u16::from),
            Samples::Sixteen(v) => [v[i], v[i + 1], v[i + 2], v[i + 3]],
        })
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u16; 4]) {
        let Some(i) = self.offset(x, y) else { return };
        match &mut self.samples {
            Samples::Eight(v) => v[i..i + 4].copy_from_slice(&px.map(|c| c.min(255) as u8)),
            Samples::Sixteen(v) => v[i..i + 4].copy_from_slice(&px),
        }
    }

    /// Pixel reduced to 8 bits per channel, for display.
    pub fn pixel_rgba8(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some(match &self.samples {
            Samples::Eight(v) => [v[i], v[i + 1], v[i + 2], v[i + 3]],
            Samples::Sixteen(v) => [v[i], v[i + 1], v[i + 2], v[i + 3]].map(|c| (c >> 8) as u8),
        })
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 4)
    }
}

/// Drop row padding from a strided source.
fn pack_rows<T: Copy>(
    width: usize,
    height: usize,
    stride: usize,
    data: &[T],
) -> Result<Vec<T>, BufferError> {
    check_layout(width, height, stride, data.len())?;
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }
    let mut samples = Vec::with_capacity(width * height * 4);
    for row in data.chunks(stride).take(height) {
        samples.extend_from_slice(&row[..width * 4]);
    }
    Ok(samples)
}

fn check_layout(
    width: usize,
    height: usize,
    stride: usize,
    len: usize,
) -> Result<(), BufferError> {
    let row = width * 4;
    if height > 0 && stride < row {
        return Err(BufferError::StrideTooSmall { stride, row });
    }
    let needed = if height == 0 { 0 } else { stride * (height - 1) + row };
    if len < needed {
        return Err(BufferError::TooShort { needed, got: len });
    }
    Ok(())
}
