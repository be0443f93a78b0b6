// Image files in and out.
// Sources go through the `image` crate and land as RGBA8 or RGBA16 depending
// on the source depth. Exports are always lossless TIFF.

use crate::error::CodecError;
use crate::types::{BitDepth, PixelBuffer};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
use std::path::{Path, PathBuf};
use tracing::info;

/// Extension forced onto every export.
pub const EXPORT_EXTENSION: &str = "tiff";

/// Decode `path` into a pixel buffer.
pub fn load(path: &Path) -> Result<PixelBuffer, CodecError> {
    let img = image::open(path)
        .map_err(|source| CodecError::Decode { path: path.to_path_buf(), source })?;
    let buffer = from_dynamic(img)?;
    info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        depth = ?buffer.depth(),
        "image loaded"
    );
    Ok(buffer)
}

/// Keep 16-bit (and float) sources at 16 bits per channel, everything else at 8.
pub fn from_dynamic(img: DynamicImage) -> Result<PixelBuffer, CodecError> {
    let color = img.color();
    let deep = color.bytes_per_pixel() > color.channel_count();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let buffer = if deep {
        let rgba = img.into_rgba16();
        PixelBuffer::from_rgba16(w, h, w * 4, rgba.as_raw())?
    } else {
        let rgba = img.into_rgba8();
        PixelBuffer::from_rgba8(w, h, w * 4, rgba.as_raw())?
    };
    Ok(buffer)
}

pub fn to_dynamic(buffer: &PixelBuffer) -> DynamicImage {
    let (w, h) = (buffer.width() as u32, buffer.height() as u32);
    let px = |x: u32, y: u32| buffer.pixel(x as usize, y as usize).unwrap_or([0; 4]);
    match buffer.depth() {
        BitDepth::Eight => {
            let rgba = ImageBuffer::from_fn(w, h, |x, y| Rgba(px(x, y).map(|c| c as u8)));
            DynamicImage::ImageRgba8(rgba)
        }
        BitDepth::Sixteen => {
            DynamicImage::ImageRgba16(ImageBuffer::from_fn(w, h, |x, y| Rgba(px(x, y))))
        }
    }
}

/// `photo.png` -> `photo.tiff`; paths already ending in `.tiff` are kept.
pub fn export_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == EXPORT_EXTENSION => path.to_path_buf(),
        _ => path.with_extension(EXPORT_EXTENSION),
    }
}

/// Encode the buffer as TIFF. Returns the path actually written.
pub fn export(buffer: &PixelBuffer, path: &Path) -> Result<PathBuf, CodecError> {
    if buffer.is_empty() {
        return Err(CodecError::EmptyCanvas);
    }
    let path = export_path(path);
    to_dynamic(buffer)
        .save_with_format(&path, ImageFormat::Tiff)
        .map_err(|source| CodecError::Encode { path: path.clone(), source })?;
    info!(path = %path.display(), "image exported");
    Ok(path)
}
