// TIFF export and reload

use crate::helpers::blank_canvas;
use iris_annotator::canvas::BrushSpec;
use iris_annotator::codec;
use iris_annotator::error::CodecError;
use iris_annotator::types::{BitDepth, PixelBuffer, Point, Rgba};

#[test]
fn annotated_image_survives_export_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = blank_canvas(32, 24);
    let brush = BrushSpec::new(Rgba::RED, 6);
    canvas.draw_segment(Point::new(4.0, 4.0), Point::new(28.0, 20.0), &brush);

    let written = codec::export(canvas.buffer(), &dir.path().join("marked.png")).unwrap();
    assert_eq!(written, dir.path().join("marked.tiff"));

    let reloaded = codec::load(&written).unwrap();
    assert_eq!(&reloaded, canvas.buffer());
}

#[test]
fn sixteen_bit_images_stay_sixteen_bit() {
    let dir = tempfile::tempdir().unwrap();
    let mut image = PixelBuffer::new(5, 3, BitDepth::Sixteen);
    image.set_pixel(2, 1, [0x0102, 0xA0B0, 0xFFFF, 0xFFFF]);

    let written = codec::export(&image, &dir.path().join("deep.tiff")).unwrap();
    let reloaded = codec::load(&written).unwrap();
    assert_eq!(reloaded.depth(), BitDepth::Sixteen);
    assert_eq!(reloaded, image);
}

#[test]
fn garbage_file_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image at all").unwrap();

    let err = codec::load(&path).unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
    assert!(err.to_string().contains("broken.png"));
}

#[test]
fn unwritable_destination_is_an_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let image = PixelBuffer::new(2, 2, BitDepth::Eight);
    let err = codec::export(&image, &dir.path().join("missing-dir").join("out.tiff")).unwrap_err();
    assert!(matches!(err, CodecError::Encode { .. }));
}
