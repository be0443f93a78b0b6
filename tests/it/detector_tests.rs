// Detection runs handed back to the canvas

use iris_annotator::canvas::BrushSpec;
use iris_annotator::controller::StrokeController;
use iris_annotator::detector::{CommandDetector, Detector};
use iris_annotator::error::DetectorError;
use iris_annotator::input::{Button, InputEvent, Modifiers};
use iris_annotator::types::{BitDepth, PixelBuffer, Point, Rgba};
use iris_annotator::worker::{spawn_processing, WorkerEvent};

/// Stands in for the model: returns a fixed-size opaque image.
struct Fixed;

impl Detector for Fixed {
    fn name(&self) -> &str {
        "fixed"
    }
    fn set_image(&mut self, _: PixelBuffer) {}
    fn process(&mut self, status: &mut dyn FnMut(String)) -> Result<PixelBuffer, DetectorError> {
        status("cropping".into());
        let mut out = PixelBuffer::new(6, 6, BitDepth::Eight);
        out.set_pixel(0, 0, Rgba::WHITE.samples(BitDepth::Eight));
        Ok(out)
    }
}

fn finished_image(events: Vec<WorkerEvent>) -> Option<PixelBuffer> {
    events.into_iter().find_map(|e| match e {
        WorkerEvent::Finished(image) => Some(image),
        _ => None,
    })
}

#[test]
fn result_replaces_the_canvas_and_resets_undo() {
    let mut c = StrokeController::new(BrushSpec::default(), (64, 64));
    c.set_image(PixelBuffer::new(16, 16, BitDepth::Eight));
    let pos = Point::new(30.0, 30.0);
    c.handle(InputEvent::PointerDown { pos, button: Button::Left, modifiers: Modifiers::NONE });
    c.handle(InputEvent::PointerMove { pos: Point::new(34.0, 30.0), modifiers: Modifiers::NONE });
    assert_eq!(c.canvas().history_len(), 1);

    let handle = spawn_processing(Box::new(Fixed), c.canvas().buffer().clone()).unwrap();
    let events: Vec<_> = std::iter::from_fn(|| handle.recv()).collect();
    assert!(events.iter().any(|e| matches!(e, WorkerEvent::Status(s) if s == "cropping")));
    let result = finished_image(events).expect("no result");

    c.set_image(result.clone());
    assert_eq!(c.canvas().buffer(), &result);
    assert!(!c.undo().redraw);
    assert!(handle.join().is_some());
}

#[cfg(unix)]
#[test]
fn external_command_runs_on_the_worker() {
    let mut image = PixelBuffer::new(7, 5, BitDepth::Sixteen);
    image.set_pixel(3, 2, [0x1111, 0x2222, 0x3333, 0xFFFF]);
    let detector = CommandDetector::parse("cp").unwrap();

    let handle = spawn_processing(Box::new(detector), image.clone()).unwrap();
    let events: Vec<_> = std::iter::from_fn(|| handle.recv()).collect();
    assert!(matches!(events.last(), Some(WorkerEvent::Stopped)));
    assert_eq!(finished_image(events), Some(image));
}
