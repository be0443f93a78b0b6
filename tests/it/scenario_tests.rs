// End-to-end drawing through the controller

use crate::helpers::{assert_untouched_outside, blank_canvas, TRANSPARENT};
use iris_annotator::canvas::{BrushSpec, MIN_BRUSH_DIAMETER};
use iris_annotator::controller::{Gesture, StrokeController};
use iris_annotator::input::{Button, InputEvent, Modifiers, PointerSnapshot, PointerTracker};
use iris_annotator::types::{BitDepth, PixelBuffer, Point, Rgba};
use iris_annotator::view::ViewTransform;

const RED: [u16; 4] = [255, 0, 0, 255];

fn controller_on_blank(size: usize) -> StrokeController {
    let mut c = StrokeController::new(BrushSpec::new(Rgba::RED, 10), (size, size));
    c.set_image(PixelBuffer::new(size, size, BitDepth::Eight));
    c
}

fn press(c: &mut StrokeController, x: f32, y: f32, button: Button, modifiers: Modifiers) {
    c.handle(InputEvent::PointerDown { pos: Point::new(x, y), button, modifiers });
}

fn drag(c: &mut StrokeController, x: f32, y: f32) {
    c.handle(InputEvent::PointerMove { pos: Point::new(x, y), modifiers: Modifiers::NONE });
}

fn release(c: &mut StrokeController, button: Button) {
    c.handle(InputEvent::PointerUp { pos: Point::default(), button });
}

#[test]
fn red_band_on_blank_canvas_and_undo() {
    let mut canvas = blank_canvas(100, 100);
    let brush = BrushSpec::new(Rgba::RED, 10);
    canvas.draw_segment(Point::new(10.0, 10.0), Point::new(90.0, 10.0), &brush);

    let buf = canvas.buffer();
    for x in 10..=90 {
        for y in 6..=14 {
            assert_eq!(buf.pixel(x, y), Some(RED), "({x}, {y})");
        }
    }
    assert_untouched_outside(buf, 5..=94, 5..=14);

    assert!(canvas.undo());
    assert_eq!(canvas.buffer(), &PixelBuffer::new(100, 100, BitDepth::Eight));
}

#[test]
fn same_band_drawn_with_the_pointer() {
    let mut c = controller_on_blank(100);
    press(&mut c, 10.0, 10.0, Button::Left, Modifiers::NONE);
    drag(&mut c, 50.0, 10.0);
    drag(&mut c, 90.0, 10.0);
    release(&mut c, Button::Left);

    let buf = c.canvas().buffer();
    assert_eq!(buf.pixel(10, 10), Some(RED));
    assert_eq!(buf.pixel(90, 10), Some(RED));
    assert_untouched_outside(buf, 5..=94, 5..=14);

    // one undo per move event
    c.undo();
    assert_eq!(c.canvas().buffer().pixel(80, 10), Some(TRANSPARENT));
    assert_eq!(c.canvas().buffer().pixel(20, 10), Some(RED));
    c.undo();
    assert_eq!(c.canvas().buffer(), &PixelBuffer::new(100, 100, BitDepth::Eight));
}

#[test]
fn drawing_maps_through_zoom_and_scroll() {
    let mut c = controller_on_blank(100);
    c.handle(InputEvent::Wheel { delta_y: 1.0 });
    assert_eq!(c.view().zoom(), 1.25);

    // device (50, 50) is the fixed centre: canvas (50, 50)
    press(&mut c, 50.0, 50.0, Button::Left, Modifiers::NONE);
    assert_eq!(c.gesture(), Gesture::Drawing { last: Point::new(50.0, 50.0) });
    drag(&mut c, 50.0, 50.0);
    assert_eq!(c.canvas().buffer().pixel(50, 50), Some(RED));
}

#[test]
fn one_zoom_in_and_one_zoom_out_is_exactly_neutral() {
    let mut view = ViewTransform::new(800, 600);
    view.zoom_in();
    view.zoom_out();
    assert_eq!(view.zoom(), 1.0);

    // several steps are not reversible in general, but paired steps are
    let mut c = controller_on_blank(10);
    for _ in 0..3 {
        c.handle(InputEvent::Wheel { delta_y: 1.0 });
        c.handle(InputEvent::Wheel { delta_y: -1.0 });
    }
    assert_eq!(c.view().zoom(), 1.0);
}

#[test]
fn repeated_shrink_gestures_stop_at_the_floor() {
    let mut c = controller_on_blank(100);
    for _ in 0..10 {
        press(&mut c, 60.0, 50.0, Button::Left, Modifiers::CTRL);
        drag(&mut c, 20.0, 50.0);
        release(&mut c, Button::Left);
        assert!(c.brush().diameter >= MIN_BRUSH_DIAMETER);
    }
    assert_eq!(c.brush().diameter, MIN_BRUSH_DIAMETER);
}

#[test]
fn loading_a_new_image_makes_undo_a_no_op() {
    let mut c = controller_on_blank(20);
    press(&mut c, 2.0, 2.0, Button::Left, Modifiers::NONE);
    drag(&mut c, 8.0, 8.0);
    release(&mut c, Button::Left);
    assert_eq!(c.canvas().history_len(), 1);

    let mut fresh = PixelBuffer::new(20, 20, BitDepth::Eight);
    fresh.set_pixel(0, 0, [1, 2, 3, 4]);
    c.set_image(fresh.clone());
    assert!(!c.undo().redraw);
    assert_eq!(c.canvas().buffer(), &fresh);
}

#[test]
fn clear_leaves_an_empty_canvas() {
    let mut c = controller_on_blank(20);
    press(&mut c, 2.0, 2.0, Button::Left, Modifiers::NONE);
    drag(&mut c, 8.0, 8.0);
    c.clear();
    assert!(c.canvas().buffer().is_empty());
    assert_eq!(c.gesture(), Gesture::Idle);
    // drawing on nothing is harmless
    press(&mut c, 2.0, 2.0, Button::Left, Modifiers::NONE);
    drag(&mut c, 8.0, 8.0);
    assert!(c.canvas().buffer().is_empty());
}

#[test]
fn a_click_without_a_drag_paints_nothing() {
    let mut c = controller_on_blank(100);
    let mut tracker = PointerTracker::new();
    let at = |x: f32, y: f32, left: bool| PointerSnapshot {
        position: Some(Point::new(x, y)),
        left,
        ..Default::default()
    };

    // hover, then the press arrives in the same poll as the travel to (40, 40)
    for snapshot in [at(10.0, 10.0, false), at(40.0, 40.0, true), at(40.0, 40.0, false)] {
        for event in tracker.update(snapshot) {
            c.handle(event);
        }
    }
    assert_eq!(c.gesture(), Gesture::Idle);
    assert_eq!(c.canvas().history_len(), 0);
    assert_eq!(c.canvas().buffer().pixel(40, 40), Some(TRANSPARENT));

    // a real drag from the click point still draws from there
    for snapshot in [at(40.0, 40.0, true), at(60.0, 40.0, true), at(60.0, 40.0, false)] {
        for event in tracker.update(snapshot) {
            c.handle(event);
        }
    }
    assert_eq!(c.canvas().history_len(), 1);
    assert_eq!(c.canvas().buffer().pixel(40, 40), Some(RED));
    assert_eq!(c.canvas().buffer().pixel(60, 40), Some(RED));
}
