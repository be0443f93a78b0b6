// Stroke input controller - turns pointer and wheel events into canvas edits.
//
// Gestures:
//   Idle -> Panning        (middle press)
//   Idle -> Drawing        (left press, no modifiers, drawing enabled)
//   Idle -> ResizingBrush  (left press with Ctrl)
//   Any  -> Idle           (release of the button that started the gesture)
//
// The wheel zooms regardless of the current gesture.

use crate::canvas::{BrushSpec, Canvas};
use crate::input::{Button, InputEvent, Modifiers};
use crate::types::{PixelBuffer, Point, Rgba};
use crate::view::ViewTransform;
use tracing::debug;

/// Horizontal drag, in device pixels, that counts as one brush-size step.
pub const RESIZE_THRESHOLD: f32 = 25.0;
/// Diameter change per resize step.
pub const RESIZE_STEP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Last device position; moves scroll by the delta from here.
    Panning { reference: Point },
    /// Last canvas position of the active stroke.
    Drawing { last: Point },
    /// Device position the size gesture is measured from.
    ResizingBrush { reference: Point },
}

impl Gesture {
    fn started_by(&self) -> Option<Button> {
        match self {
            Gesture::Idle => None,
            Gesture::Panning { .. } => Some(Button::Middle),
            Gesture::Drawing { .. } | Gesture::ResizingBrush { .. } => Some(Button::Left),
        }
    }
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    pub redraw: bool,
    /// Put the pointer back here (device space) so the size gesture can repeat.
    pub warp_pointer: Option<Point>,
}

impl Response {
    fn redraw() -> Self {
        Self { redraw: true, warp_pointer: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorShape {
    Arrow,
    ClosedHand,
    /// Round brush glyph, `extent` device pixels across.
    Brush { extent: f32 },
}

#[derive(Debug)]
pub struct StrokeController {
    canvas: Canvas,
    view: ViewTransform,
    brush: BrushSpec,
    baseline_diameter: u32,
    gesture: Gesture,
    drawable: bool,
}

impl StrokeController {
    pub fn new(brush: BrushSpec, viewport: (usize, usize)) -> Self {
        Self {
            canvas: Canvas::new(),
            view: ViewTransform::new(viewport.0, viewport.1),
            baseline_diameter: brush.diameter,
            brush,
            gesture: Gesture::Idle,
            drawable: true,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn brush(&self) -> &BrushSpec {
        &self.brush
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_drawable(&self) -> bool {
        self.drawable
    }

    /// Read-only viewers still pan and zoom.
    pub fn set_drawable(&mut self, drawable: bool) {
        self.drawable = drawable;
        if !drawable && matches!(self.gesture, Gesture::Drawing { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn set_brush_color(&mut self, color: Rgba) {
        self.brush.color = color;
    }

    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.view.set_viewport(width, height);
    }

    /// Load a new image: history is dropped, the brush returns to its starting size.
    pub fn set_image(&mut self, buffer: PixelBuffer) -> Response {
        self.view.set_content(buffer.width(), buffer.height());
        self.canvas.set_image(buffer);
        self.brush.diameter = self.baseline_diameter;
        self.gesture = Gesture::Idle;
        Response::redraw()
    }

    pub fn undo(&mut self) -> Response {
        Response { redraw: self.canvas.undo(), warp_pointer: None }
    }

    pub fn clear(&mut self) -> Response {
        self.canvas.clear();
        self.view.set_content(0, 0);
        self.gesture = Gesture::Idle;
        Response::redraw()
    }

    /// Size of the brush glyph on screen.
    pub fn brush_extent(&self) -> f32 {
        self.brush.diameter as f32 * self.view.zoom()
    }

    pub fn cursor(&self) -> CursorShape {
        match self.gesture {
            Gesture::Idle => CursorShape::Arrow,
            Gesture::Panning { .. } => CursorShape::ClosedHand,
            Gesture::Drawing { .. } | Gesture::ResizingBrush { .. } => {
                CursorShape::Brush { extent: self.brush_extent() }
            }
        }
    }

    /// For hosts that can't warp the pointer: measure the size gesture from `pos` instead.
    pub fn reanchor(&mut self, pos: Point) {
        if let Gesture::ResizingBrush { reference } = &mut self.gesture {
            if pos.is_finite() {
                *reference = pos;
            }
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Response {
        match event {
            InputEvent::PointerDown { pos, button, modifiers } => {
                self.pointer_down(pos, button, modifiers)
            }
            InputEvent::PointerMove { pos, .. } => self.pointer_move(pos),
            InputEvent::PointerUp { button, .. } => self.pointer_up(button),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    fn pointer_down(&mut self, pos: Point, button: Button, modifiers: Modifiers) -> Response {
        if self.gesture != Gesture::Idle || !pos.is_finite() {
            return Response::default();
        }
        self.gesture = match button {
            Button::Middle => Gesture::Panning { reference: pos },
            Button::Left if modifiers == Modifiers::CTRL => {
                Gesture::ResizingBrush { reference: pos }
            }
            Button::Left if modifiers.is_empty() && self.drawable => {
                Gesture::Drawing { last: self.view.to_canvas(pos) }
            }
            _ => return Response::default(),
        };
        debug!(gesture = ?self.gesture, "gesture started");
        Response::redraw()
    }

    fn pointer_move(&mut self, pos: Point) -> Response {
        if !pos.is_finite() {
            return Response::default();
        }
        match &mut self.gesture {
            Gesture::Idle => Response::default(),
            Gesture::Panning { reference } => {
                let (dx, dy) = (reference.x - pos.x, reference.y - pos.y);
                *reference = pos;
                self.view.scroll_by(dx, dy);
                Response::redraw()
            }
            Gesture::Drawing { last } => {
                let next = self.view.to_canvas(pos);
                let from = std::mem::replace(last, next);
                self.canvas.draw_segment(from, next, &self.brush);
                Response::redraw()
            }
            Gesture::ResizingBrush { reference } => {
                let reference = *reference;
                let dx = pos.x - reference.x;
                if dx > RESIZE_THRESHOLD {
                    self.brush.grow(RESIZE_STEP);
                } else if dx < -RESIZE_THRESHOLD {
                    self.brush.shrink(RESIZE_STEP);
                } else {
                    return Response::default();
                }
                debug!(diameter = self.brush.diameter, "brush resized");
                Response { redraw: true, warp_pointer: Some(reference) }
            }
        }
    }

    fn pointer_up(&mut self, button: Button) -> Response {
        if self.gesture.started_by() != Some(button) {
            return Response::default();
        }
        self.gesture = Gesture::Idle;
        Response::redraw()
    }

    fn wheel(&mut self, delta_y: f32) -> Response {
        if delta_y > 0.0 {
            self.view.zoom_in();
        } else {
            self.view.zoom_out();
        }
        Response::redraw()
    }
}
