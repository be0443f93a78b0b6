// Toolkit-neutral input events, and the translation from polled window
// state into those events.
//
// minifb only exposes "is this button down right now", so `PointerTracker`
// diffs consecutive polls into move / press / release / wheel events.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held while a pointer event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, shift: false, alt: false };
    /// The brush-size modifier.
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false, alt: false };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Everything the stroke controller reacts to. Positions are in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: Button, modifiers: Modifiers },
    PointerMove { pos: Point, modifiers: Modifiers },
    PointerUp { pos: Point, button: Button },
    /// Positive `delta_y` scrolls away from the user (zoom in).
    Wheel { delta_y: f32 },
}

/// One poll of the pointer and modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSnapshot {
    pub position: Option<Point>,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    pub modifiers: Modifiers,
    pub scroll_y: f32,
}

impl PointerSnapshot {
    fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Left => self.left,
            Button::Middle => self.middle,
            Button::Right => self.right,
        }
    }
}

const BUTTONS: [Button; 3] = [Button::Left, Button::Middle, Button::Right];

#[derive(Debug, Default)]
pub struct PointerTracker {
    last: PointerSnapshot,
    last_pos: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last position the window reported, if any.
    pub fn position(&self) -> Option<Point> {
        self.last_pos
    }

    /// Turn a fresh poll into events: a move, then presses, then releases, then the wheel.
    /// Moving first means a click that lands with the pointer's travel only starts a
    /// gesture there; the stroke begins on the next move.
    pub fn update(&mut self, now: PointerSnapshot) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let moved = now.position.is_some() && now.position != self.last_pos;
        let pos = now.position.or(self.last_pos);

        if let Some(pos) = pos {
            if moved {
                events.push(InputEvent::PointerMove { pos, modifiers: now.modifiers });
            }
            for button in BUTTONS {
                if now.is_down(button) && !self.last.is_down(button) {
                    let modifiers = now.modifiers;
                    events.push(InputEvent::PointerDown { pos, button, modifiers });
                }
            }
            for button in BUTTONS {
                if !now.is_down(button) && self.last.is_down(button) {
                    events.push(InputEvent::PointerUp { pos, button });
                }
            }
        }

        if now.scroll_y != 0.0 && now.scroll_y.is_finite() {
            events.push(InputEvent::Wheel { delta_y: now.scroll_y });
        }

        // Button state is only trusted alongside a position
        if pos.is_some() {
            self.last = now;
            self.last_pos = pos;
        }
        events
    }
}
