// Window + software overlay drawing.
// 1) A resizable window that shows the canvas through the view transform.
// 2) The round brush outline that follows the pointer.
// 3) A tiny 5x7 bitmap font for the HUD line.

use crate::controller::CursorShape;
use crate::error::AppError;
use crate::input::{Modifiers, PointerSnapshot};
use crate::types::{FrameBuffer, Point};
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use std::mem::{discriminant, Discriminant};

pub struct Drawer {
    window: Window,
    cursor: Option<Discriminant<CursorShape>>,
}

impl Drawer {
    /// Create a resizable window.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, AppError> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| AppError::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, cursor: None })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), AppError> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| AppError::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; follows user resizes.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn modifiers(&self) -> Modifiers {
        let down = |a, b| self.window.is_key_down(a) || self.window.is_key_down(b);
        Modifiers {
            ctrl: down(Key::LeftCtrl, Key::RightCtrl),
            shift: down(Key::LeftShift, Key::RightShift),
            alt: down(Key::LeftAlt, Key::RightAlt),
        }
    }

    /// Poll pointer, buttons, modifiers and wheel in one go.
    /// Positions outside the window are still reported so drags can leave it.
    pub fn pointer(&self) -> PointerSnapshot {
        PointerSnapshot {
            position: self.window.get_mouse_pos(MouseMode::Pass).map(|(x, y)| Point::new(x, y)),
            left: self.window.get_mouse_down(MouseButton::Left),
            middle: self.window.get_mouse_down(MouseButton::Middle),
            right: self.window.get_mouse_down(MouseButton::Right),
            modifiers: self.modifiers(),
            scroll_y: self.window.get_scroll_wheel().map(|(_, y)| y).unwrap_or(0.0),
        }
    }

    pub fn key_pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Ctrl+`key`. Only Ctrl+Z auto-repeats.
    pub fn shortcut(&self, key: Key) -> bool {
        self.modifiers().ctrl && self.window.is_key_pressed(key, shortcut_repeat(key))
    }

    /// The brush glyph is drawn into the frame; the system cursor becomes a crosshair.
    pub fn set_cursor(&mut self, shape: CursorShape) {
        let kind = Some(discriminant(&shape));
        if kind == self.cursor {
            return;
        }
        let style = match shape {
            CursorShape::Arrow => CursorStyle::Arrow,
            CursorShape::ClosedHand => CursorStyle::ClosedHand,
            CursorShape::Brush { .. } => CursorStyle::Crosshair,
        };
        self.window.set_cursor_style(style);
        self.cursor = kind;
    }
}

/// Holding Ctrl+Z keeps undoing; every other shortcut fires once per press.
fn shortcut_repeat(key: Key) -> KeyRepeat {
    match key {
        Key::Z => KeyRepeat::Yes,
        _ => KeyRepeat::No,
    }
}

/* ---------- Software drawing: pixels, brush outline, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Circle outline of the given diameter centred on (cx,cy) (midpoint algorithm).
/// A dark ring sits just outside the light one so it reads on any image.
pub fn draw_brush_outline(fb: &mut FrameBuffer, cx: i32, cy: i32, diameter: f32, color: u32) {
    let r = (diameter / 2.0).round().max(1.0) as i32;
    draw_circle(fb, cx, cy, r + 1, 0x00_00_00_00);
    draw_circle(fb, cx, cy, r, color);
}

fn draw_circle(fb: &mut FrameBuffer, cx: i32, cy: i32, r: i32, color: u32) {
    let (mut x, mut y) = (r, 0);
    let mut err = 1 - r;
    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + px, cy + py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Solid bar behind the HUD so text stays legible.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/* ---------- 5x7 bitmap font (upper case, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap; lower case maps to upper case.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00100,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '%' => g!(0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, c) in [(1, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
