// The UI-thread loop: poll the window, feed the controller, drain the
// detection worker, render, present.
//
// Keys:  Ctrl+Z undo | Ctrl+E export | P run detector | R reload | ESC quit
// Mouse: left drag draws | Ctrl + left drag sizes the brush
//        middle drag pans | wheel zooms

use crate::codec;
use crate::config::Config;
use crate::controller::{Gesture, StrokeController};
use crate::detector::{CommandDetector, Detector};
use crate::draw::{draw_brush_outline, draw_text_5x7, fill_rect, Drawer};
use crate::error::AppError;
use crate::input::PointerTracker;
use crate::render::render_view;
use crate::types::FrameBuffer;
use crate::worker::{spawn_processing, ProcessingHandle, WorkerEvent};
use minifb::Key;
use tracing::{info, warn};

const HUD_HEIGHT: i32 = 11;
const HUD_BAR: u32 = 0x00_18_18_18;
const HUD_TEXT: u32 = 0x00_FF_FF_FF;
const OUTLINE: u32 = 0x00_FF_FF_FF;

/// Where the detection model currently is.
enum DetectorSlot {
    Missing,
    Ready(Box<dyn Detector>),
    Running(ProcessingHandle),
}

pub struct App {
    config: Config,
    drawer: Drawer,
    screen: FrameBuffer,
    controller: StrokeController,
    tracker: PointerTracker,
    detector: DetectorSlot,
    status: String,
    busy: bool,
}

impl App {
    /// Open the image, then the window. A bad image fails before any window appears.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let image = codec::load(&config.image)?;

        let title = match config.image.file_name() {
            Some(name) => format!("Iris Annotator - {}", name.to_string_lossy()),
            None => "Iris Annotator".to_owned(),
        };
        let drawer = Drawer::new(&title, config.width, config.height)?;
        let (w, h) = drawer.size();

        let mut controller = StrokeController::new(config.brush(), (w, h));
        controller.set_drawable(!config.read_only);
        controller.set_image(image);

        let detector = match config.detector.as_deref().and_then(CommandDetector::parse) {
            Some(det) => {
                info!(detector = %det.name(), "detector configured");
                DetectorSlot::Ready(Box::new(det))
            }
            None => DetectorSlot::Missing,
        };

        Ok(Self {
            config,
            drawer,
            screen: FrameBuffer::new(w, h),
            controller,
            tracker: PointerTracker::new(),
            detector,
            status: String::from("Ready"),
            busy: false,
        })
    }

    pub fn run(mut self) -> Result<(), AppError> {
        while self.drawer.is_open() && !self.drawer.esc_pressed() {
            self.sync_viewport();
            self.handle_keys();
            self.handle_pointer();
            self.drain_worker();
            self.render();
            self.drawer.present(&self.screen)?;
        }
        Ok(())
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        info!(status = %self.status);
    }

    fn sync_viewport(&mut self) {
        let (w, h) = self.drawer.size();
        // minimised windows report 0x0; keep the last frame
        if w == 0 || h == 0 || (w, h) == (self.screen.width, self.screen.height) {
            return;
        }
        self.screen = FrameBuffer::new(w, h);
        self.controller.set_viewport(w, h);
    }

    fn handle_keys(&mut self) {
        if self.drawer.shortcut(Key::Z) {
            self.controller.undo();
        }
        if self.drawer.shortcut(Key::E) {
            self.export();
        }
        if self.drawer.key_pressed_once(Key::P) {
            self.process();
        }
        if self.drawer.key_pressed_once(Key::R) && !self.drawer.modifiers().ctrl {
            self.reload();
        }
    }

    fn handle_pointer(&mut self) {
        for event in self.tracker.update(self.drawer.pointer()) {
            let response = self.controller.handle(event);
            // minifb can't move the system pointer; measure the next step from here instead
            if response.warp_pointer.is_some() {
                if let Some(pos) = self.tracker.position() {
                    self.controller.reanchor(pos);
                }
            }
        }
        self.drawer.set_cursor(self.controller.cursor());
    }

    fn export(&mut self) {
        match codec::export(self.controller.canvas().buffer(), &self.config.export_path()) {
            Ok(path) => self.set_status(format!("Exported {}", path.display())),
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_status(format!("Export failed: {e}"));
            }
        }
    }

    /// Re-read the source image; on failure the canvas is left as it was.
    fn reload(&mut self) {
        match codec::load(&self.config.image) {
            Ok(image) => {
                self.controller.set_image(image);
                self.set_status("Reloaded");
            }
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.set_status(format!("Reload failed: {e}"));
            }
        }
    }

    fn process(&mut self) {
        match std::mem::replace(&mut self.detector, DetectorSlot::Missing) {
            DetectorSlot::Missing => self.set_status("No detector configured (--detector)"),
            DetectorSlot::Running(handle) => {
                self.detector = DetectorSlot::Running(handle);
                self.set_status("Detector already running");
            }
            DetectorSlot::Ready(detector) => {
                // the worker gets its own copy; the canvas stays editable meanwhile
                let image = self.controller.canvas().buffer().clone();
                match spawn_processing(detector, image) {
                    Ok(handle) => self.detector = DetectorSlot::Running(handle),
                    Err(e) => {
                        warn!(error = %e, "could not start detector");
                        self.set_status(format!("Could not start detector: {e}"));
                    }
                }
            }
        }
    }

    fn drain_worker(&mut self) {
        let DetectorSlot::Running(handle) = &self.detector else { return };
        // checked before polling so nothing sent before the exit is missed
        let finished = handle.is_finished();
        for event in handle.poll() {
            match event {
                WorkerEvent::Started => {
                    self.busy = true;
                    self.set_status("Processing...");
                }
                WorkerEvent::Status(message) => self.set_status(message),
                WorkerEvent::Finished(image) => {
                    self.controller.set_image(image);
                    self.set_status("Detection finished");
                }
                WorkerEvent::Failed(message) => {
                    self.set_status(format!("Detection failed: {message}"));
                }
                WorkerEvent::Stopped => self.busy = false,
            }
        }
        if finished {
            let slot = std::mem::replace(&mut self.detector, DetectorSlot::Missing);
            if let DetectorSlot::Running(handle) = slot {
                if let Some(detector) = handle.join() {
                    self.detector = DetectorSlot::Ready(detector);
                } else {
                    self.busy = false;
                }
            }
        }
    }

    fn render(&mut self) {
        render_view(self.controller.canvas().buffer(), self.controller.view(), &mut self.screen);

        if let Some(pos) = self.tracker.position() {
            let gesture = self.controller.gesture();
            let resizing = matches!(gesture, Gesture::ResizingBrush { .. });
            let show = self.controller.is_drawable() || resizing;
            if show && !matches!(gesture, Gesture::Panning { .. }) {
                let extent = self.controller.brush_extent();
                draw_brush_outline(&mut self.screen, pos.x as i32, pos.y as i32, extent, OUTLINE);
            }
        }

        let mode = if self.controller.is_drawable() { "DRAW" } else { "VIEW" };
        let busy = if self.busy { " | PROCESSING" } else { "" };
        let hud = format!(
            "{mode} | ZOOM {:.0}% | BRUSH {} | UNDO {}{busy} | {}",
            self.controller.view().zoom() * 100.0,
            self.controller.brush().diameter,
            self.controller.canvas().history_len(),
            self.status,
        );
        let width = self.screen.width as i32;
        let y = self.screen.height as i32 - HUD_HEIGHT;
        fill_rect(&mut self.screen, 0, y, width, HUD_HEIGHT, HUD_BAR);
        draw_text_5x7(&mut self.screen, 4, y + 2, &hud, HUD_TEXT);
    }
}
