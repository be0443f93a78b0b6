// Iris image viewer with a freehand annotation brush.
//
// The core is `canvas::Canvas` (pixel buffer + bounded undo) driven by
// `controller::StrokeController` (pointer/wheel gestures). Everything else
// is the host around it: window, image files, and the detection worker.

pub mod app;
pub mod canvas;
pub mod codec;
pub mod config;
pub mod controller;
pub mod detector;
pub mod draw;
pub mod error;
pub mod history;
pub mod input;
pub mod render;
pub mod types;
pub mod view;
pub mod worker;
