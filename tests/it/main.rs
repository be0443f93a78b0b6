// Single test binary entry point.
//
// - undo_tests: history bounds and undo reach
// - scenario_tests: end-to-end drawing through the controller
// - codec_tests: TIFF export and reload
// - detector_tests: detection run handed back to the canvas

mod codec_tests;
mod detector_tests;
mod helpers;
mod scenario_tests;
mod undo_tests;
