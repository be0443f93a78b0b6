// Undo history: reach and bounds

use crate::helpers::{blank_canvas, dab_column, painted_columns};
use iris_annotator::history::MAX_UNDO_SNAPSHOTS;
use iris_annotator::types::{BitDepth, PixelBuffer};

#[test]
fn undo_n_times_restores_the_original_within_the_window() {
    for n in [1, 2, 17, MAX_UNDO_SNAPSHOTS] {
        let mut canvas = blank_canvas(64, 1);
        let original = canvas.buffer().clone();
        for i in 0..n {
            dab_column(&mut canvas, i);
        }
        assert_eq!(painted_columns(canvas.buffer()).len(), n);

        for _ in 0..n {
            assert!(canvas.undo());
        }
        assert_eq!(canvas.buffer(), &original, "n = {n}");
        assert!(!canvas.undo());
    }
}

#[test]
fn each_undo_removes_exactly_the_last_draw() {
    let mut canvas = blank_canvas(8, 1);
    for i in 0..5 {
        dab_column(&mut canvas, i);
    }
    canvas.undo();
    assert_eq!(painted_columns(canvas.buffer()), vec![0, 1, 2, 3]);
    canvas.undo();
    assert_eq!(painted_columns(canvas.buffer()), vec![0, 1, 2]);
}

#[test]
fn history_stays_bounded_after_every_draw() {
    let mut canvas = blank_canvas(200, 1);
    for i in 0..200 {
        dab_column(&mut canvas, i);
        assert!(canvas.history_len() <= MAX_UNDO_SNAPSHOTS, "after draw {i}");
    }
}

#[test]
fn forty_five_draws_then_forty_undos_reach_back_past_the_fifth() {
    let mut canvas = blank_canvas(45, 1);
    for i in 0..45 {
        dab_column(&mut canvas, i);
    }
    assert!(canvas.history_len() <= MAX_UNDO_SNAPSHOTS);

    for _ in 0..40 {
        canvas.undo();
    }
    let painted = painted_columns(canvas.buffer());
    assert!(painted.len() <= 5, "still {} draws applied", painted.len());
    // whatever survives is an unbroken prefix of the stroke
    assert_eq!(painted, (0..painted.len()).collect::<Vec<_>>());
}

#[test]
fn set_image_drops_history() {
    let mut canvas = blank_canvas(10, 1);
    dab_column(&mut canvas, 3);

    let fresh = PixelBuffer::new(4, 4, BitDepth::Sixteen);
    canvas.set_image(fresh.clone());
    assert_eq!(canvas.history_len(), 0);
    assert!(!canvas.undo());
    assert_eq!(canvas.buffer(), &fresh);
}

#[test]
fn snapshots_do_not_alias_the_live_buffer() {
    let mut canvas = blank_canvas(4, 1);
    dab_column(&mut canvas, 0);
    dab_column(&mut canvas, 1);
    // undoing must give back the state after the first draw, not the live one
    canvas.undo();
    assert_eq!(painted_columns(canvas.buffer()), vec![0]);
}
