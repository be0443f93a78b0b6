// Undo history: whole-buffer snapshots, most recent last.

use crate::types::PixelBuffer;

/// Maximum number of snapshots kept after any push.
pub const MAX_UNDO_SNAPSHOTS: usize = 40;

/// Bounded stack of canvas snapshots.
///
/// When a push takes the stack past [`MAX_UNDO_SNAPSHOTS`], every other entry is
/// dropped (even indices survive). The oldest snapshot always survives, so undo
/// can still reach far back, just not through every intermediate step.
#[derive(Debug, Default)]
pub struct UndoHistory {
    snapshots: Vec<PixelBuffer>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: PixelBuffer) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > MAX_UNDO_SNAPSHOTS {
            self.decimate();
        }
    }

    pub fn pop(&mut self) -> Option<PixelBuffer> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn decimate(&mut self) {
        let before = self.snapshots.len();
        let mut index = 0;
        self.snapshots.retain(|_| {
            let keep = index % 2 == 0;
            index += 1;
            keep
        });
        tracing::debug!(before, after = self.snapshots.len(), "undo history decimated");
    }
}
