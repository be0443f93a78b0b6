// Background detection run.
//
// The detector and a private copy of the image move onto a worker thread;
// progress comes back over a channel that the UI loop drains every frame.
// `Stopped` is always the last event, even if the detector panics.

use crate::detector::Detector;
use crate::error::DetectorError;
use crate::types::PixelBuffer;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{error, info};

#[derive(Debug)]
pub enum WorkerEvent {
    /// Processing began; show a busy indicator.
    Started,
    Status(String),
    Finished(PixelBuffer),
    Failed(String),
    /// The worker is done, whatever the outcome; hide the busy indicator.
    Stopped,
}

/// Sends `Stopped` when the worker body unwinds or returns.
struct StopGuard(Sender<WorkerEvent>);

impl Drop for StopGuard {
    fn drop(&mut self) {
        let _ = self.0.send(WorkerEvent::Stopped);
    }
}

pub struct ProcessingHandle {
    events: Receiver<WorkerEvent>,
    thread: JoinHandle<Box<dyn Detector>>,
}

impl ProcessingHandle {
    /// Events received so far, without blocking.
    pub fn poll(&self) -> Vec<WorkerEvent> {
        self.events.try_iter().collect()
    }

    /// Block for the next event; `None` once the worker has hung up.
    pub fn recv(&self) -> Option<WorkerEvent> {
        self.events.recv().ok()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and take the detector back. `None` if it panicked.
    pub fn join(self) -> Option<Box<dyn Detector>> {
        match self.thread.join() {
            Ok(detector) => Some(detector),
            Err(_) => {
                error!("detector thread panicked; processing disabled");
                None
            }
        }
    }
}

/// Start a detection run on its own thread. `image` must already be a copy
/// the caller no longer touches.
pub fn spawn_processing(
    mut detector: Box<dyn Detector>,
    image: PixelBuffer,
) -> Result<ProcessingHandle, DetectorError> {
    let (tx, events) = mpsc::channel();
    let name = detector.name().to_owned();
    info!(detector = %name, width = image.width(), height = image.height(), "processing started");

    let thread = thread::Builder::new().name("detector".into()).spawn(move || {
        let _guard = StopGuard(tx.clone());
        let _ = tx.send(WorkerEvent::Started);
        detector.set_image(image);

        let status_tx = tx.clone();
        let mut status = |message: String| {
            let _ = status_tx.send(WorkerEvent::Status(message));
        };
        match detector.process(&mut status) {
            Ok(result) => {
                let _ = tx.send(WorkerEvent::Finished(result));
            }
            Err(e) => {
                error!(detector = %name, error = %e, "processing failed");
                let _ = tx.send(WorkerEvent::Failed(e.to_string()));
            }
        }
        detector
    })?;

    Ok(ProcessingHandle { events, thread })
}
