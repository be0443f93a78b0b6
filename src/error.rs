// Error types. Every variant states *where* things went wrong.
// The canvas and the stroke controller never fail; these cover the edges:
// the window, image files and the detection model.
use std::path::PathBuf;
use thiserror::Error;

/// Raw samples that don't describe the claimed image layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("row stride {stride} is smaller than a row of {row} samples")]
    StrideTooSmall { stride: usize, row: usize },

    #[error("pixel data too short: need {needed} samples, got {got}")]
    TooShort { needed: usize, got: usize },
}

/// Decoding a source image or encoding an export.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("cannot read {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("decoded image has an invalid layout: {0}")]
    Layout(#[from] BufferError),

    #[error("nothing to export: the canvas is empty")]
    EmptyCanvas,
}

/// Running the external detection model.
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("no image was handed to the detector")]
    NoImage,

    #[error("failed to launch detector {command:?}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("detector {command:?} exited with {status}")]
    Exit { command: String, status: std::process::ExitStatus },

    #[error("detector scratch space: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Top-level failures of the window host.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed

    #[error(transparent)]
    Codec(#[from] CodecError), // The startup image could not be opened
}
