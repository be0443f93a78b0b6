// Boundary to the iris detection model.
//
// The model itself lives outside this crate. All the viewer needs is "prime
// with an image, run, get an image back", plus free-form status text while it
// works. `CommandDetector` satisfies that by shelling out to any program
// that reads one TIFF and writes another.

use crate::codec;
use crate::error::DetectorError;
use crate::types::PixelBuffer;
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub trait Detector: Send {
    /// Short name for logs and the HUD.
    fn name(&self) -> &str;

    /// Hand the model its input. Replaces any previous image.
    fn set_image(&mut self, image: PixelBuffer);

    /// Run the model on the primed image. May take a long time.
    fn process(&mut self, status: &mut dyn FnMut(String)) -> Result<PixelBuffer, DetectorError>;
}

/// Runs `<program> [args..] <input.tiff> <output.tiff>` in a scratch directory.
#[derive(Debug)]
pub struct CommandDetector {
    program: String,
    args: Vec<String>,
    label: String,
    image: Option<PixelBuffer>,
}

impl CommandDetector {
    /// Split a command line on whitespace; `None` if it is blank.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_owned);
        let program = parts.next()?;
        Some(Self { args: parts.collect(), label: command.trim().to_owned(), program, image: None })
    }
}

impl Detector for CommandDetector {
    fn name(&self) -> &str {
        &self.label
    }

    fn set_image(&mut self, image: PixelBuffer) {
        self.image = Some(image);
    }

    fn process(&mut self, status: &mut dyn FnMut(String)) -> Result<PixelBuffer, DetectorError> {
        let image = self.image.as_ref().ok_or(DetectorError::NoImage)?;
        let scratch = tempfile::Builder::new().prefix("iris-annotator-").tempdir()?;
        let input = codec::export(image, &scratch.path().join("input.tiff"))?;
        let output = scratch.path().join("output.tiff");
        debug!(input = %input.display(), output = %output.display(), "detector scratch ready");

        status(format!("Running {}", self.program));
        let exit = Command::new(&self.program)
            .args(&self.args)
            .arg(&input)
            .arg(&output)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| DetectorError::Launch { command: self.label.clone(), source })?;
        if !exit.success() {
            return Err(DetectorError::Exit { command: self.label.clone(), status: exit });
        }

        status("Reading detector output".to_owned());
        let result = codec::load(&output)?;
        info!(
            detector = %self.label,
            width = result.width(),
            height = result.height(),
            "detector finished"
        );
        Ok(result)
    }
}
