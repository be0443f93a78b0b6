// Command-line configuration.

use crate::canvas::{BrushSpec, DEFAULT_BRUSH_DIAMETER, MIN_BRUSH_DIAMETER};
use crate::codec;
use crate::types::Rgba;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "iris-annotator", version, about = "View and annotate iris images")]
pub struct Config {
    /// Image to open (anything the `image` crate decodes; 16-bit sources stay 16-bit)
    pub image: PathBuf,

    /// Where Ctrl+E writes the annotated image (always TIFF) [default: <IMAGE>_annotated.tiff]
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Brush diameter in image pixels
    #[arg(
        long,
        default_value_t = DEFAULT_BRUSH_DIAMETER,
        value_parser = clap::value_parser!(u32).range(MIN_BRUSH_DIAMETER as i64..)
    )]
    pub brush_size: u32,

    /// Brush color as RRGGBB or RRGGBBAA
    #[arg(long, default_value = "ffffff", value_name = "HEX")]
    pub brush_color: Rgba,

    /// Pan and zoom only; drawing is disabled
    #[arg(long)]
    pub read_only: bool,

    /// Detection model command, run as `<CMD> <input.tiff> <output.tiff>` (P to run)
    #[arg(long, value_name = "CMD")]
    pub detector: Option<String>,

    /// Initial window width
    #[arg(long, default_value_t = 1024)]
    pub width: usize,

    /// Initial window height
    #[arg(long, default_value_t = 768)]
    pub height: usize,
}

impl Config {
    pub fn brush(&self) -> BrushSpec {
        BrushSpec::new(self.brush_color, self.brush_size)
    }

    pub fn export_path(&self) -> PathBuf {
        match &self.export {
            Some(path) => codec::export_path(path),
            None => {
                let stem = self.image.file_stem().unwrap_or_default().to_string_lossy();
                self.image.with_file_name(format!("{stem}_annotated.{}", codec::EXPORT_EXTENSION))
            }
        }
    }
}
