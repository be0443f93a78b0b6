// What you SEE:
// • The image opens centred in a window; the HUD line at the bottom shows mode, zoom and brush.
// • Hold Left Mouse: paint with the brush. Ctrl + left drag sideways: brush size in steps of 5.
// • Middle drag pans, the wheel zooms. Ctrl+Z undoes one segment at a time.
// • Ctrl+E exports TIFF, P runs the detector (if --detector is given), R reloads. ESC quits.

use clap::Parser;
use iris_annotator::app::App;
use iris_annotator::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_annotator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let version = env!("CARGO_PKG_VERSION");
    tracing::info!(image = %config.image.display(), "starting iris-annotator v{version}");

    App::new(config)?.run()?;
    Ok(())
}
