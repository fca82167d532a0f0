//! pixart - Main Entry Point

use anyhow::{Context, bail};
use pixart_app::{AppConfig, Args, InputEvent, Outcome, Session, load_image_file};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse().context("Invalid arguments")?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Cannot load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &args.out_dir {
        config.output_dir = dir.clone();
    }

    let mut session = Session::from_config(&config).context("Cannot create session")?;

    if let Some(path) = &args.image {
        let ticket = session.begin_image_load();
        let result = smol::block_on(load_image_file(path));
        session
            .handle(InputEvent::ImageDecoded { ticket, result })
            .with_context(|| format!("Cannot load image {}", path.display()))?;
    }

    if let Some(cell_size) = args.cell_size {
        session
            .handle(InputEvent::SliderInput(cell_size))
            .with_context(|| format!("Cell size {} rejected", cell_size))?;
        session.handle(InputEvent::SliderRelease)?;
    }

    if session.model().has_background_image() {
        session.handle(InputEvent::GeneratePixelArt)?;
    } else if !args.paints.is_empty() {
        bail!("--paint needs an image");
    }

    for paint in &args.paints {
        session.handle(InputEvent::ColorPicked(paint.color))?;
        match session.handle(InputEvent::click(paint.x, paint.y))? {
            Outcome::Painted(id) => tracing::debug!("Painted cell {}", id.index()),
            other => tracing::warn!("Paint at ({}, {}) had no effect: {:?}", paint.x, paint.y, other),
        }
    }

    if args.hide_grid {
        session.set_grid_lines_visible(false)?;
    }

    let controls = session.controls();
    tracing::info!(
        "Cell size {} of [{}, {}], {}",
        controls.slider_value, controls.slider_min, controls.slider_max, controls.grid_toggle_label
    );

    if let Outcome::Exported { filename, bytes } = session.handle(InputEvent::SaveImage)? {
        println!("Saved {} ({} bytes) to {}", filename, bytes, config.output_dir.display());
    }

    Ok(())
}
