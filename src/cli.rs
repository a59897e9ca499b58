use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use indicatif::ProgressBar;
use minimarch::{ChunkOutcome, RenderSettings, Renderer, scene::demo::demo_scene};
use tracing_subscriber::EnvFilter;

/// Renders the demo scene into a PNG file.
#[derive(Debug, Parser)]
struct Opts {
    #[arg(long, default_value_t = 300)]
    width: u32,
    #[arg(long, default_value_t = 200)]
    height: u32,
    /// Pixels traced between progress updates
    #[arg(long, default_value = "3000")]
    chunk_size: NonZeroUsize,
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let opts = Opts::parse();

    let settings = RenderSettings {
        chunk_size: opts.chunk_size,
        pending_color: None,
        ..Default::default()
    };
    let mut renderer = Renderer::new(opts.width, opts.height, demo_scene(), settings);

    let bar = ProgressBar::new(renderer.progress().1 as u64);
    renderer.render();
    while renderer.run_chunk() == ChunkOutcome::Pending {
        bar.set_position(renderer.progress().0 as u64);
    }
    bar.finish();

    renderer.export_image().save(&opts.output)?;
    tracing::info!(path = %opts.output.display(), "saved");

    Ok(())
}
