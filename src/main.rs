extern crate tracelib;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracelib::camera::MAX_DEPTH;
use tracelib::pixmap;
use tracelib::progress::ConsoleProgress;
use tracelib::{render, RenderSettings, Scene, ShadingModel};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render the reflecting spheres scene to an image file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[arg(long, default_value_t = 1920, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, default_value_t = 1080, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Maximum number of reflection bounces per pixel
    #[arg(long, default_value_t = MAX_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: u32,

    /// Output file; `.ppm` is written as binary pixmap, `.png` through the image crate
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Clamp diffuse and specular dot products at zero
    #[arg(long)]
    clamp_shading: bool,

    /// Trace on a single thread
    #[arg(long)]
    sequential: bool,
}

impl Cli {
    fn settings(&self) -> RenderSettings {
        RenderSettings {
            width: self.width as usize,
            height: self.height as usize,
            max_depth: self.max_depth,
            shading: if self.clamp_shading {
                ShadingModel::Clamped
            } else {
                ShadingModel::Reference
            },
            parallel: !self.sequential,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let scene = Scene::reference();
    let settings = cli.settings();

    let pixels = render(&scene, &settings, &ConsoleProgress::new())?;

    print!("\nwriting image...");
    std::io::stdout().flush()?;
    pixmap::save(&cli.output, &pixels)
        .with_context(|| format!("failed to save {}", cli.output.display()))?;
    println!("done.");

    info!(output = %cli.output.display(), "image written");
    Ok(())
}
