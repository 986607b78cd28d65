//! Main application entry point.

use clap::Parser;
use snapmark_app::{App, AppConfig};
use snapmark_render::BlurSampling;
use std::path::PathBuf;
use std::process::ExitCode;

/// Annotate an image with text, boxes, blur regions and overlays
#[derive(Parser, Debug)]
#[command(name = "snapmark")]
#[command(version)]
struct Args {
    /// Image to annotate
    base_image: PathBuf,

    /// JSON array of editing steps
    script: PathBuf,

    /// Output PNG file
    output: PathBuf,

    /// Editor configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let blur regions also blur elements painted below them
    #[arg(long)]
    blur_elements: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting SnapMark");

    let args = Args::parse();
    let blur_sampling = if args.blur_elements {
        BlurSampling::PaintedBelow
    } else {
        BlurSampling::BaseLayer
    };
    let app = App::new(AppConfig {
        base_image: args.base_image,
        script: args.script,
        output: args.output,
        config: args.config,
        blur_sampling,
    });

    match app.run() {
        Ok(summary) => {
            log::info!(
                "Exported {} elements on a {}x{} canvas",
                summary.elements,
                summary.canvas_size.width,
                summary.canvas_size.height
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            eprintln!("snapmark: {err}");
            ExitCode::FAILURE
        }
    }
}
