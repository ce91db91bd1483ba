use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use hlsphere::{acquire, logger, Error, PlotOutput, PlotPipeline, PointBudget};

/// Plots an image's color distribution as a 3D scatter on the HLS color
/// solid. Without an image argument, probes the clipboard and then the
/// working directory for something to plot.
#[derive(Parser)]
#[command(name = "hlsphere", version, about)]
struct Options {
    /// Image file to plot, bypassing clipboard and directory probing
    image: Option<PathBuf>,

    /// Target number of plotted points
    #[arg(short = 'n', long, default_value_t = 4096)]
    points: u32,

    /// Source preview box as a fraction of the canvas height (0 hides it)
    #[arg(long, default_value_t = 0.3)]
    preview_size: f32,

    /// Cap on the preview's pixel diagonal
    #[arg(long, default_value_t = 512)]
    preview_quality: u32,

    /// Skip exporting the still image
    #[arg(long)]
    no_export: bool,

    /// Export a rotating frame sequence
    #[arg(long)]
    animate: bool,

    /// Keep the exported frames instead of muxing them into a video
    #[arg(long)]
    no_video: bool,

    /// Directory exports are written into
    #[arg(short, long, default_value = "HLSphere")]
    output_dir: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Azimuth steps per revolution (the sequence is twice as long)
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Playback rate of the muxed video
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Open the exported still in the platform viewer
    #[arg(long)]
    show: bool,

    /// Prompt to run again even after a successful pass
    #[arg(long)]
    retry_always: bool,

    /// Give up immediately when no image can be acquired
    #[arg(long)]
    no_retry_on_error: bool,

    /// Log debug details of acquisition and export
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    logger::init(options.verbose);

    println!("============================");
    println!("HLS solid plotter v{}", env!("CARGO_PKG_VERSION"));
    println!("============================");

    loop {
        match run_once(&options) {
            Ok(output) => {
                report(&output);
                if options.retry_always && prompt_retry()? {
                    continue;
                }
                println!("FINISHED");
                return Ok(());
            }
            Err(Error::NoImageAvailable) => {
                eprintln!("FAILED to get image");
                eprintln!("copy an image to the clipboard or put an image file in the working directory");
                let may_retry = !options.no_retry_on_error || options.retry_always;
                if may_retry && prompt_retry()? {
                    continue;
                }
                anyhow::bail!("no image available");
            }
            Err(err) => return Err(err).context("plotting failed"),
        }
    }
}

/// Acquires an image and runs the configured pipeline over it once.
fn run_once(options: &Options) -> hlsphere::Result<PlotOutput> {
    let acquired = match &options.image {
        Some(path) => acquire::from_path(path)?,
        None => acquire::probe(&std::env::current_dir()?)?,
    };

    PlotPipeline::new()
        .point_budget(PointBudget::from_clamped(options.points))
        .preview(options.preview_size, options.preview_quality)
        .export_image(!options.no_export)
        .export_frames(options.animate)
        .convert_to_video(!options.no_video)
        .output_dir(&options.output_dir)
        .resolution(options.width, options.height)
        .frame_count(options.frames)
        .frame_rate(options.fps)
        .show(options.show)
        .run(&acquired.image, &acquired.description)
}

/// Prints where the pass's results ended up.
fn report(output: &PlotOutput) {
    println!("plot points: {}", output.points);
    if let Some(path) = &output.image {
        println!("exported>>{}", path.display());
    }
    if let Some(path) = &output.video {
        println!("exported>>{}", path.display());
    }
}

/// Asks whether to run again; a bare Enter means yes.
fn prompt_retry() -> io::Result<bool> {
    print!("Retry?[Enter]");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().is_empty())
}
