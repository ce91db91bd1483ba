//! Contains the high level pipeline builder API.

use std::{f32::consts::PI, path::PathBuf};

use image::RgbImage;
use indicatif::ProgressBar;
use log::{info, warn};

use crate::{
    export::{self, Exporter},
    render::{Camera, ScatterPlot},
    PointBudget, Result, SampledColors,
};

/// A builder struct to configure and run one plotting pass over an image.
///
/// This is the explicit home of everything that used to be ambient
/// configuration: the point budget, preview overlay, export toggles, output
/// location, resolution, and animation parameters.
///
/// # Examples
/// ```
/// # use hlsphere::{PlotPipeline, PointBudget};
/// let pipeline = PlotPipeline::new()
///     .point_budget(PointBudget::from_clamped(1024))
///     .resolution(1280, 720)
///     .export_image(false);
/// ```
///
/// Then run it against a decoded image:
/// ```no_run
/// # use hlsphere::PlotPipeline;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let output = PlotPipeline::new().run(&img, "some image")?;
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PlotPipeline {
    /// Target number of plotted points.
    point_budget: PointBudget,
    /// Thumbnail box as a fraction of the canvas height; 0 disables.
    preview_size: f32,
    /// Cap on the thumbnail's pixel diagonal.
    preview_quality: u32,
    /// Whether to export the single still.
    export_image: bool,
    /// Whether to export the rotating frame sequence.
    export_frames: bool,
    /// Whether to mux exported frames into a video.
    convert_to_video: bool,
    /// Directory all exports are written into.
    output_dir: PathBuf,
    /// Canvas width in pixels.
    width: u32,
    /// Canvas height in pixels.
    height: u32,
    /// Azimuth steps per revolution; the sequence is twice this long.
    frame_count: u32,
    /// Playback rate of the muxed video.
    frame_rate: u32,
    /// Whether to open the exported still in the platform viewer.
    show: bool,
}

/// What one [`PlotPipeline::run`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlotOutput {
    /// Number of points plotted (sampled colors after white exclusion).
    pub points: usize,
    /// Path of the exported still, when one was written.
    pub image: Option<PathBuf>,
    /// Path of the muxed video, when one was written.
    pub video: Option<PathBuf>,
}

impl PlotPipeline {
    /// Creates a pipeline with default options: 4096 points, a 0.3/512
    /// preview, still export on, animation off, `HLSphere` output
    /// directory, 1920×1080 canvas, 240 frames per revolution at 60 fps.
    pub fn new() -> Self {
        Self {
            point_budget: PointBudget::DEFAULT,
            preview_size: 0.3,
            preview_quality: 512,
            export_image: true,
            export_frames: false,
            convert_to_video: true,
            output_dir: PathBuf::from("HLSphere"),
            width: 1920,
            height: 1080,
            frame_count: 240,
            frame_rate: 60,
            show: false,
        }
    }

    /// Sets the target number of plotted points.
    ///
    /// The default is [`PointBudget::DEFAULT`].
    pub fn point_budget(mut self, budget: PointBudget) -> Self {
        self.point_budget = budget;
        self
    }

    /// Sets the source-image preview overlay: `size` is the box as a
    /// fraction of the canvas height (`0.0` hides it), `quality` caps the
    /// thumbnail's pixel diagonal.
    ///
    /// The defaults are `0.3` and `512`.
    pub fn preview(mut self, size: f32, quality: u32) -> Self {
        self.preview_size = size;
        self.preview_quality = quality;
        self
    }

    /// Sets whether the single still is exported. The default is `true`.
    pub fn export_image(mut self, export: bool) -> Self {
        self.export_image = export;
        self
    }

    /// Sets whether the rotating frame sequence is exported.
    /// The default is `false`.
    pub fn export_frames(mut self, export: bool) -> Self {
        self.export_frames = export;
        self
    }

    /// Sets whether an exported frame sequence is muxed into a video
    /// (and the frames deleted afterwards). The default is `true`,
    /// effective only together with [`PlotPipeline::export_frames`].
    pub fn convert_to_video(mut self, convert: bool) -> Self {
        self.convert_to_video = convert;
        self
    }

    /// Sets the export directory. The default is `HLSphere`.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the canvas resolution. The default is 1920×1080.
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the number of azimuth steps per revolution; the exported
    /// sequence covers two revolutions, so it is twice as long.
    ///
    /// The default is `240`.
    pub fn frame_count(mut self, frames: u32) -> Self {
        self.frame_count = frames;
        self
    }

    /// Sets the playback rate of the muxed video. The default is `60`.
    pub fn frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Sets whether the exported still is opened in the platform viewer.
    /// The default is `false`.
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Runs the whole pass: sample, render, export per configuration.
    ///
    /// `description` names the image source and becomes the sanitized file
    /// stem of everything exported.
    pub fn run(&self, image: &RgbImage, description: &str) -> Result<PlotOutput> {
        let samples = SampledColors::from_image(image, self.point_budget);
        info!("plot points: {} (stride {})", samples.len(), samples.stride());

        let mut output = PlotOutput {
            points: samples.len(),
            image: None,
            video: None,
        };

        if !(self.export_image || self.export_frames) {
            return Ok(output);
        }
        let exporter = Exporter::new(&self.output_dir, description)?;

        if self.export_image {
            let still = self.render(&samples, image, Camera::INITIAL);
            let path = exporter.image_path();
            exporter.save_png(&still, &path)?;
            info!("exported>>{}", path.display());
            output.image = Some(path);
        }

        if self.export_frames {
            output.video = self.export_animation(&samples, image, &exporter)?;
        }

        if self.show {
            if let Some(path) = &output.image {
                export::open_in_viewer(path)?;
            } else {
                warn!("nothing was exported, so there is nothing to show");
            }
        }

        Ok(output)
    }

    /// Renders one view of the plot: axis, hue ring, samples, preview.
    #[must_use]
    pub fn render(
        &self,
        samples: &SampledColors,
        source: &RgbImage,
        camera: Camera,
    ) -> RgbImage {
        let mut plot = ScatterPlot::new(self.width, self.height, camera);
        plot.draw_axis();
        plot.draw_hue_ring();
        plot.draw_samples(samples.colors());
        plot.overlay_thumbnail(source, self.preview_size, self.preview_quality);
        plot.into_image()
    }

    /// The rotating camera path: for frame `i` of `2N`, the azimuth steps
    /// through two full turns while the elevation sweeps one cosine cycle
    /// between −15° and 45°.
    pub fn orbit(&self) -> impl Iterator<Item = Camera> + '_ {
        let n = self.frame_count.max(1);
        (0..2 * n).map(move |i| {
            Camera::new(
                i as f32 * 360.0 / n as f32,
                15.0 + 30.0 * (PI * i as f32 / n as f32).cos(),
            )
        })
    }

    /// Renders and writes the frame sequence, muxing it when configured.
    /// Returns the video path when one was written.
    fn export_animation(
        &self,
        samples: &SampledColors,
        source: &RgbImage,
        exporter: &Exporter,
    ) -> Result<Option<PathBuf>> {
        let total = 2 * self.frame_count.max(1) as usize;
        let bar = ProgressBar::new(total as u64);
        let mut frames = Vec::with_capacity(total);
        for (index, camera) in self.orbit().enumerate() {
            let frame = self.render(samples, source, camera);
            let path = exporter.frame_path(index);
            exporter.save_png(&frame, &path)?;
            frames.push(path);
            bar.inc(1);
        }
        bar.finish_and_clear();
        info!("exported {} frames", frames.len());

        if !self.convert_to_video {
            return Ok(None);
        }
        mux(exporter, &frames, self.frame_rate)
    }
}

impl Default for PlotPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Muxes the frames into a video and deletes them on success.
#[cfg(feature = "video")]
fn mux(exporter: &Exporter, frames: &[PathBuf], frame_rate: u32) -> Result<Option<PathBuf>> {
    let video_path = exporter.video_path();
    crate::video::mux_frames(&exporter.frame_pattern(), &video_path, frame_rate)?;
    for frame in frames {
        std::fs::remove_file(frame)?;
    }
    info!("exported>>{}", video_path.display());
    Ok(Some(video_path))
}

/// Stub used when video support is compiled out: frames are kept.
#[cfg(not(feature = "video"))]
fn mux(_exporter: &Exporter, frames: &[PathBuf], _frame_rate: u32) -> Result<Option<PathBuf>> {
    warn!("video support not compiled in; keeping {} frames", frames.len());
    Ok(None)
}
