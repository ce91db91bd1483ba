//! A library for plotting the color distribution of an image as a 3D scatter
//! on the HLS color solid.
//!
//! Every color maps to a point on the double-cone HLS solid: hue becomes the
//! azimuthal angle, lightness the polar angle (black at the south pole, white
//! at the north pole), and saturation the radius. An input image is decimated
//! on a fixed grid into a bounded set of non-white colors, each of which is
//! plotted at its solid coordinate in its own color. The plot can be exported
//! as a single still, as a rotating frame sequence, or as a video.
//!
//! # Features
//! To reduce dependencies and compile times, `hlsphere` has `cargo` features
//! that can be turned off or on:
//! - `clipboard`: allows acquiring images from the system clipboard via [`arboard`].
//! - `video`: allows muxing exported frame sequences into a video by invoking `ffmpeg`.
//!
//! # High-Level API
//! The [`PlotPipeline`] builder is the main entry point:
//! ```no_run
//! # use hlsphere::{PlotPipeline, PointBudget};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgb8();
//!
//! let output = PlotPipeline::new()
//!     .point_budget(PointBudget::from_clamped(4096)) // target number of plotted points
//!     .preview(0.3, 512) // overlay a thumbnail of the source image
//!     .output_dir("HLSphere")
//!     .run(&img, "some image")?;
//!
//! println!("plotted {} points", output.points);
//! # Ok(())
//! # }
//! ```
//!
//! The lower level pieces ([`SampledColors`], [`solid_point`], [`render`])
//! are exposed as well for callers that want to drive rendering themselves.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

mod api;
mod error;
mod export;
mod sample;
mod solid;
mod types;

pub mod acquire;
pub mod logger;
pub mod render;

#[cfg(feature = "video")]
pub mod video;

pub use api::{PlotOutput, PlotPipeline};
pub use error::{Error, Result};
pub use export::sanitize_description;
pub use sample::{stride, SampledColors};
pub use solid::{hue_ring, solid_point, SolidPoint, HUE_RING_POINTS};
pub use types::{PointBudget, ZeroPointBudget};
