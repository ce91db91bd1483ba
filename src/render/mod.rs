//! Contains the scatter-plot renderer.
//!
//! Rendering is plain point splatting: each color is mapped to its solid
//! coordinate, projected through an orbit [`Camera`], and drawn as a filled
//! disc onto an RGB canvas, far points first so near points overdraw them.

mod camera;

pub use camera::{Camera, Projected};

use image::{
    imageops::{self, FilterType},
    Rgb, RgbImage,
};
use palette::Srgb;

use crate::{hue_ring, solid_point, SolidPoint};

/// Canvas background.
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Color of the lightness axis and its arrowhead.
const AXIS_COLOR: Rgb<u8> = Rgb([128, 128, 128]);

/// Pixels per solid unit, as a fraction of the smaller canvas dimension.
const ZOOM: f32 = 0.42;

/// Marker radius divisor: sample discs are `min(w, h) / 270` px, at least 2.
const MARKER_DIVISOR: f32 = 270.0;

/// The axis extends past the north pole by this much, arrow tip included.
const AXIS_OVERSHOOT: f32 = 0.1;

/// Arrowhead stroke length as a fraction of the axis length.
const ARROW_RATIO: f32 = 0.03;

/// A scatter plot of solid points being drawn onto a canvas.
///
/// # Examples
/// ```
/// # use hlsphere::render::{Camera, ScatterPlot};
/// # use palette::Srgb;
/// let mut plot = ScatterPlot::new(320, 180, Camera::INITIAL);
/// plot.draw_axis();
/// plot.draw_hue_ring();
/// plot.draw_samples(&[Srgb::new(0.8, 0.2, 0.2)]);
/// let canvas = plot.into_image();
/// ```
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    /// The canvas being drawn onto.
    canvas: RgbImage,
    /// The viewpoint used for every projection.
    camera: Camera,
    /// Pixels per solid unit.
    scale: f32,
    /// Canvas center in pixels.
    center: (f32, f32),
    /// Radius of a sample marker in pixels.
    marker_radius: f32,
}

impl ScatterPlot {
    /// Creates an empty white plot of the given size, viewed by `camera`.
    #[must_use]
    pub fn new(width: u32, height: u32, camera: Camera) -> Self {
        let min_dim = width.min(height) as f32;
        Self {
            canvas: RgbImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            camera,
            scale: ZOOM * min_dim,
            center: (width as f32 / 2.0, height as f32 / 2.0),
            marker_radius: (min_dim / MARKER_DIVISOR).max(2.0),
        }
    }

    /// Draws the vertical lightness axis, south pole to just past the north
    /// pole, with a small arrowhead at the top.
    pub fn draw_axis(&mut self) {
        let bottom = self.to_canvas(SolidPoint {
            x: 0.0,
            y: 0.0,
            z: -1.0,
        });
        let tip = self.to_canvas(SolidPoint {
            x: 0.0,
            y: 0.0,
            z: 1.0 + AXIS_OVERSHOOT,
        });
        draw_line(&mut self.canvas, bottom, tip, AXIS_COLOR);

        let shaft = (tip.0 - bottom.0, tip.1 - bottom.1);
        let length = (shaft.0 * shaft.0 + shaft.1 * shaft.1).sqrt();
        if length > 0.0 {
            let dir = (shaft.0 / length, shaft.1 / length);
            let barb = ARROW_RATIO * length;
            for side in [-1.0, 1.0] {
                // Strokes swept back 30° either side of the shaft.
                let (sin, cos) = (side * 0.5f32, -0.866f32);
                let dx = barb * (dir.0 * cos - dir.1 * sin);
                let dy = barb * (dir.0 * sin + dir.1 * cos);
                draw_line(&mut self.canvas, tip, (tip.0 + dx, tip.1 + dy), AXIS_COLOR);
            }
        }
    }

    /// Draws the 36-point reference hue ring with 1 px markers.
    pub fn draw_hue_ring(&mut self) {
        for (color, point) in hue_ring() {
            let (px, py) = self.to_canvas(point);
            fill_disc(&mut self.canvas, px, py, 1.0, to_pixel(color));
        }
    }

    /// Draws the sampled colors as filled discs, far points first.
    pub fn draw_samples(&mut self, colors: &[Srgb<f32>]) {
        let mut projected: Vec<(f32, f32, f32, Rgb<u8>)> = colors
            .iter()
            .map(|&color| {
                let view = self.camera.project(solid_point(color));
                let (px, py) = self.view_to_canvas(view.u, view.v);
                (view.depth, px, py, to_pixel(color))
            })
            .collect();
        projected.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, px, py, pixel) in projected {
            fill_disc(&mut self.canvas, px, py, self.marker_radius, pixel);
        }
    }

    /// Overlays a thumbnail of the source image in the bottom-left corner.
    ///
    /// `size` is the thumbnail box as a fraction of the canvas height
    /// (values ≤ 0 disable the overlay); `quality` caps the thumbnail's
    /// pixel diagonal so very large sources stay cheap to resample.
    pub fn overlay_thumbnail(&mut self, source: &RgbImage, size: f32, quality: u32) {
        let (width, height) = source.dimensions();
        if size <= 0.0 || width == 0 || height == 0 {
            return;
        }

        let diagonal = (f64::from(width).powi(2) + f64::from(height).powi(2)).sqrt();
        let box_px = f64::from(size) * f64::from(self.canvas.height());
        let fit = box_px / f64::from(width.max(height));
        let scale = fit.min(f64::from(quality) / diagonal);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (tw, th) = (
            ((f64::from(width) * scale) as u32).max(1),
            ((f64::from(height) * scale) as u32).max(1),
        );
        let thumb = imageops::resize(source, tw, th, FilterType::Triangle);
        let y = i64::from(self.canvas.height()) - i64::from(th);
        imageops::overlay(&mut self.canvas, &thumb, 0, y.max(0));
    }

    /// Finishes drawing and returns the canvas.
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.canvas
    }

    /// Projects a solid point and maps it to canvas pixels.
    fn to_canvas(&self, point: SolidPoint) -> (f32, f32) {
        let view = self.camera.project(point);
        self.view_to_canvas(view.u, view.v)
    }

    /// Maps view coordinates to canvas pixels (y grows downward).
    fn view_to_canvas(&self, u: f32, v: f32) -> (f32, f32) {
        (self.center.0 + u * self.scale, self.center.1 - v * self.scale)
    }
}

/// Converts a normalized color to a canvas pixel.
fn to_pixel(color: Srgb<f32>) -> Rgb<u8> {
    let color = color.into_format::<u8>();
    Rgb([color.red, color.green, color.blue])
}

/// Fills a disc of the given radius, clipped to the canvas.
fn fill_disc(canvas: &mut RgbImage, cx: f32, cy: f32, radius: f32, pixel: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    #[allow(clippy::cast_possible_truncation)]
    let (cx_i, cy_i, r_i) = (
        cx.round() as i64,
        cy.round() as i64,
        radius.ceil() as i64,
    );
    let r_sq = radius * radius;
    for dy in -r_i..=r_i {
        for dx in -r_i..=r_i {
            if (dx * dx + dy * dy) as f32 > r_sq {
                continue;
            }
            let (x, y) = (cx_i + dx, cy_i + dy);
            if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                canvas.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}

/// Draws a 1 px line between two canvas points, clipped to the canvas.
fn draw_line(canvas: &mut RgbImage, from: (f32, f32), to: (f32, f32), pixel: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = (
            (from.0 + t * dx).round() as i64,
            (from.1 + t * dy).round() as i64,
        );
        if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            canvas.put_pixel(x as u32, y as u32, pixel);
        }
    }
}
