//! Contains the fixed-stride decimation of an image into a bounded,
//! plottable set of colors.
//!
//! Sampling is deterministic: a grid with a stride derived from the image
//! dimensions and the point budget is walked in raster order, and the pixel
//! at each cell center is kept unless it is white. Results are therefore
//! reproducible, and both runtime and output size scale predictably with
//! image size and budget, independent of image content.

use image::RgbImage;
use palette::Srgb;

use crate::PointBudget;

/// Channel tolerance for treating a normalized color as pure white.
///
/// For 8-bit sources only (255, 255, 255) falls within this tolerance.
const WHITE_TOLERANCE: f32 = 1e-4;

/// Computes the sampling stride for an image of the given dimensions:
/// `⌊(height + width) / √budget / 2⌋`, clamped to at least `1`.
///
/// The clamp keeps tiny images (down to 1×1) sampleable; without it the
/// stride would truncate to zero whenever `height + width < 2·√budget`.
#[must_use]
pub fn stride(width: u32, height: u32, budget: PointBudget) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let spd = ((f64::from(height) + f64::from(width)) / f64::from(budget.into_inner()).sqrt()
        / 2.0) as u32;
    spd.max(1)
}

/// The bounded set of non-white colors extracted from an image for plotting.
///
/// Colors are stored normalized to `[0, 1]` in raster scan order (row-major,
/// top-to-bottom, left-to-right). White pixels are excluded entirely; they
/// read as background, not as data points.
///
/// # Examples
/// ```no_run
/// # use hlsphere::{PointBudget, SampledColors};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let samples = SampledColors::from_image(&img, PointBudget::default());
/// println!("{} colors at stride {}", samples.len(), samples.stride());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampledColors {
    /// The retained colors in raster scan order.
    colors: Vec<Srgb<f32>>,
    /// The grid step, in pixels, the image was walked with.
    stride: u32,
    /// The walked grid as (rows, columns); its product is the upper bound
    /// on the number of retained colors.
    grid: (u32, u32),
}

impl SampledColors {
    /// Decimates `image` on a fixed grid sized for `budget` points.
    ///
    /// Each grid cell contributes the pixel at its center,
    /// `(⌊(r+0.5)·spd⌋, ⌊(c+0.5)·spd⌋)`, normalized to `[0, 1]`; samples
    /// within the white tolerance of pure white are dropped. The output
    /// count is only approximately `budget` and shrinks with the image's
    /// white fraction.
    #[must_use]
    pub fn from_image(image: &RgbImage, budget: PointBudget) -> Self {
        let (width, height) = image.dimensions();
        let spd = stride(width, height, budget);
        let rows = height / spd;
        let cols = width / spd;

        let mut colors = Vec::with_capacity(rows as usize * cols as usize);
        for r in 0..rows {
            for c in 0..cols {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let y = ((f64::from(r) + 0.5) * f64::from(spd)) as u32;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let x = ((f64::from(c) + 0.5) * f64::from(spd)) as u32;
                let [red, green, blue] = image.get_pixel(x, y).0;
                let color = Srgb::new(red, green, blue).into_format::<f32>();
                if !is_near_white(color) {
                    colors.push(color);
                }
            }
        }

        Self {
            colors,
            stride: spd,
            grid: (rows, cols),
        }
    }

    /// The retained colors in raster scan order.
    #[must_use]
    pub fn colors(&self) -> &[Srgb<f32>] {
        &self.colors
    }

    /// The grid step, in pixels, the image was walked with.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// The walked grid as (rows, columns).
    #[must_use]
    pub const fn grid(&self) -> (u32, u32) {
        self.grid
    }

    /// The number of retained colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no colors were retained (e.g., an all-white image).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Whether every channel of `color` is within [`WHITE_TOLERANCE`] of `1.0`.
fn is_near_white(color: Srgb<f32>) -> bool {
    1.0 - color.red <= WHITE_TOLERANCE
        && 1.0 - color.green <= WHITE_TOLERANCE
        && 1.0 - color.blue <= WHITE_TOLERANCE
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn stride_never_hits_zero() {
        assert_eq!(stride(1, 1, PointBudget::DEFAULT), 1);
        assert_eq!(stride(0, 0, PointBudget::DEFAULT), 1);
        assert_eq!(stride(1, 1, PointBudget::from_clamped(1)), 1);
    }

    #[test]
    fn stride_matches_the_documented_example() {
        // 100×100 at a budget of 4096: ⌊200 / 64 / 2⌋ = 1.
        assert_eq!(stride(100, 100, PointBudget::DEFAULT), 1);
    }

    #[test]
    fn stride_floors() {
        // 1000×1000 at a budget of 4096: ⌊2000 / 64 / 2⌋ = ⌊15.625⌋ = 15.
        assert_eq!(stride(1000, 1000, PointBudget::DEFAULT), 15);
    }

    #[test]
    fn solid_color_image_keeps_every_grid_cell() {
        let image = solid_image(100, 100, [200, 40, 40]);
        let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
        assert_eq!(samples.stride(), 1);
        assert_eq!(samples.grid(), (100, 100));
        assert_eq!(samples.len(), 100 * 100);
        let expected = Srgb::new(200u8, 40, 40).into_format::<f32>();
        assert!(samples.colors().iter().all(|&c| c == expected));
    }

    #[test]
    fn all_white_image_yields_nothing() {
        let image = solid_image(64, 64, [255, 255, 255]);
        let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
        assert!(samples.is_empty());
    }

    #[test]
    fn near_white_8bit_values_are_kept() {
        // (254, 255, 255) normalizes outside the white tolerance.
        let image = solid_image(8, 8, [254, 255, 255]);
        let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
        assert_eq!(samples.len(), 64);
    }

    #[test]
    fn samples_come_out_in_raster_order() {
        // Two rows: red on top, blue below; stride 1 keeps the row order.
        let mut image = solid_image(3, 2, [255, 0, 0]);
        for x in 0..3 {
            image.put_pixel(x, 1, Rgb([0, 0, 255]));
        }
        let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
        let red = Srgb::new(255u8, 0, 0).into_format::<f32>();
        let blue = Srgb::new(0u8, 0, 255).into_format::<f32>();
        assert_eq!(samples.colors(), [red, red, red, blue, blue, blue]);
    }

    #[test]
    fn one_by_one_image_is_sampled() {
        let image = solid_image(1, 1, [0, 128, 0]);
        let samples = SampledColors::from_image(&image, PointBudget::DEFAULT);
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn grid_cell_centers_stay_in_bounds() {
        // 37×23 with a budget small enough to force a stride above 1.
        let image = solid_image(37, 23, [10, 20, 30]);
        let budget = PointBudget::from_clamped(16);
        let samples = SampledColors::from_image(&image, budget);
        let spd = stride(37, 23, budget);
        assert!(spd > 1);
        assert_eq!(samples.len() as u32, (23 / spd) * (37 / spd));
    }
}
