//! Contains the mapping from colors to points on the HLS color solid.
//!
//! The solid is the conventional double cone ("bi-hexcone"): hue is the
//! azimuthal angle, lightness the polar angle, and saturation the radius.
//! Black sits at the south pole (z = −1), white at the north pole (z = +1),
//! and the fully saturated hues form the unit circle on the equator.

use std::f32::consts::PI;

use palette::{FromColor, Hsl, Srgb};

/// The number of points in the decorative hue ring.
pub const HUE_RING_POINTS: usize = 36;

/// A 3D Cartesian coordinate on or inside the HLS solid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolidPoint {
    /// Horizontal coordinate, `s · sin(2π·h) · sin(π·l)`.
    pub x: f32,
    /// Horizontal coordinate, `s · cos(2π·h) · sin(π·l)`.
    pub y: f32,
    /// Vertical coordinate, `−cos(π·l)`; −1 for black, +1 for white.
    pub z: f32,
}

/// Maps a color to its point on the HLS solid.
///
/// The color is converted to HLS, then hue becomes the azimuthal angle,
/// lightness the polar angle, and saturation scales the radius. The result
/// always satisfies `x² + y² ≤ sin²(π·l)` and `−1 ≤ z ≤ 1`.
///
/// Defined for the full input range; pure grays (saturation `0`) map onto
/// the vertical axis regardless of their meaningless hue, because the
/// saturation scales their radius to zero.
#[must_use]
pub fn solid_point(color: Srgb<f32>) -> SolidPoint {
    let hls: Hsl = Hsl::from_color(color);
    let azimuth = hls.hue.into_positive_degrees().to_radians();
    let polar = PI * hls.lightness;
    SolidPoint {
        x: hls.saturation * azimuth.sin() * polar.sin(),
        y: hls.saturation * azimuth.cos() * polar.sin(),
        z: -polar.cos(),
    }
}

/// Returns the decorative hue ring: [`HUE_RING_POINTS`] evenly spaced hues
/// at lightness `0.5` and saturation `1.0`, paired with their solid points.
///
/// The ring traces the equator of the solid and serves as a fixed reference
/// circle in every plot.
#[must_use]
pub fn hue_ring() -> Vec<(Srgb<f32>, SolidPoint)> {
    (0..HUE_RING_POINTS)
        .map(|i| {
            let degrees = 360.0 * i as f32 / HUE_RING_POINTS as f32;
            let color: Srgb = Srgb::from_color(Hsl::new(degrees, 1.0, 0.5));
            (color, solid_point(color))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn poles_are_fixed() {
        // White is the north pole, black the south pole.
        let white = solid_point(Srgb::new(1.0, 1.0, 1.0));
        assert!((white.z - 1.0).abs() < EPS);
        assert!(white.x.abs() < EPS && white.y.abs() < EPS);

        let black = solid_point(Srgb::new(0.0, 0.0, 0.0));
        assert!((black.z + 1.0).abs() < EPS);
        assert!(black.x.abs() < EPS && black.y.abs() < EPS);
    }

    #[test]
    fn grays_lie_on_the_vertical_axis() {
        for v in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let p = solid_point(Srgb::new(v, v, v));
            assert!(p.x.abs() < EPS && p.y.abs() < EPS, "gray {v} off axis");
        }
    }

    #[test]
    fn saturated_primaries_sit_on_the_equator() {
        // Fully saturated hues at lightness 0.5: radius 1, z = 0.
        for color in [
            Srgb::new(1.0, 0.0, 0.0),
            Srgb::new(0.0, 1.0, 0.0),
            Srgb::new(0.0, 0.0, 1.0),
        ] {
            let p = solid_point(color);
            let radius = (p.x * p.x + p.y * p.y).sqrt();
            assert!((radius - 1.0).abs() < EPS);
            assert!(p.z.abs() < EPS);
        }
    }

    #[test]
    fn output_stays_inside_the_double_cone() {
        // Sweep a coarse grid over the whole RGB cube.
        for r in 0..=8 {
            for g in 0..=8 {
                for b in 0..=8 {
                    let color = Srgb::new(r as f32 / 8.0, g as f32 / 8.0, b as f32 / 8.0);
                    let hls: Hsl = Hsl::from_color(color);
                    let l = hls.lightness;
                    let p = solid_point(color);
                    let radius_sq = p.x * p.x + p.y * p.y;
                    let max_radius = (PI * l).sin();
                    assert!(radius_sq <= max_radius * max_radius + EPS);
                    assert!((-1.0 - EPS..=1.0 + EPS).contains(&p.z));
                }
            }
        }
    }

    #[test]
    fn hue_ring_has_36_even_points() {
        let ring = hue_ring();
        assert_eq!(ring.len(), HUE_RING_POINTS);
        for (color, point) in &ring {
            let hls: Hsl = Hsl::from_color(*color);
            assert!((hls.saturation - 1.0).abs() < EPS);
            assert!((hls.lightness - 0.5).abs() < EPS);
            assert!(point.z.abs() < EPS);
            let radius = (point.x * point.x + point.y * point.y).sqrt();
            assert!((radius - 1.0).abs() < EPS);
        }
        // Evenly spaced: consecutive points subtend equal angles.
        let angle = |p: &SolidPoint| p.x.atan2(p.y);
        let step = 2.0 * PI / HUE_RING_POINTS as f32;
        for pair in ring.windows(2) {
            let mut delta = angle(&pair[1].1) - angle(&pair[0].1);
            if delta < 0.0 {
                delta += 2.0 * PI;
            }
            assert!((delta - step).abs() < 1e-3);
        }
    }
}
