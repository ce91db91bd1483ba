//! Contains the orbit camera used to project solid points onto the canvas.

use crate::SolidPoint;

/// A point projected into view space.
///
/// `u` grows toward screen-right and `v` toward screen-up, both in solid
/// units; `depth` grows toward the viewer and orders overlapping markers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projected {
    /// Horizontal view coordinate in solid units.
    pub u: f32,
    /// Vertical view coordinate in solid units.
    pub v: f32,
    /// Distance along the view direction; larger is closer to the viewer.
    pub depth: f32,
}

/// An orthographic camera orbiting the origin of the solid.
///
/// The camera always looks at the origin. `azimuth` rotates it around the
/// vertical axis (degrees from the +x axis toward +y) and `elevation` tilts
/// it above the equator (degrees, positive looking down from above).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Rotation around the vertical axis, in degrees.
    pub azimuth: f32,
    /// Tilt above the equatorial plane, in degrees.
    pub elevation: f32,
}

impl Camera {
    /// The initial view of a plot, matching the still export.
    pub const INITIAL: Self = Self {
        azimuth: 150.0,
        elevation: 30.0,
    };

    /// Creates a camera at the given angles, in degrees.
    #[must_use]
    pub const fn new(azimuth: f32, elevation: f32) -> Self {
        Self { azimuth, elevation }
    }

    /// Projects a solid point orthographically into view space.
    #[must_use]
    pub fn project(&self, point: SolidPoint) -> Projected {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();

        // Orthonormal view basis: forward points from the origin toward the
        // camera, right and up span the screen.
        let forward = [cos_el * cos_az, cos_el * sin_az, sin_el];
        let right = [-sin_az, cos_az, 0.0];
        let up = [-cos_az * sin_el, -sin_az * sin_el, cos_el];

        let p = [point.x, point.y, point.z];
        Projected {
            u: dot(p, right),
            v: dot(p, up),
            depth: dot(p, forward),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// The dot product of two 3-vectors.
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
