//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the vertical
//! field of view, aspect ratio and clip planes. The field of view is kept in
//! degrees since that is the unit it is configured and adjusted in.

use crate::math::Mat4;

/// Narrowest and widest field of view [`Projection::adjust_fov`] allows.
pub const MIN_FOV_DEGREES: f32 = 1.0;
pub const MAX_FOV_DEGREES: f32 = 179.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y_degrees: f32,
    /// Width divided by height.
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    pub fn new(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Projection for a `width` x `height` target.
    pub fn for_viewport(fov_y_degrees: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees, width as f32 / height as f32, z_near, z_far)
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Widens (positive) or narrows (negative) the field of view, staying
    /// within [`MIN_FOV_DEGREES`]..=[`MAX_FOV_DEGREES`].
    pub fn adjust_fov(&mut self, delta_degrees: f32) {
        self.fov_y_degrees = (self.fov_y_degrees + delta_degrees).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    /// Right-handed perspective matrix mapping the view volume to NDC
    /// `[-1, 1]` on every axis.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y(), self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn degrees_convert_to_radians() {
        let proj = Projection::new(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn aspect_ratio_is_fractional() {
        let proj = Projection::for_viewport(45.0, 800, 600, 0.01, 1000.0);
        assert_relative_eq!(proj.aspect_ratio(), 4.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn near_and_far_planes_map_to_ndc_bounds() {
        let proj = Projection::new(60.0, 1.5, 0.5, 50.0);
        let m = proj.matrix();

        let near = (m * Vec4::point(Vec3::new(0.0, 0.0, -0.5))).perspective_divide().unwrap();
        let far = (m * Vec4::point(Vec3::new(0.0, 0.0, -50.0))).perspective_divide().unwrap();
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn adjust_fov_steps_and_clamps() {
        let mut proj = Projection::new(45.0, 1.0, 0.1, 100.0);
        proj.adjust_fov(1.0);
        assert_eq!(proj.fov_y_degrees(), 46.0);

        proj.adjust_fov(-500.0);
        assert_eq!(proj.fov_y_degrees(), MIN_FOV_DEGREES);
        proj.adjust_fov(500.0);
        assert_eq!(proj.fov_y_degrees(), MAX_FOV_DEGREES);
    }
}
