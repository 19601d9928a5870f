//! Lighting types for the renderer.

use crate::math::Vec3;

/// A single point light. Its position is the only lighting state; the scene
/// moves it between frames and the rasterizer reads a copy per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl PointLight {
    pub const fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Diffuse term `dot(normal, normalize(position - surface_point))`.
    ///
    /// Not clamped: surfaces facing away give negative values. `normal` is
    /// expected to be unit length already.
    ///
    /// The rasterizer passes the pixel's barycentric weight triple as
    /// `surface_point`, not an interpolated world position.
    #[inline]
    pub fn diffuse(&self, normal: Vec3, surface_point: Vec3) -> f32 {
        let direction = (self.position - surface_point).normalize();
        normal.dot(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn facing_light_is_one() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(light.diffuse(Vec3::Z, Vec3::ZERO), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn facing_away_is_negative() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(light.diffuse(-Vec3::Z, Vec3::ZERO), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn angled_illumination() {
        let light = PointLight::new(Vec3::new(0.0, 5.0, 5.0));
        // cos(45) ≈ 0.707
        assert_relative_eq!(light.diffuse(Vec3::Y, Vec3::ZERO), 0.70710677, epsilon = 1e-5);
    }
}
