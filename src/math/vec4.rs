//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from a Vec3.
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Convert to Vec3, discarding w.
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Perspective division: `xyz / w`.
    ///
    /// Returns `None` when w is exactly zero, where the divide is undefined.
    pub fn perspective_divide(self) -> Option<Vec3> {
        if self.w == 0.0 {
            return None;
        }
        Some(self.xyz() / self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_divide_scales_by_w() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0);
        assert_eq!(v.perspective_divide(), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn perspective_divide_rejects_zero_w() {
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 0.0).perspective_divide(), None);
    }
}
