//! Look-at camera.
//!
//! # Coordinate System
//!
//! Right-handed, matching the projection:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z in view space)
//!
//! The camera always faces its target. Moving the camera does not move the
//! target, so the view re-aims at it after every translation.

use crate::math::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the eye by `delta` in world space, keeping the target.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }
}
