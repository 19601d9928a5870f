//! Model transform: translation, accumulated rotation and scale.
//!
//! Rotations compose in call order: every [`Transform::rotate`] is applied on
//! the object-space side of the rotations before it, so a per-frame spin
//! about a fixed axis simply keeps accumulating.

use crate::math::{Mat4, Vec3};

/// A 3D transform with a fluent API where mutating methods return
/// `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_translation(Vec3::new(0.0, 2.0, 0.0))
///     .rotate(Vec3::Y, 0.05)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Mat4,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Mat4::identity(),
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    /// Rotate by `angle` radians about `axis` (normalized internally).
    pub fn rotate(&mut self, axis: Vec3, angle: f32) -> &mut Self {
        self.rotation = self.rotation * Mat4::rotation(axis, angle);
        self
    }

    pub fn set_scale_uniform(&mut self, scale: f32) -> &mut Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Model matrix `T * R * S`: scale first, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.translation) * self.rotation * Mat4::scaling(self.scale)
    }
}
