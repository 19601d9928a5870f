//! Per-vertex pipeline data and the per-frame uniform block.

use crate::math::{Mat4, Vec2, Vec3};

/// A mesh vertex. Before the vertex stage the position is in model space;
/// after it the position is in screen pixels (z carries viewport depth) and
/// the normal is a unit vector in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: Vec2::ZERO,
        }
    }

    pub const fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv;
        self
    }
}

/// The transform chain a frame is rendered with.
///
/// Built once per frame by the camera/transform side and only read by the
/// pipeline, so it can be shared by reference across vertex-stage workers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub viewport: Mat4,
}

/// A screen-space triangle, vertices in submission order (A, B, C).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}
