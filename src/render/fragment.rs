//! Rasterizer output: one candidate pixel with its depth and light term.

use crate::color::Color;

/// A candidate pixel produced by the rasterizer.
///
/// `intensity` is the raw diffuse term and is deliberately unclamped: it can
/// be negative for surfaces facing away from the light or exceed 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub color: Color,
    pub intensity: f32,
}

impl Fragment {
    pub const fn new(x: i32, y: i32, depth: f32, color: Color, intensity: f32) -> Self {
        Self {
            x,
            y,
            depth,
            color,
            intensity,
        }
    }
}
