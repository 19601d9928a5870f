//! Bounding-box triangle rasterization with barycentric classification.
//!
//! # Algorithm Overview
//!
//! For each triangle:
//! 1. Compute the integer bounding box `[ceil(min)..=floor(max)]` of its
//!    screen-space vertices, limited to the framebuffer extent
//! 2. For each candidate pixel P, derive barycentric weights from one cross
//!    product
//! 3. Keep P only if it lies strictly inside the triangle
//! 4. Interpolate depth and normal, evaluate the light, emit a [`Fragment`]
//!
//! # Barycentric Weights
//!
//! With `A, B, C` the triangle and `P` the pixel:
//!
//! ```text
//! bary = (C.x - A.x, B.x - A.x, A.x - P.x) x (C.y - A.y, B.y - A.y, A.y - P.y)
//! v = bary.y / bary.z      (weight of B)
//! u = bary.x / bary.z      (weight of C)
//! w = 1 - v - u            (weight of A)
//! ```
//!
//! `bary.z` is twice the signed area of the triangle and does not depend on
//! P. When `|bary.z| < 1` the triangle is treated as degenerate and covers
//! nothing. Both windings classify the same pixels because the sign of
//! `bary.z` cancels in the ratios.
//!
//! # Coverage Rules
//!
//! - A pixel is interior only if all three weights are at least
//!   [`INTERIOR_EPSILON`]. Pixels exactly on an edge or a vertex are
//!   excluded, so two triangles sharing an edge both leave that edge's
//!   pixels unfilled.
//! - The extent test rejects `x < 0`, `y < 0`, `x > width` and `y > height`.
//!   The high bound is inclusive of `width`/`height` themselves; those
//!   fragments are emitted here and dropped at the framebuffer write.
//! - Pixel coordinates are integer corners, not pixel centers.
//!
//! # Lighting
//!
//! The light direction is `normalize(light - (w, v, u))`: the weight triple
//! itself stands in for the surface point. This is not an interpolated
//! world-space position and the resulting shading does not track the
//! geometry's actual location relative to the light. It is kept as is so
//! renders stay comparable with existing output; interpolating the three
//! vertices' world positions with the same weights would be the physically
//! meaningful replacement.

use super::Rasterizer;
use crate::color::{Color, WHITE};
use crate::light::PointLight;
use crate::math::Vec3;
use crate::render::fragment::Fragment;
use crate::render::vertex::Triangle;

/// Minimum weight for a pixel to count as inside the triangle.
pub const INTERIOR_EPSILON: f32 = 1e-10;

/// Below this absolute doubled area a triangle covers no pixels.
pub const DEGENERATE_AREA: f32 = 1.0;

/// Barycentric weights `[w, v, u]` of pixel `(px, py)` for vertices
/// `A, B, C`, or `None` when the triangle is degenerate.
///
/// Weights are returned for any pixel in the triangle's plane, including
/// pixels outside it; classification is up to the caller.
#[inline]
pub fn barycentric(px: i32, py: i32, a: Vec3, b: Vec3, c: Vec3) -> Option<[f32; 3]> {
    let bary = Vec3::new(c.x - a.x, b.x - a.x, a.x - px as f32)
        .cross(Vec3::new(c.y - a.y, b.y - a.y, a.y - py as f32));

    if bary.z.abs() < DEGENERATE_AREA {
        return None;
    }

    let v = bary.y / bary.z;
    let u = bary.x / bary.z;
    Some([1.0 - v - u, v, u])
}

/// Triangle rasterizer for one frame.
///
/// Holds the frame-immutable inputs the per-pixel work needs: the target
/// extent and a snapshot of the light.
#[derive(Clone, Copy, Debug)]
pub struct BarycentricRasterizer {
    width: u32,
    height: u32,
    light: PointLight,
    base_color: Color,
}

impl BarycentricRasterizer {
    pub fn new(width: u32, height: u32, light: PointLight) -> Self {
        Self {
            width,
            height,
            light,
            base_color: WHITE,
        }
    }

    /// Inclusive scan range for one axis, limited to `[0, extent]`.
    ///
    /// Limiting the loop bounds selects exactly the pixels the per-pixel
    /// `< 0` / `> extent` rejection would keep, without walking a bounding
    /// box that can be far larger than the screen.
    #[inline]
    fn scan_range(min: f32, max: f32, extent: u32) -> (i32, i32) {
        let start = (min.ceil() as i32).max(0);
        let end = (max.floor() as i32).min(extent as i32);
        (start, end)
    }
}

impl Rasterizer for BarycentricRasterizer {
    fn rasterize_triangle(&self, triangle: &Triangle, out: &mut Vec<Fragment>) {
        let [a, b, c] = &triangle.vertices;
        let (pa, pb, pc) = (a.position, b.position, c.position);

        let (x0, x1) = Self::scan_range(
            pa.x.min(pb.x).min(pc.x),
            pa.x.max(pb.x).max(pc.x),
            self.width,
        );
        let (y0, y1) = Self::scan_range(
            pa.y.min(pb.y).min(pc.y),
            pa.y.max(pb.y).max(pc.y),
            self.height,
        );

        for y in y0..=y1 {
            for x in x0..=x1 {
                let Some([w, v, u]) = barycentric(x, y, pa, pb, pc) else {
                    // Degenerate for every pixel alike.
                    return;
                };

                if w < INTERIOR_EPSILON || v < INTERIOR_EPSILON || u < INTERIOR_EPSILON {
                    continue;
                }

                let depth = pa.z * w + pb.z * v + pc.z * u;
                let normal = (a.normal * w + b.normal * v + c.normal * u).normalize();
                let intensity = self.light.diffuse(normal, Vec3::new(w, v, u));

                out.push(Fragment::new(x, y, depth, self.base_color, intensity));
            }
        }
    }
}
