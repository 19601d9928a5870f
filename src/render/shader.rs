//! Vertex and fragment stages.
//!
//! Both are plain per-element functions, the CPU counterpart of the
//! programmable stages on a GPU:
//!
//! - the vertex stage maps a model-space [`Vertex`] to screen space and
//!   carries its normal into world space;
//! - the fragment stage resolves a rasterized [`Fragment`] to its final
//!   color.
//!
//! The vertex stage is a pure function of `(vertex, uniforms)`, which is what
//! makes [`transform_vertices`] safe to split across threads without locks:
//! workers read the shared uniforms and write disjoint output slots.

use std::num::NonZeroUsize;
use std::thread;

use super::fragment::Fragment;
use super::vertex::{Uniforms, Vertex};
use crate::math::Vec4;

/// Below this many vertices per worker, spawning threads costs more than it
/// saves.
const MIN_VERTICES_PER_WORKER: usize = 256;

/// Transform one vertex into screen space.
///
/// Position: `viewport * ndc(projection * view * model * p)`.
/// Normal: upper 3x3 of `model` only, then re-normalized.
///
/// Returns `None` when the vertex cannot be placed on screen: clip-space w is
/// exactly zero, or the divide produced a non-finite coordinate. Triangles
/// that reference such a vertex are dropped after assembly.
#[inline]
pub fn vertex_shader(vertex: &Vertex, uniforms: &Uniforms) -> Option<Vertex> {
    let world = uniforms.model * Vec4::point(vertex.position);
    let clip = uniforms.projection * (uniforms.view * world);
    let ndc = clip.perspective_divide()?;
    let screen = (uniforms.viewport * Vec4::point(ndc)).xyz();
    if !screen.is_finite() {
        return None;
    }

    let normal = uniforms.model.transform_vector(vertex.normal).normalize();

    Some(Vertex {
        position: screen,
        normal,
        uv: vertex.uv,
    })
}

/// Run the vertex stage over a whole vertex array.
///
/// The output has one slot per input vertex, in input order, regardless of
/// `workers`. `workers == 0` uses the available hardware parallelism.
pub fn transform_vertices(
    vertices: &[Vertex],
    uniforms: &Uniforms,
    workers: usize,
) -> Vec<Option<Vertex>> {
    let mut transformed = vec![None; vertices.len()];

    let workers = resolve_workers(workers)
        .min(vertices.len().div_ceil(MIN_VERTICES_PER_WORKER))
        .max(1);

    if workers == 1 {
        shade_into(vertices, &mut transformed, uniforms);
        return transformed;
    }

    let chunk = vertices.len().div_ceil(workers);
    thread::scope(|scope| {
        for (input, output) in vertices.chunks(chunk).zip(transformed.chunks_mut(chunk)) {
            scope.spawn(move || shade_into(input, output, uniforms));
        }
    });

    transformed
}

/// Number of vertex-stage workers for a configured value (`0` = automatic).
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn shade_into(input: &[Vertex], output: &mut [Option<Vertex>], uniforms: &Uniforms) {
    for (slot, vertex) in output.iter_mut().zip(input) {
        *slot = vertex_shader(vertex, uniforms);
    }
}

/// Per-fragment color resolution.
pub trait FragmentShader {
    fn shade(&self, fragment: Fragment) -> Fragment;
}

/// Scales the base color by the fragment's light intensity.
///
/// r, g and b are multiplied by the raw intensity; alpha is kept. Saturation
/// happens at the channel boundary, see [`Color::scaled`].
///
/// [`Color::scaled`]: crate::color::Color::scaled
#[derive(Clone, Copy, Debug, Default)]
pub struct LightingShader;

impl FragmentShader for LightingShader {
    #[inline]
    fn shade(&self, fragment: Fragment) -> Fragment {
        Fragment {
            color: fragment.color.scaled(fragment.intensity),
            ..fragment
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, WHITE};
    use crate::math::{Mat4, Vec3};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn scene_uniforms() -> Uniforms {
        Uniforms {
            model: Mat4::rotation(Vec3::Y, 0.4),
            view: Mat4::look_at_rh(Vec3::new(1.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.01, 1000.0),
            viewport: Mat4::viewport(800, 600),
        }
    }

    #[test]
    fn identity_chain_maps_ndc_to_pixels() {
        let uniforms = Uniforms {
            viewport: Mat4::viewport(100, 50),
            ..Uniforms::default()
        };
        let v = Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z);

        let out = vertex_shader(&v, &uniforms).unwrap();
        assert_eq!(out.position, Vec3::new(50.0, 25.0, 0.25));
    }

    #[test]
    fn normal_uses_model_rotation_only() {
        let uniforms = Uniforms {
            model: Mat4::translation(Vec3::splat(3.0)) * Mat4::rotation(Vec3::Y, FRAC_PI_2),
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
            viewport: Mat4::viewport(10, 10),
        };
        let v = Vertex::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));

        let out = vertex_shader(&v, &uniforms).unwrap();
        assert_relative_eq!(out.normal.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(out.normal.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(out.normal.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_w_is_degenerate() {
        // The camera sits on the vertex's plane: view-space z = 0 gives w = 0.
        let uniforms = Uniforms {
            projection: Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
            ..Uniforms::default()
        };
        let v = Vertex::new(Vec3::new(1.0, 1.0, 0.0), Vec3::Z);
        assert_eq!(vertex_shader(&v, &uniforms), None);
    }

    #[test]
    fn uv_passes_through_untouched() {
        let uv = crate::math::Vec2::new(0.25, 0.75);
        let v = Vertex::new(Vec3::ZERO, Vec3::Z).with_uv(uv);
        let out = vertex_shader(&v, &scene_uniforms()).unwrap();
        assert_eq!(out.uv, uv);
    }

    #[test]
    fn parallel_stage_matches_sequential() {
        let uniforms = scene_uniforms();
        let vertices: Vec<Vertex> = (0..5000)
            .map(|i| {
                let t = i as f32 * 0.01;
                Vertex::new(
                    Vec3::new(t.sin(), t.cos(), (t * 0.3).sin()),
                    Vec3::new(t.cos(), 1.0, t.sin()),
                )
            })
            .collect();

        let sequential = transform_vertices(&vertices, &uniforms, 1);
        for workers in [2, 3, 8, 0] {
            assert_eq!(transform_vertices(&vertices, &uniforms, workers), sequential);
        }
        assert_eq!(sequential.len(), vertices.len());
        assert_eq!(sequential[17], vertex_shader(&vertices[17], &uniforms));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(transform_vertices(&[], &scene_uniforms(), 4).is_empty());
    }

    #[test]
    fn resolve_workers_honours_explicit_count() {
        assert_eq!(resolve_workers(3), 3);
        assert!(resolve_workers(0) >= 1);
    }

    #[test]
    fn lighting_multiplies_rgb_by_intensity() {
        let base = Color::new(200, 100, 50, 255);
        let f = Fragment::new(1, 1, 0.0, base, 0.5);
        let out = LightingShader.shade(f);
        assert_eq!(out.color, Color::new(100, 50, 25, 255));
        assert_eq!((out.x, out.y, out.depth, out.intensity), (1, 1, 0.0, 0.5));
    }

    #[test]
    fn lighting_saturates_out_of_range_intensity() {
        let dark = LightingShader.shade(Fragment::new(0, 0, 0.0, WHITE, -0.3));
        let bright = LightingShader.shade(Fragment::new(0, 0, 0.0, Color::new(100, 150, 200, 9), 1.5));
        assert_eq!(dark.color, Color::new(0, 0, 0, 255));
        assert_eq!(bright.color, Color::new(150, 225, 255, 9));
    }
}
