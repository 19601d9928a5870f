//! Frame orchestration.
//!
//! Provides the [`Renderer`] struct which owns the framebuffer and drives one
//! frame through every stage:
//!
//! ```text
//! clear -> vertex stage (parallel) -> assembly -> rasterize -> fragment stage -> write
//! ```
//!
//! Everything after the vertex stage runs on the calling thread. Fragments
//! are written in the order they were produced and there is no depth test,
//! so where triangles overlap the one submitted last is what remains.

use std::time::{Duration, Instant};

use super::assembly::assemble_triangles;
use super::framebuffer::FrameBuffer;
use super::rasterizer::{BarycentricRasterizer, Rasterizer};
use super::shader::{transform_vertices, FragmentShader, LightingShader};
use super::vertex::{Uniforms, Vertex};
use crate::color::Color;
use crate::light::PointLight;

/// Frame-immutable inputs, snapshot from the scene before a frame starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub uniforms: Uniforms,
    pub light: PointLight,
}

/// What one frame did. Purely informational.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub vertices: usize,
    pub triangles: usize,
    pub fragments: usize,
    pub pixels_written: usize,
    /// Fragments on the framebuffer's high edge (`x == width` or
    /// `y == height`), which the rasterizer admits but no pixel exists for.
    pub clipped: usize,
    pub elapsed: Duration,
}

pub struct Renderer {
    framebuffer: FrameBuffer,
    background: Color,
    workers: usize,
    shader: LightingShader,
}

impl Renderer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height, background),
            background,
            workers: 0,
            shader: LightingShader,
        }
    }

    /// Vertex-stage worker count; `0` picks the available parallelism.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Render one frame of `vertices` into the framebuffer.
    ///
    /// `vertices` is a flat triangle list: every three consecutive vertices
    /// form one triangle. A list whose length is not a multiple of 3 renders
    /// nothing.
    pub fn render(&mut self, vertices: &[Vertex], frame: &FrameContext) -> FrameStats {
        let start = Instant::now();

        self.framebuffer.clear(self.background);

        let transformed = transform_vertices(vertices, &frame.uniforms, self.workers);
        let triangles = assemble_triangles(&transformed);

        let rasterizer = BarycentricRasterizer::new(self.width(), self.height(), frame.light);
        let fragments = rasterizer.rasterize(&triangles);

        let mut stats = FrameStats {
            vertices: vertices.len(),
            triangles: triangles.len(),
            fragments: fragments.len(),
            ..FrameStats::default()
        };

        for fragment in fragments {
            let shaded = self.shader.shade(fragment);
            if !self.framebuffer.contains(shaded.x, shaded.y) {
                stats.clipped += 1;
                continue;
            }
            self.framebuffer.set_pixel(shaded.x, shaded.y, shaded.color);
            stats.pixels_written += 1;
        }

        stats.elapsed = start.elapsed();
        log::trace!(
            "frame: {} vertices, {} triangles, {} fragments, {} written, {} clipped",
            stats.vertices,
            stats.triangles,
            stats.fragments,
            stats.pixels_written,
            stats.clipped
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};
    use crate::math::{Mat4, Vec3};

    const BLUE: Color = Color::rgb(0, 0, 255);

    /// All-identity uniforms: vertex positions are already pixel coordinates.
    fn screen_space(light: Vec3) -> FrameContext {
        FrameContext {
            uniforms: Uniforms::default(),
            light: PointLight::new(light),
        }
    }

    fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32), z: f32, normal: Vec3) -> [Vertex; 3] {
        [a, b, c].map(|(x, y)| Vertex::new(Vec3::new(x, y, z), normal))
    }

    #[test]
    fn empty_mesh_leaves_background() {
        let mut renderer = Renderer::new(8, 8, BLUE).with_workers(1);
        let stats = renderer.render(&[], &screen_space(Vec3::Z));

        assert_eq!(stats, FrameStats { elapsed: stats.elapsed, ..FrameStats::default() });
        assert!(renderer.framebuffer().pixels().iter().all(|&c| c == BLUE));
    }

    #[test]
    fn malformed_stream_renders_nothing() {
        let mut vertices = tri((0.0, 0.0), (6.0, 0.0), (0.0, 6.0), 0.0, Vec3::Z).to_vec();
        vertices.push(vertices[0]);

        let mut renderer = Renderer::new(8, 8, BLUE);
        let stats = renderer.render(&vertices, &screen_space(Vec3::new(0.0, 0.0, 10.0)));

        assert_eq!(stats.triangles, 0);
        assert!(renderer.framebuffer().pixels().iter().all(|&c| c == BLUE));
    }

    #[test]
    fn lit_triangle_is_written() {
        let vertices = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), 0.0, Vec3::Z);
        let mut renderer = Renderer::new(8, 8, BLUE);
        let stats = renderer.render(&vertices, &screen_space(Vec3::new(0.0, 0.0, 10.0)));

        assert_eq!(stats.pixels_written, 3);
        let c = renderer.framebuffer().get_pixel(1, 1).unwrap();
        assert!(c.r > 200 && c.r == c.g && c.g == c.b);
        // Edge pixel stays background.
        assert_eq!(renderer.framebuffer().get_pixel(1, 0), Some(BLUE));
    }

    #[test]
    fn last_submitted_triangle_wins_regardless_of_depth() {
        let mut vertices = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), -5.0, Vec3::Z).to_vec();
        // Same footprint, further away, facing away from the light.
        vertices.extend(tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), 5.0, -Vec3::Z));

        let mut renderer = Renderer::new(8, 8, BLUE);
        renderer.render(&vertices, &screen_space(Vec3::new(0.0, 0.0, 10.0)));

        assert_eq!(renderer.framebuffer().get_pixel(1, 1), Some(BLACK));
    }

    #[test]
    fn high_edge_fragments_are_dropped_not_clamped() {
        let vertices = tri((-5.0, -5.0), (40.0, -5.0), (-5.0, 40.0), 0.0, Vec3::Z);
        let mut renderer = Renderer::new(10, 10, BLUE);
        let stats = renderer.render(&vertices, &screen_space(Vec3::new(0.0, 0.0, 10.0)));

        // 11x11 candidates, the row y == 10 and the column x == 10 are off-buffer.
        assert_eq!(stats.fragments, 121);
        assert_eq!(stats.clipped, 21);
        assert_eq!(stats.pixels_written, 100);
    }

    #[test]
    fn rendering_is_deterministic() {
        let frame = FrameContext {
            uniforms: Uniforms {
                model: Mat4::rotation(Vec3::Y, 0.7),
                view: Mat4::look_at_rh(Vec3::new(2.0, 3.0, 4.0), Vec3::ZERO, Vec3::Y),
                projection: Mat4::perspective_rh(45f32.to_radians(), 1.0, 0.01, 1000.0),
                viewport: Mat4::viewport(64, 64),
            },
            light: PointLight::new(Vec3::new(2.0, 3.0, 4.0)),
        };
        let mut vertices = tri((-1.0, -1.0), (1.0, -1.0), (0.0, 1.0), 0.0, Vec3::Z).to_vec();
        vertices.extend(tri((-1.0, 0.0), (1.0, 0.5), (0.5, -1.0), 0.5, Vec3::new(0.3, 0.2, 1.0)));

        let mut renderer = Renderer::new(64, 64, BLACK).with_workers(4);
        renderer.render(&vertices, &frame);
        let first = renderer.framebuffer().clone();
        renderer.render(&vertices, &frame);

        assert_eq!(renderer.framebuffer(), &first);
        assert!(first.pixels().iter().any(|&c| c != BLACK));
        assert_eq!(first.to_argb8888_flipped(), renderer.framebuffer().to_argb8888_flipped());
    }

    #[test]
    fn clear_runs_every_frame() {
        let vertices = tri((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), 0.0, Vec3::Z);
        let mut renderer = Renderer::new(8, 8, BLUE);
        renderer.render(&vertices, &screen_space(Vec3::new(0.0, 0.0, 10.0)));
        renderer.render(&[], &screen_space(Vec3::Z));

        assert_eq!(renderer.framebuffer().get_pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let frame = FrameContext {
            uniforms: Uniforms {
                view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y),
                projection: Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0),
                viewport: Mat4::viewport(48, 48),
                ..Uniforms::default()
            },
            light: PointLight::new(Vec3::new(0.0, 0.0, 3.0)),
        };
        let vertices: Vec<Vertex> = (0..900)
            .flat_map(|i| {
                let x = (i % 30) as f32 / 15.0 - 1.0;
                let y = (i / 30) as f32 / 15.0 - 1.0;
                tri((x, y), (x + 0.2, y), (x, y + 0.2), 0.0, Vec3::Z)
            })
            .collect();

        let mut single = Renderer::new(48, 48, WHITE).with_workers(1);
        let mut many = Renderer::new(48, 48, WHITE).with_workers(6);
        single.render(&vertices, &frame);
        many.render(&vertices, &frame);

        assert_eq!(single.framebuffer(), many.framebuffer());
    }
}
