//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point for the renderer. It owns the
//! [`Renderer`], the mesh's flattened vertex list and the mutable [`Scene`]
//! (camera, light, projection, model spin). Each frame the scene is
//! snapshotted into a [`FrameContext`], so nothing the pipeline reads can
//! change while a frame is in flight.

use std::path::Path;

use crate::camera::Camera;
use crate::config::Config;
use crate::light::PointLight;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{FrameBuffer, FrameContext, FrameStats, Renderer, Uniforms, Vertex};
use crate::transform::Transform;

/// A discrete change to the scene, usually triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneAction {
    MoveCamera(Vec3),
    MoveLight(Vec3),
    /// Field-of-view change in degrees.
    AdjustFov(f32),
    /// Snap the light onto the camera's position.
    LightToCamera,
}

/// Everything that determines the transforms and lighting of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub light: PointLight,
    pub projection: Projection,
    pub transform: Transform,
    pub rotation_axis: Vec3,
    /// Radians added per [`Engine::update`].
    pub rotation_speed: f32,
}

impl Scene {
    pub fn from_config(config: &Config) -> Self {
        let scene = &config.scene;
        let mut transform = Transform::new();
        transform
            .set_translation(scene.model_position)
            .set_scale_uniform(scene.model_scale);

        Self {
            camera: Camera::new(scene.camera_position, scene.camera_target, scene.camera_up),
            light: PointLight::new(scene.light_position()),
            projection: Projection::for_viewport(
                scene.fov_degrees,
                config.window.width,
                config.window.height,
                scene.near,
                scene.far,
            ),
            transform,
            rotation_axis: scene.rotation_axis,
            rotation_speed: scene.rotation_speed,
        }
    }

    pub fn apply(&mut self, action: SceneAction) {
        match action {
            SceneAction::MoveCamera(delta) => self.camera.translate(delta),
            SceneAction::MoveLight(delta) => self.light.position += delta,
            SceneAction::AdjustFov(delta) => self.projection.adjust_fov(delta),
            SceneAction::LightToCamera => self.light.position = self.camera.position(),
        }
    }
}

pub struct Engine {
    renderer: Renderer,
    vertices: Vec<Vertex>,
    scene: Scene,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        let renderer = Renderer::new(config.window.width, config.window.height, config.render.background)
            .with_workers(config.render.workers);

        Self {
            renderer,
            vertices: Vec::new(),
            scene: Scene::from_config(config),
        }
    }

    /// Loads an OBJ leniently; on failure the engine keeps rendering with an
    /// empty mesh. Returns whether the load succeeded.
    pub fn load_mesh<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let (mesh, loaded) = Mesh::load(path);
        self.set_mesh(&mesh);
        loaded
    }

    pub fn set_mesh(&mut self, mesh: &Mesh) {
        if mesh.is_empty() {
            log::warn!("mesh '{}' has no faces; frames will show only the background", mesh.name());
        }
        self.vertices = mesh.vertex_array();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn apply(&mut self, action: SceneAction) {
        self.scene.apply(action);
        log::trace!("{action:?}");
    }

    /// Advances the model spin by one step.
    pub fn update(&mut self) {
        let scene = &mut self.scene;
        scene.transform.rotate(scene.rotation_axis, scene.rotation_speed);
    }

    /// Snapshot of the scene for the next frame.
    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            uniforms: Uniforms {
                model: self.scene.transform.to_matrix(),
                view: self.scene.camera.view_matrix(),
                projection: self.scene.projection.matrix(),
                viewport: Mat4::viewport(self.renderer.width(), self.renderer.height()),
            },
            light: self.scene.light,
        }
    }

    pub fn render(&mut self) -> FrameStats {
        let frame = self.frame_context();
        self.renderer.render(&self.vertices, &frame)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        self.renderer.framebuffer()
    }
}
