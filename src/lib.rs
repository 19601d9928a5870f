//! A CPU software rasterization pipeline.
//!
//! Vertices are transformed in parallel, assembled into triangles,
//! rasterized with barycentric coverage, lit by a single point light and
//! written into an RGBA framebuffer. SDL2 is used only to put the finished
//! frame on screen; all rendering happens on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use softpipe::prelude::*;
//!
//! let config = Config::default();
//! let mut engine = Engine::new(&config);
//! engine.load_mesh("nave2.obj");
//! engine.update();
//! engine.render();
//! engine.framebuffer().to_rgba_image().save("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod color;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod transform;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::{Config, ConfigError};
pub use engine::{Engine, Scene, SceneAction};
pub use mesh::{LoadError, Mesh};
pub use projection::Projection;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::color::Color;
    pub use crate::config::Config;
    pub use crate::engine::{Engine, Scene, SceneAction};
    pub use crate::light::PointLight;
    pub use crate::mesh::Mesh;
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;

    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};

    pub use crate::render::{FrameBuffer, FrameContext, FrameStats, Renderer, Uniforms, Vertex};

    pub use crate::window::{Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::light::PointLight;
    pub use crate::render::shader::transform_vertices;
    pub use crate::render::{
        BarycentricRasterizer, Fragment, FrameContext, Rasterizer, Renderer, Triangle, Uniforms,
        Vertex,
    };
}
