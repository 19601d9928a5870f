//! The rasterization pipeline.
//!
//! Stages, in frame order:
//! - [`shader::transform_vertices`]: vertex stage, data-parallel
//! - [`assembly::assemble_triangles`]: primitive assembly
//! - [`Rasterizer`]: coverage, interpolation and lighting
//! - [`shader::FragmentShader`]: final color
//! - [`FrameBuffer`]: storage
//!
//! [`Renderer`] runs them in sequence for one frame.

pub mod assembly;
pub mod fragment;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use fragment::Fragment;
pub use framebuffer::FrameBuffer;
pub use rasterizer::{BarycentricRasterizer, Rasterizer};
pub use renderer::{FrameContext, FrameStats, Renderer};
pub use vertex::{Triangle, Uniforms, Vertex};
