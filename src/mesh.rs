//! Mesh loading from Wavefront OBJ files.
//!
//! Parsing is delegated to `tobj` with separate index streams, so positions,
//! normals and texture coordinates keep their own indexing exactly as in the
//! file. All objects and groups in a file are merged into one [`Mesh`].
//!
//! The pipeline consumes a flat triangle list, see [`Mesh::vertex_array`].

use std::io::BufReader;
use std::path::Path;

use thiserror::Error;

use crate::math::{Vec2, Vec3};
use crate::render::Vertex;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
}

/// One corner of a face: indices into the mesh's attribute arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub normal: Option<usize>,
    pub tex_coord: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [FaceVertex; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
    faces: Vec<Face>,
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

impl Mesh {
    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load a mesh from an OBJ file. Materials are not read.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        Ok(Self::from_models(mesh_name(path), models))
    }

    /// Parse OBJ text held in memory. `mtllib` references are ignored.
    pub fn from_obj_source(name: impl Into<String>, source: &str) -> Result<Self, LoadError> {
        let mut reader = BufReader::new(source.as_bytes());
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Ok(Self::from_models(name.into(), models))
    }

    /// Lenient loading: a failed load is logged and yields an empty mesh.
    ///
    /// The flag reports whether the load succeeded. Rendering an empty mesh
    /// is valid and simply produces background-only frames.
    pub fn load<P: AsRef<Path>>(path: P) -> (Self, bool) {
        let path = path.as_ref();
        match Self::from_obj(path) {
            Ok(mesh) => {
                log::info!(
                    "loaded '{}': {} positions, {} normals, {} faces",
                    path.display(),
                    mesh.positions.len(),
                    mesh.normals.len(),
                    mesh.faces.len()
                );
                (mesh, true)
            }
            Err(e) => {
                log::warn!("could not load '{}': {e}; continuing with an empty mesh", path.display());
                (Self::empty(mesh_name(path)), false)
            }
        }
    }

    fn from_models(name: String, models: Vec<tobj::Model>) -> Self {
        let mut mesh = Self::empty(name);

        for model in models {
            let m = model.mesh;
            let position_base = mesh.positions.len();
            let normal_base = mesh.normals.len();
            let tex_base = mesh.tex_coords.len();

            mesh.positions
                .extend(m.positions.chunks_exact(3).map(|p| Vec3::new(p[0], p[1], p[2])));
            mesh.normals
                .extend(m.normals.chunks_exact(3).map(|n| Vec3::new(n[0], n[1], n[2])));
            mesh.tex_coords
                .extend(m.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));

            for (i, tri) in m.indices.chunks_exact(3).enumerate() {
                let corner = |k: usize| FaceVertex {
                    position: position_base + tri[k] as usize,
                    normal: m.normal_indices.get(3 * i + k).map(|&n| normal_base + n as usize),
                    tex_coord: m.texcoord_indices.get(3 * i + k).map(|&t| tex_base + t as usize),
                };
                mesh.faces.push(Face {
                    vertices: [corner(0), corner(1), corner(2)],
                });
            }
        }

        mesh
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Expand faces into the flat triangle list the pipeline renders: three
    /// vertices per face, in face order.
    ///
    /// Corners without a normal get the face's flat normal; corners without
    /// texture coordinates get (0, 0). Faces referencing a missing position
    /// are skipped.
    pub fn vertex_array(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.faces.len() * 3);
        let mut skipped = 0usize;

        for face in &self.faces {
            let corners = face
                .vertices
                .map(|fv| self.positions.get(fv.position).copied());
            let [Some(a), Some(b), Some(c)] = corners else {
                skipped += 1;
                continue;
            };
            let flat_normal = (b - a).cross(c - a).normalize();

            for (fv, position) in face.vertices.iter().zip([a, b, c]) {
                let normal = fv
                    .normal
                    .and_then(|i| self.normals.get(i).copied())
                    .unwrap_or(flat_normal);
                let uv = fv
                    .tex_coord
                    .and_then(|i| self.tex_coords.get(i).copied())
                    .unwrap_or_default();
                vertices.push(Vertex::new(position, normal).with_uv(uv));
            }
        }

        if skipped > 0 {
            log::warn!("'{}': skipped {skipped} faces with out-of-range positions", self.name);
        }
        vertices
    }
}

fn mesh_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
