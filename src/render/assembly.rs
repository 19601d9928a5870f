//! Primitive assembly: flat vertex stream to triangle list.

use super::vertex::{Triangle, Vertex};

/// Partition `vertices` into consecutive, non-overlapping triples.
///
/// A stream whose length is not a multiple of 3 is malformed and yields no
/// triangles at all, never a partial list with the tail dropped.
pub fn assemble<T: Copy>(vertices: &[T]) -> Vec<[T; 3]> {
    if vertices.len() % 3 != 0 {
        log::trace!(
            "malformed primitive stream: {} vertices is not a multiple of 3",
            vertices.len()
        );
        return Vec::new();
    }

    vertices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect()
}

/// Assemble the vertex-stage output into screen-space triangles.
///
/// Partitioning happens over the full stream first, so a degenerate vertex
/// never shifts later triangles; triples containing one are then dropped.
pub fn assemble_triangles(transformed: &[Option<Vertex>]) -> Vec<Triangle> {
    assemble(transformed)
        .into_iter()
        .filter_map(|[a, b, c]| Some(Triangle::new(a?, b?, c?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn vertex(i: usize) -> Vertex {
        Vertex::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::Z)
    }

    #[test]
    fn groups_in_submission_order() {
        let stream: Vec<Option<Vertex>> = (0..6).map(|i| Some(vertex(i))).collect();
        let triangles = assemble_triangles(&stream);

        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0], Triangle::new(vertex(0), vertex(1), vertex(2)));
        assert_eq!(triangles[1], Triangle::new(vertex(3), vertex(4), vertex(5)));
    }

    #[test]
    fn four_vertices_yield_nothing() {
        let stream: Vec<Option<Vertex>> = (0..4).map(|i| Some(vertex(i))).collect();
        assert!(assemble_triangles(&stream).is_empty());
    }

    #[test]
    fn empty_stream_yields_nothing() {
        assert!(assemble::<u8>(&[]).is_empty());
    }

    #[test]
    fn degenerate_vertex_drops_only_its_triangle() {
        let mut stream: Vec<Option<Vertex>> = (0..9).map(|i| Some(vertex(i))).collect();
        stream[4] = None;

        let triangles = assemble_triangles(&stream);
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0].vertices[0], vertex(0));
        assert_eq!(triangles[1].vertices[0], vertex(6));
    }

    #[test]
    fn generic_partition() {
        assert_eq!(assemble(&[1, 2, 3, 4, 5, 6]), vec![[1, 2, 3], [4, 5, 6]]);
        assert!(assemble(&[1, 2, 3, 4, 5]).is_empty());
    }
}
