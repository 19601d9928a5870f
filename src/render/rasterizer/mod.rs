//! Triangle rasterization.
//!
//! A [`Rasterizer`] turns screen-space triangles into [`Fragment`]s. The
//! pipeline ships one implementation, [`BarycentricRasterizer`]; the trait
//! is the seam benchmarks and alternative coverage rules plug into.

mod barycentric;

pub use barycentric::{barycentric, BarycentricRasterizer, DEGENERATE_AREA, INTERIOR_EPSILON};

use super::fragment::Fragment;
use super::vertex::Triangle;

/// Trait for triangle rasterization algorithms.
pub trait Rasterizer {
    /// Append the fragments covering `triangle` to `out`, in scan order.
    fn rasterize_triangle(&self, triangle: &Triangle, out: &mut Vec<Fragment>);

    /// Rasterize `triangles` into one fragment list.
    ///
    /// Fragments are grouped by triangle in submission order. Without a depth
    /// test this order decides which fragment ends up visible, so
    /// implementations must not reorder.
    fn rasterize(&self, triangles: &[Triangle]) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        for triangle in triangles {
            self.rasterize_triangle(triangle, &mut fragments);
        }
        fragments
    }
}
