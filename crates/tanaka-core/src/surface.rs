//! Query interface to a triangulated elevation surface.

use thiserror::Error;

use crate::types::Triangle;

/// Why a surface could not answer an elevation query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The point lies outside the triangulated area.
    #[error("point ({x}, {y}) is outside the surface coverage")]
    OutOfCoverage { x: f64, y: f64 },
    /// The surface exists but cannot interpolate (malformed geometry, etc).
    #[error("surface query failed: {0}")]
    Failed(String),
}

/// A piecewise-linear elevation model built from triangles.
///
/// Implementations must be safe to query from several threads at once;
/// neither method may mutate the triangulation.
pub trait Surface {
    /// Every triangle of the model, each exactly once.
    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_;

    /// Elevation at `(x, y)` using the same triangulation as [`Surface::triangles`].
    fn interpolate(&self, x: f64, y: f64) -> Result<f64, QueryError>;
}
