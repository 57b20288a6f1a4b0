//! Terrain collaborators for Tanaka contour generation.
//!
//! Elevation raster loading, point thinning, Delaunay TIN construction
//! with elevation queries, and mesh export.

pub use tanaka_core as core;

pub mod ascii_grid;
pub mod error;
pub mod geotiff;
pub mod hgt;
pub mod ply;
pub mod raster;
pub mod thinning;
pub mod tin;

use std::path::Path;

// Re-export key types for convenience.
pub use error::TerrainError;
pub use raster::{ElevationRaster, GeoTransform, RasterHeader};
pub use thinning::thin_points;
pub use tin::Tin;

/// Load an elevation raster, choosing the reader by file extension.
///
/// `.tif`/`.tiff` is read as a GeoTIFF, `.asc` as an ESRI ASCII grid and
/// `.hgt` as a NASADEM/SRTM tile.
pub fn load_raster(path: &Path) -> Result<ElevationRaster, TerrainError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "tif" | "tiff" => geotiff::load_geotiff(path),
        "asc" => ascii_grid::load_ascii_grid(path),
        "hgt" => hgt::load_hgt(path),
        _ => Err(TerrainError::UnsupportedFormat(path.display().to_string())),
    }
}
