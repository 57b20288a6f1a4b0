use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unsupported raster format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid raster: {0}")]
    InvalidRaster(String),
    #[error("thinning ratio must be within [0, 1], got {0}")]
    InvalidThinning(f64),
    #[error("triangulation of {0} points produced no triangles")]
    DegenerateTriangulation(usize),
}
