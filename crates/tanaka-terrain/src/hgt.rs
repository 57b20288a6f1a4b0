//! NASADEM / SRTM HGT file parser.
//!
//! HGT files are flat arrays of big-endian i16 elevation values
//! covering 1° × 1° tiles. The filename encodes the SW corner
//! coordinates (e.g., N25E056.hgt). Coordinates stay in degrees.

use std::path::Path;

use tanaka_core::constants::HGT_VOID;

use crate::error::TerrainError;
use crate::raster::{ElevationRaster, GeoTransform, RasterHeader};

/// Parse an HGT filename to extract the SW corner coordinates.
/// Format: `N25E056.hgt` or `S10W045.hgt`
pub fn parse_hgt_filename(filename: &str) -> Option<(f64, f64)> {
    let name = filename
        .strip_suffix(".hgt")
        .or_else(|| filename.strip_suffix(".HGT"))?;

    if name.len() < 7 || !name.is_ascii() {
        return None;
    }

    let lat_sign = match &name[0..1] {
        "N" | "n" => 1.0,
        "S" | "s" => -1.0,
        _ => return None,
    };
    let lat: f64 = name[1..3].parse().ok()?;

    let lon_sign = match &name[3..4] {
        "E" | "e" => 1.0,
        "W" | "w" => -1.0,
        _ => return None,
    };
    let lon: f64 = name[4..7].parse().ok()?;

    Some((lat * lat_sign, lon * lon_sign))
}

/// Determine the samples per side from the file size.
/// 1 arc-second: 3601 × 3601 = 25,934,402 bytes
/// 3 arc-second: 1201 × 1201 = 2,884,802 bytes
fn grid_side_from_byte_count(byte_count: usize) -> Option<usize> {
    match byte_count {
        25_934_402 => Some(3601),
        2_884_802 => Some(1201),
        _ => None,
    }
}

/// Decode big-endian i16 samples. Voids keep their sentinel value.
pub fn decode_samples(data: &[u8]) -> Vec<f64> {
    data.chunks_exact(2)
        .map(|pair| i16::from_be_bytes([pair[0], pair[1]]) as f64)
        .collect()
}

/// Build a raster from a tile's SW corner and its raw bytes.
pub fn parse_hgt_bytes(
    data: &[u8],
    origin_lat: f64,
    origin_lon: f64,
) -> Result<ElevationRaster, TerrainError> {
    let side = grid_side_from_byte_count(data.len()).ok_or_else(|| {
        TerrainError::InvalidRaster(format!(
            "unexpected HGT file size: {} bytes (expected {} or {})",
            data.len(),
            3601 * 3601 * 2,
            1201 * 1201 * 2
        ))
    })?;
    hgt_raster(decode_samples(data), side, origin_lat, origin_lon)
}

/// Wrap decoded samples of a square tile into a raster.
///
/// Samples sit on grid posts, so the transform is shifted half a cell
/// so that cell centers land exactly on whole-degree tile edges.
fn hgt_raster(
    values: Vec<f64>,
    side: usize,
    origin_lat: f64,
    origin_lon: f64,
) -> Result<ElevationRaster, TerrainError> {
    if side < 2 {
        return Err(TerrainError::InvalidRaster(format!(
            "HGT tile side must be at least 2, got {side}"
        )));
    }
    let step = 1.0 / (side - 1) as f64;
    let header = RasterHeader {
        width: side,
        height: side,
        transform: GeoTransform {
            origin_x: origin_lon - step / 2.0,
            pixel_width: step,
            origin_y: origin_lat + 1.0 + step / 2.0,
            pixel_height: -step,
        },
        nodata: Some(HGT_VOID as f64),
    };
    ElevationRaster::new(header, values)
}

/// Load a single HGT file into a raster.
pub fn load_hgt(path: &Path) -> Result<ElevationRaster, TerrainError> {
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| TerrainError::InvalidRaster("invalid HGT filename".to_string()))?;

    let (origin_lat, origin_lon) = parse_hgt_filename(filename).ok_or_else(|| {
        TerrainError::InvalidRaster(format!(
            "cannot parse HGT coordinates from filename: {filename}"
        ))
    })?;

    let data = std::fs::read(path)?;
    parse_hgt_bytes(&data, origin_lat, origin_lon)
}
