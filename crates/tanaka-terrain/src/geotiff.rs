//! Single-band GeoTIFF elevation rasters.
//!
//! The georeferencing comes from ModelPixelScale + ModelTiepoint, or from a
//! rotation-free ModelTransformation matrix. No-data is read from the GDAL
//! ASCII tag. Rasters flagged PixelIsPoint are shifted half a cell so that
//! sample positions stay on cell centers.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tiff::ColorType;

use crate::error::TerrainError;
use crate::raster::{ElevationRaster, GeoTransform, RasterHeader};

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const MODEL_TRANSFORMATION: u16 = 34264;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GDAL_NODATA: u16 = 42113;

/// GTRasterTypeGeoKey and its PixelIsPoint value.
const RASTER_TYPE_KEY: u16 = 1025;
const PIXEL_IS_POINT: u16 = 2;

/// Load a GeoTIFF file.
pub fn load_geotiff(path: &Path) -> Result<ElevationRaster, TerrainError> {
    read_geotiff(BufReader::new(File::open(path)?))
}

/// Decode a GeoTIFF from any seekable reader.
pub fn read_geotiff<R: Read + Seek>(reader: R) -> Result<ElevationRaster, TerrainError> {
    let mut decoder = Decoder::new(reader)?;

    match decoder.colortype()? {
        ColorType::Gray(_) => {}
        other => {
            return Err(TerrainError::InvalidRaster(format!(
                "expected a single-band elevation raster, got {other:?}"
            )))
        }
    }

    let (width, height) = decoder.dimensions()?;
    let mut transform = read_transform(&mut decoder)?;
    if is_pixel_is_point(&mut decoder)? {
        transform.origin_x -= transform.pixel_width / 2.0;
        transform.origin_y -= transform.pixel_height / 2.0;
    }
    let nodata = read_nodata(&mut decoder)?;

    let values = samples_as_f64(decoder.read_image()?)?;
    let header = RasterHeader {
        width: width as usize,
        height: height as usize,
        transform,
        nodata,
    };
    ElevationRaster::new(header, values)
}

fn find_f64s<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> Result<Option<Vec<f64>>, TerrainError> {
    match decoder.find_tag(Tag::from_u16_exhaustive(tag))? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

fn read_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<GeoTransform, TerrainError> {
    let scale = find_f64s(decoder, MODEL_PIXEL_SCALE)?;
    let tiepoint = find_f64s(decoder, MODEL_TIEPOINT)?;

    if let (Some(scale), Some(tie)) = (scale, tiepoint) {
        if scale.len() < 2 || tie.len() < 6 {
            return Err(TerrainError::InvalidRaster(
                "truncated ModelPixelScale or ModelTiepoint tag".to_string(),
            ));
        }
        // Tiepoint is (I, J, K, X, Y, Z): raster (I, J) maps to world (X, Y).
        let (sx, sy) = (scale[0], scale[1]);
        return Ok(GeoTransform {
            origin_x: tie[3] - tie[0] * sx,
            pixel_width: sx,
            origin_y: tie[4] + tie[1] * sy,
            pixel_height: -sy,
        });
    }

    if let Some(m) = find_f64s(decoder, MODEL_TRANSFORMATION)? {
        if m.len() < 8 {
            return Err(TerrainError::InvalidRaster(
                "truncated ModelTransformation tag".to_string(),
            ));
        }
        if m[1] != 0.0 || m[4] != 0.0 {
            return Err(TerrainError::InvalidRaster(
                "rotated GeoTIFF rasters are not supported".to_string(),
            ));
        }
        return Ok(GeoTransform {
            origin_x: m[3],
            pixel_width: m[0],
            origin_y: m[7],
            pixel_height: m[5],
        });
    }

    Err(TerrainError::InvalidRaster(
        "GeoTIFF has no georeferencing tags".to_string(),
    ))
}

fn is_pixel_is_point<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<bool, TerrainError> {
    let Some(value) = decoder.find_tag(Tag::from_u16_exhaustive(GEO_KEY_DIRECTORY))? else {
        return Ok(false);
    };
    let keys = value.into_u16_vec()?;
    // Four-short header, then (key id, location, count, value) entries.
    Ok(keys
        .get(4..)
        .unwrap_or(&[])
        .chunks_exact(4)
        .any(|entry| entry[0] == RASTER_TYPE_KEY && entry[1] == 0 && entry[3] == PIXEL_IS_POINT))
}

fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<f64>, TerrainError> {
    let Some(value) = decoder.find_tag(Tag::from_u16_exhaustive(GDAL_NODATA))? else {
        return Ok(None);
    };
    let text = value.into_string()?;
    let trimmed = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| TerrainError::InvalidRaster(format!("invalid GDAL_NODATA value '{trimmed}'")))
}

fn samples_as_f64(image: DecodingResult) -> Result<Vec<f64>, TerrainError> {
    let values = match image {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(TerrainError::InvalidRaster(
                "64-bit integer GeoTIFF samples are not supported".to_string(),
            ))
        }
    };
    Ok(values)
}
