//! ESRI ASCII grid (`.asc`) parser.
//!
//! A short `key value` header (`ncols`, `nrows`, `xllcorner`/`xllcenter`,
//! `yllcorner`/`yllcenter`, `cellsize`, optional `NODATA_value`) followed by
//! `nrows` lines of whitespace-separated elevations, north row first.

use std::path::Path;

use crate::error::TerrainError;
use crate::raster::{ElevationRaster, GeoTransform, RasterHeader};

#[derive(Default)]
struct HeaderFields {
    ncols: Option<usize>,
    nrows: Option<usize>,
    xll: Option<(f64, bool)>,
    yll: Option<(f64, bool)>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

const HEADER_KEYS: [&str; 8] = [
    "ncols",
    "nrows",
    "xllcorner",
    "xllcenter",
    "yllcorner",
    "yllcenter",
    "cellsize",
    "nodata_value",
];

impl HeaderFields {
    fn has_shape(&self) -> bool {
        self.ncols.is_some() && self.nrows.is_some() && self.cellsize.is_some()
    }
}

fn is_header_key(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|key| HEADER_KEYS.contains(&key.to_lowercase().as_str()))
}

/// Load an ESRI ASCII grid file.
pub fn load_ascii_grid(path: &Path) -> Result<ElevationRaster, TerrainError> {
    let text = std::fs::read_to_string(path)?;
    parse_ascii_grid(&text)
}

/// Parse ESRI ASCII grid text into a raster.
pub fn parse_ascii_grid(text: &str) -> Result<ElevationRaster, TerrainError> {
    let mut fields = HeaderFields::default();
    let mut values = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let starts_alpha = trimmed
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());

        // Once the grid shape is known, only recognized keys are header
        // lines; a first row may start with a token like `nan`.
        let is_header = starts_alpha
            && values.is_empty()
            && (!fields.has_shape() || is_header_key(trimmed));

        if is_header {
            parse_header_line(trimmed, line_no, &mut fields)?;
            continue;
        }

        for token in trimmed.split_whitespace() {
            let v: f64 = token.parse().map_err(|_| TerrainError::Parse {
                line: line_no,
                message: format!("invalid elevation value '{token}'"),
            })?;
            values.push(v);
        }
    }

    let header = build_header(&fields)?;
    ElevationRaster::new(header, values)
}

fn parse_header_line(
    line: &str,
    line_no: usize,
    fields: &mut HeaderFields,
) -> Result<(), TerrainError> {
    let mut parts = line.split_whitespace();
    let key = parts.next().unwrap_or("").to_lowercase();
    let raw = parts.next().ok_or_else(|| TerrainError::Parse {
        line: line_no,
        message: format!("header key '{key}' has no value"),
    })?;
    let value: f64 = raw.parse().map_err(|_| TerrainError::Parse {
        line: line_no,
        message: format!("invalid value '{raw}' for '{key}'"),
    })?;

    let as_count = |v: f64| -> Result<usize, TerrainError> {
        if v.fract() != 0.0 || v < 1.0 {
            return Err(TerrainError::Parse {
                line: line_no,
                message: format!("'{key}' must be a positive integer, got {v}"),
            });
        }
        Ok(v as usize)
    };

    match key.as_str() {
        "ncols" => fields.ncols = Some(as_count(value)?),
        "nrows" => fields.nrows = Some(as_count(value)?),
        "xllcorner" => fields.xll = Some((value, false)),
        "xllcenter" => fields.xll = Some((value, true)),
        "yllcorner" => fields.yll = Some((value, false)),
        "yllcenter" => fields.yll = Some((value, true)),
        "cellsize" => fields.cellsize = Some(value),
        "nodata_value" => fields.nodata = Some(value),
        _ => {
            return Err(TerrainError::Parse {
                line: line_no,
                message: format!("unknown header key '{key}'"),
            })
        }
    }
    Ok(())
}

fn build_header(fields: &HeaderFields) -> Result<RasterHeader, TerrainError> {
    let missing = |name: &str| TerrainError::InvalidRaster(format!("missing header field '{name}'"));

    let width = fields.ncols.ok_or_else(|| missing("ncols"))?;
    let height = fields.nrows.ok_or_else(|| missing("nrows"))?;
    let cellsize = fields.cellsize.ok_or_else(|| missing("cellsize"))?;
    let (xll, x_center) = fields.xll.ok_or_else(|| missing("xllcorner"))?;
    let (yll, y_center) = fields.yll.ok_or_else(|| missing("yllcorner"))?;

    if cellsize.is_nan() || cellsize <= 0.0 {
        return Err(TerrainError::InvalidRaster(format!(
            "cellsize must be positive, got {cellsize}"
        )));
    }

    // Normalize to the lower-left corner, then flip to a top-left origin.
    let x_corner = if x_center { xll - cellsize / 2.0 } else { xll };
    let y_corner = if y_center { yll - cellsize / 2.0 } else { yll };

    Ok(RasterHeader {
        width,
        height,
        transform: GeoTransform {
            origin_x: x_corner,
            pixel_width: cellsize,
            origin_y: y_corner + height as f64 * cellsize,
            pixel_height: -cellsize,
        },
        nodata: fields.nodata,
    })
}
