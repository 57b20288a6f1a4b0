//! ElevationRaster: a regular elevation grid with a pixel-to-world transform.

use tanaka_core::types::Point3;

use crate::error::TerrainError;

/// North-up affine transform from pixel (row, col) to world (x, y).
///
/// Equivalent to the GDAL geotransform with zero rotation terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// World x of the left edge of column 0.
    pub origin_x: f64,
    /// Column width in world units (positive, west to east).
    pub pixel_width: f64,
    /// World y of the top edge of row 0.
    pub origin_y: f64,
    /// Row height in world units (negative for north-up rasters).
    pub pixel_height: f64,
}

impl GeoTransform {
    /// World coordinates of the center of cell (row, col).
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        let x = self.origin_x + (col as f64 * self.pixel_width) + (self.pixel_width / 2.0);
        let y = self.origin_y + (row as f64 * self.pixel_height) + (self.pixel_height / 2.0);
        (x, y)
    }
}

/// Raster header metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterHeader {
    /// Number of columns (west to east).
    pub width: usize,
    /// Number of rows (north to south).
    pub height: usize,
    pub transform: GeoTransform,
    /// Sentinel marking cells without data.
    pub nodata: Option<f64>,
}

/// Loaded elevation raster.
#[derive(Debug, Clone)]
pub struct ElevationRaster {
    pub header: RasterHeader,
    /// Elevation values, row-major (north-to-south, west-to-east).
    values: Vec<f64>,
}

impl ElevationRaster {
    /// Create a raster, checking that `values` fills the header's grid exactly.
    pub fn new(header: RasterHeader, values: Vec<f64>) -> Result<Self, TerrainError> {
        let expected = header.width.checked_mul(header.height).ok_or_else(|| {
            TerrainError::InvalidRaster(format!(
                "{}x{} grid is too large",
                header.width, header.height
            ))
        })?;
        if values.len() != expected {
            return Err(TerrainError::InvalidRaster(format!(
                "expected {} values for a {}x{} grid, got {}",
                expected,
                header.width,
                header.height,
                values.len()
            )));
        }
        Ok(Self { header, values })
    }

    /// Total number of cells, including no-data cells.
    pub fn cell_count(&self) -> usize {
        self.values.len()
    }

    /// Raw value at integer grid coordinates.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        let h = &self.header;
        if row >= h.height || col >= h.width {
            return None;
        }
        Some(self.values[row * h.width + col])
    }

    /// True if `value` is the no-data sentinel or NaN.
    pub fn is_nodata(&self, value: f64) -> bool {
        value.is_nan() || self.header.nodata == Some(value)
    }

    /// One point per valid cell, placed at the cell center.
    pub fn valid_points(&self) -> Vec<Point3> {
        let h = &self.header;
        let mut points = Vec::with_capacity(self.values.len());
        for row in 0..h.height {
            for col in 0..h.width {
                let z = self.values[row * h.width + col];
                if self.is_nodata(z) {
                    continue;
                }
                let (x, y) = h.transform.cell_center(row, col);
                points.push(Point3::new(x, y, z));
            }
        }
        points
    }

    /// Minimum and maximum valid elevation, if any cell has data.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| !self.is_nodata(*v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3×3 grid with 10 m cells, top-left corner at (100, 500), one void cell.
    fn make_test_raster() -> ElevationRaster {
        #[rustfmt::skip]
        let values = vec![
            1.0,    2.0, 3.0,
            4.0, -9999.0, 6.0,
            7.0,    8.0, 9.0,
        ];
        ElevationRaster::new(
            RasterHeader {
                width: 3,
                height: 3,
                transform: GeoTransform {
                    origin_x: 100.0,
                    pixel_width: 10.0,
                    origin_y: 500.0,
                    pixel_height: -10.0,
                },
                nodata: Some(-9999.0),
            },
            values,
        )
        .unwrap()
    }

    #[test]
    fn test_cell_center() {
        let raster = make_test_raster();
        let t = raster.header.transform;
        assert_eq!(t.cell_center(0, 0), (105.0, 495.0));
        assert_eq!(t.cell_center(2, 1), (115.0, 475.0));
    }

    #[test]
    fn test_valid_points_skip_nodata() {
        let raster = make_test_raster();
        let points = raster.valid_points();
        assert_eq!(points.len(), 8, "Void cell should be masked out");
        assert!(points.iter().all(|p| p.z != -9999.0));
        assert_eq!(points[0], Point3::new(105.0, 495.0, 1.0));
        assert_eq!(points[7], Point3::new(125.0, 475.0, 9.0));
    }

    #[test]
    fn test_elevation_range_ignores_nodata() {
        let raster = make_test_raster();
        assert_eq!(raster.elevation_range(), Some((1.0, 9.0)));
        assert_eq!(raster.cell_count(), 9);
    }

    #[test]
    fn test_nan_is_nodata() {
        let raster = ElevationRaster::new(
            RasterHeader {
                width: 2,
                height: 1,
                transform: GeoTransform {
                    origin_x: 0.0,
                    pixel_width: 1.0,
                    origin_y: 0.0,
                    pixel_height: -1.0,
                },
                nodata: None,
            },
            vec![f64::NAN, 3.0],
        )
        .unwrap();
        assert_eq!(raster.valid_points().len(), 1);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let header = make_test_raster().header;
        let result = ElevationRaster::new(header, vec![0.0; 4]);
        assert!(matches!(result, Err(TerrainError::InvalidRaster(_))));
    }

    #[test]
    fn test_oversized_header_rejected() {
        let mut header = make_test_raster().header;
        header.width = usize::MAX / 2;
        header.height = 3;
        let result = ElevationRaster::new(header, vec![0.0; 9]);
        assert!(matches!(result, Err(TerrainError::InvalidRaster(_))));
    }

    #[test]
    fn test_value_out_of_bounds() {
        let raster = make_test_raster();
        assert_eq!(raster.value(1, 2), Some(6.0));
        assert_eq!(raster.value(3, 0), None);
    }
}
