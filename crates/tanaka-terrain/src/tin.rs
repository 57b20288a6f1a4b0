//! Triangulated irregular network with point location and linear interpolation.

use log::debug;

use tanaka_core::surface::{QueryError, Surface};
use tanaka_core::types::{Point3, Triangle};

use crate::error::TerrainError;

/// Barycentric slack so points on a shared edge still hit a triangle.
const BARYCENTRIC_EPSILON: f64 = 1e-12;

/// Target number of triangles per point-location bucket.
const TRIANGLES_PER_BUCKET: f64 = 4.0;

/// Delaunay triangulation of 3D points over their XY projection.
#[derive(Debug, Clone)]
pub struct Tin {
    vertices: Vec<Point3>,
    triangles: Vec<[usize; 3]>,
    locator: TriangleLocator,
}

impl Tin {
    /// Triangulate `points` in the XY plane.
    ///
    /// Duplicate planar positions are dropped by the triangulator; the first
    /// occurrence wins.
    pub fn from_points(points: Vec<Point3>) -> Result<Self, TerrainError> {
        let coords: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let triangulation = delaunator::triangulate(&coords);
        let triangles: Vec<[usize; 3]> = triangulation
            .triangles
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        if triangles.is_empty() {
            return Err(TerrainError::DegenerateTriangulation(points.len()));
        }

        let locator = TriangleLocator::build(&points, &triangles);
        debug!(
            "TIN: {} vertices, {} triangles, {}x{} locator buckets",
            points.len(),
            triangles.len(),
            locator.cols,
            locator.rows
        );

        Ok(Self {
            vertices: points,
            triangles,
            locator,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Vertex indices of every triangle, counter-clockwise.
    pub fn triangle_indices(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn triangle(&self, idx: usize) -> Triangle {
        let [a, b, c] = self.triangles[idx];
        Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
    }

    /// Index of a triangle containing `(x, y)`, if any.
    pub fn locate(&self, x: f64, y: f64) -> Option<usize> {
        self.locator
            .candidates(x, y)
            .iter()
            .map(|&i| i as usize)
            .find(|&i| barycentric(&self.triangle(i), x, y).is_some())
    }
}

impl Surface for Tin {
    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangles.len()).map(|i| self.triangle(i))
    }

    fn interpolate(&self, x: f64, y: f64) -> Result<f64, QueryError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(QueryError::Failed(format!(
                "non-finite query point ({x}, {y})"
            )));
        }
        for &i in self.locator.candidates(x, y) {
            let tri = self.triangle(i as usize);
            if let Some([l1, l2, l3]) = barycentric(&tri, x, y) {
                let [a, b, c] = tri.vertices();
                return Ok(l1 * a.z + l2 * b.z + l3 * c.z);
            }
        }
        Err(QueryError::OutOfCoverage { x, y })
    }
}

/// Barycentric weights of `(x, y)` in `tri`, or None when outside or degenerate.
fn barycentric(tri: &Triangle, x: f64, y: f64) -> Option<[f64; 3]> {
    let [a, b, c] = tri.vertices();
    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if det == 0.0 {
        return None;
    }
    let l1 = ((b.y - c.y) * (x - c.x) + (c.x - b.x) * (y - c.y)) / det;
    let l2 = ((c.y - a.y) * (x - c.x) + (a.x - c.x) * (y - c.y)) / det;
    let l3 = 1.0 - l1 - l2;
    let inside = [l1, l2, l3].iter().all(|&l| l >= -BARYCENTRIC_EPSILON);
    inside.then_some([l1, l2, l3])
}

/// Uniform grid of buckets, each listing the triangles whose bounding box overlaps it.
#[derive(Debug, Clone)]
struct TriangleLocator {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    buckets: Vec<Vec<u32>>,
}

impl TriangleLocator {
    fn build(vertices: &[Point3], triangles: &[[usize; 3]]) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for tri in triangles {
            for &v in tri {
                let p = vertices[v];
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }

        let span_x = (max_x - min_x).max(f64::MIN_POSITIVE);
        let span_y = (max_y - min_y).max(f64::MIN_POSITIVE);

        // Aim for a few triangles per bucket, with square-ish buckets.
        let target = (triangles.len() as f64 / TRIANGLES_PER_BUCKET).max(1.0);
        let aspect = span_x / span_y;
        let cols = ((target * aspect).sqrt().round() as usize).clamp(1, 4096);
        let rows = ((target / cols as f64).round() as usize).clamp(1, 4096);
        let cell_w = span_x / cols as f64;
        let cell_h = span_y / rows as f64;

        let mut locator = Self {
            min_x,
            min_y,
            max_x,
            max_y,
            cols,
            rows,
            cell_w,
            cell_h,
            buckets: vec![Vec::new(); cols * rows],
        };

        for (idx, tri) in triangles.iter().enumerate() {
            let xs = tri.map(|v| vertices[v].x);
            let ys = tri.map(|v| vertices[v].y);
            let c0 = locator.col_of(xs.iter().copied().fold(f64::INFINITY, f64::min));
            let c1 = locator.col_of(xs.iter().copied().fold(f64::NEG_INFINITY, f64::max));
            let r0 = locator.row_of(ys.iter().copied().fold(f64::INFINITY, f64::min));
            let r1 = locator.row_of(ys.iter().copied().fold(f64::NEG_INFINITY, f64::max));
            for r in r0..=r1 {
                for c in c0..=c1 {
                    locator.buckets[r * cols + c].push(idx as u32);
                }
            }
        }

        locator
    }

    fn col_of(&self, x: f64) -> usize {
        (((x - self.min_x) / self.cell_w).floor().max(0.0) as usize).min(self.cols - 1)
    }

    fn row_of(&self, y: f64) -> usize {
        (((y - self.min_y) / self.cell_h).floor().max(0.0) as usize).min(self.rows - 1)
    }

    /// Triangles that may contain `(x, y)`. Empty outside the bounding box.
    fn candidates(&self, x: f64, y: f64) -> &[u32] {
        if x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y {
            return &[];
        }
        &self.buckets[self.row_of(y) * self.cols + self.col_of(x)]
    }
}
