//! Fundamental geometric and contour types.

use serde::{Deserialize, Serialize};

/// 3D point in world space. `z` is elevation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same planar position at a different elevation.
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }

    /// Hashable key that agrees with `==` on non-NaN coordinates.
    ///
    /// `-0.0` is folded onto `0.0` so the key never separates points
    /// that compare equal.
    pub fn key(&self) -> [u64; 3] {
        [canonical_bits(self.x), canonical_bits(self.y), canonical_bits(self.z)]
    }
}

fn canonical_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Three vertices of a surface triangle. Vertex order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle(pub [Point3; 3]);

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self([a, b, c])
    }

    pub fn vertices(&self) -> &[Point3; 3] {
        &self.0
    }

    /// The three unordered vertex pairs: (a,b), (a,c), (b,c).
    pub fn edges(&self) -> [(Point3, Point3); 3] {
        let [a, b, c] = self.0;
        [(a, b), (a, c), (b, c)]
    }

    /// True when every vertex is strictly above or every vertex strictly below `height`.
    pub fn misses_level(&self, height: f64) -> bool {
        self.0.iter().all(|p| p.z > height) || self.0.iter().all(|p| p.z < height)
    }
}

/// Illumination attributes of an oriented segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Illumination {
    /// Bearing of the directed segment, degrees in [0, 360).
    pub azimuth: f64,
    /// Simulated brightness in [0, 100].
    pub lightness: f64,
}

/// Two points at the same elevation, plus illumination once annotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
    pub illumination: Option<Illumination>,
}

impl Segment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self {
            start,
            end,
            illumination: None,
        }
    }

    /// Elevation shared by both endpoints.
    pub fn height(&self) -> f64 {
        self.start.z
    }

    /// Midpoint in the XY plane.
    pub fn midpoint(&self) -> (f64, f64) {
        (
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Reverse the direction of the segment.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    /// Direction-independent key: equal for (a, b) and (b, a).
    pub fn unordered_key(&self) -> [[u64; 3]; 2] {
        let a = self.start.key();
        let b = self.end.key();
        if a <= b {
            [a, b]
        } else {
            [b, a]
        }
    }
}

/// All segments extracted for one contour level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Isoline {
    pub height: f64,
    pub segments: Vec<Segment>,
}

impl Isoline {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A level whose processing failed, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedLevel {
    pub height: f64,
    pub reason: String,
}

/// Isolines for every requested level, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourSet {
    pub isolines: Vec<Isoline>,
    /// Levels that could not be processed. They never affect `isolines`.
    pub failed: Vec<FailedLevel>,
}

impl ContourSet {
    /// Total segment count across all levels.
    pub fn segment_count(&self) -> usize {
        self.isolines.iter().map(Isoline::len).sum()
    }

    /// Iterate every segment of every level.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.isolines.iter().flat_map(|iso| iso.segments.iter())
    }
}
