//! Azimuth and simulated lightness of oriented segments.
//!
//! Lightness falls off linearly with the angular distance between a
//! segment's azimuth and the light source: 100 when the azimuth equals
//! the light's, 0 when opposite it.

use std::f64::consts::TAU;

use tanaka_core::constants::LIGHTNESS_MAX;
use tanaka_core::types::{Illumination, Isoline, Segment};

/// Azimuth of a directed segment in degrees, within [0, 360).
///
/// Measured as `atan2(start.y - end.y, end.x - start.x)`: zero along +x,
/// increasing clockwise. Operand order is fixed; lightness depends on it.
pub fn azimuth(segment: &Segment) -> f64 {
    let a = segment.start;
    let b = segment.end;
    let mut theta = (a.y - b.y).atan2(b.x - a.x);
    if theta < 0.0 {
        theta += TAU;
    }
    let degrees = theta.to_degrees();
    // theta just below zero can round up to exactly TAU.
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Lightness in [0, 100] for a segment azimuth under a light at `light_azimuth`.
pub fn lightness(azimuth: f64, light_azimuth: f64) -> f64 {
    let distance = ((azimuth - light_azimuth).rem_euclid(360.0) - 180.0).abs();
    distance / 180.0 * LIGHTNESS_MAX
}

/// Compute and attach illumination to one segment.
pub fn annotate(segment: &mut Segment, light_azimuth: f64) {
    let az = azimuth(segment);
    segment.illumination = Some(Illumination {
        azimuth: az,
        lightness: lightness(az, light_azimuth),
    });
}

/// Annotate every segment of an oriented isoline.
pub fn annotate_isoline(isoline: &mut Isoline, light_azimuth: f64) {
    for segment in isoline.segments.iter_mut() {
        annotate(segment, light_azimuth);
    }
}
