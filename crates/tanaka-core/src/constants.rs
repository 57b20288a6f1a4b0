//! Pipeline constants and tuning parameters.

// --- Orientation ---

/// Offset (world units) of the right-hand probe point from a segment midpoint.
/// Absolute, so it loses meaning for coordinates far above ~1e7.
pub const PROBE_OFFSET: f64 = 1e-9;

// --- Illumination ---

/// Azimuth of the simulated light source (degrees, west-northwest).
pub const LIGHT_AZIMUTH: f64 = 255.0;

/// Upper bound of the lightness scale.
pub const LIGHTNESS_MAX: f64 = 100.0;

// --- Terrain ---

/// Void value in HGT files (no data).
pub const HGT_VOID: i16 = -32768;
