//! Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tanaka_core::constants::{LIGHT_AZIMUTH, PROBE_OFFSET};

use crate::error::ContourError;

/// Tunables for orientation, illumination and scheduling.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Distance of the orientation probe from the segment midpoint (world units).
    pub probe_offset: f64,
    /// Azimuth of the light source in degrees.
    pub light_azimuth: f64,
    /// Process levels on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            probe_offset: PROBE_OFFSET,
            light_azimuth: LIGHT_AZIMUTH,
            parallel: true,
        }
    }
}

impl ContourConfig {
    /// Read a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ContourError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
