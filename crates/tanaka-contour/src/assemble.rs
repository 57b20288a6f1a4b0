//! Contour set assembly across levels.
//!
//! Levels are independent: each reads the shared surface and nothing else,
//! so they fan out on the rayon pool and are collected back in request
//! order. A level whose surface query fails is reported in
//! [`ContourSet::failed`] without touching the others.

use log::{info, warn};
use rayon::prelude::*;
use tanaka_core::surface::Surface;
use tanaka_core::types::{ContourSet, FailedLevel, Isoline};

use crate::config::ContourConfig;
use crate::error::ContourError;
use crate::extract::extract_isoline;
use crate::illumination::annotate_isoline;
use crate::levels::Levels;
use crate::orient::orient_isoline;

/// Extract, orient and annotate the isoline at one elevation.
pub fn process_level<S: Surface>(
    surface: &S,
    height: f64,
    config: &ContourConfig,
) -> Result<Isoline, ContourError> {
    let mut isoline = extract_isoline(surface, height);
    orient_isoline(surface, &mut isoline, config.probe_offset)
        .map_err(|source| ContourError::SurfaceQuery { height, source })?;
    annotate_isoline(&mut isoline, config.light_azimuth);

    info!("Isoline {height} complete ({} segments)", isoline.len());
    Ok(isoline)
}

/// Build the illuminated contour set for every level, in level order.
pub fn build_contours<S: Surface + Sync>(
    surface: &S,
    levels: &Levels,
    config: &ContourConfig,
) -> ContourSet {
    let results: Vec<Result<Isoline, ContourError>> = if config.parallel {
        levels
            .as_slice()
            .par_iter()
            .map(|&h| process_level(surface, h, config))
            .collect()
    } else {
        levels
            .as_slice()
            .iter()
            .map(|&h| process_level(surface, h, config))
            .collect()
    };

    let mut set = ContourSet::default();
    for (&height, result) in levels.as_slice().iter().zip(results) {
        match result {
            Ok(isoline) => set.isolines.push(isoline),
            Err(e) => {
                warn!("Skipping level {height}: {e}");
                set.failed.push(FailedLevel {
                    height,
                    reason: e.to_string(),
                });
            }
        }
    }
    set
}
