//! Random point subsampling ahead of triangulation.

use log::{debug, warn};
use rand::seq::index;
use rand::Rng;

use tanaka_core::types::Point3;

use crate::error::TerrainError;

/// Number of points a thinning ratio asks for out of `cell_count` raster cells.
pub fn thinning_target(ratio: f64, cell_count: usize) -> usize {
    (ratio * cell_count as f64) as usize
}

/// Keep `floor(ratio * cell_count)` of `points`, chosen uniformly without replacement.
///
/// The target is relative to the full raster (no-data cells included). When
/// fewer valid points exist than the target, every point is kept. Survivors
/// keep their input order.
pub fn thin_points<R: Rng + ?Sized>(
    points: Vec<Point3>,
    ratio: f64,
    cell_count: usize,
    rng: &mut R,
) -> Result<Vec<Point3>, TerrainError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(TerrainError::InvalidThinning(ratio));
    }

    let target = thinning_target(ratio, cell_count);
    if points.len() <= target {
        if points.len() < target {
            warn!(
                "Only {} valid points for a target of {}; keeping all",
                points.len(),
                target
            );
        }
        return Ok(points);
    }

    let mut picks = index::sample(rng, points.len(), target).into_vec();
    picks.sort_unstable();
    debug!("Thinned {} points to {}", points.len(), picks.len());

    Ok(picks.into_iter().map(|i| points[i]).collect())
}
