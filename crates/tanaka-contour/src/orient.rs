//! Segment orientation against the surface slope.
//!
//! A probe point just to the right of each segment is looked up on the
//! surface; if the ground there is higher than the contour the segment is
//! reversed. Afterwards higher ground lies to the left of every segment,
//! which gives azimuth a physical meaning.

use glam::DVec2;
use log::debug;
use tanaka_core::surface::{QueryError, Surface};
use tanaka_core::types::{Isoline, Segment};

/// Counters gathered while orienting one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientStats {
    pub flipped: usize,
    /// Probes that fell outside the surface; those segments were left as-is.
    pub out_of_coverage: usize,
    /// Zero-length segments that have no right-hand side.
    pub degenerate: usize,
}

/// Point at `offset` to the right of the segment's midpoint.
///
/// The right-hand normal of direction `(dx, dy)` is `(dy, -dx)`.
/// Returns None for a segment with coincident XY endpoints.
pub fn probe_point(segment: &Segment, offset: f64) -> Option<DVec2> {
    let (mid_x, mid_y) = segment.midpoint();
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;

    let perp = DVec2::new(dy, -dx);
    let length = perp.length();
    if length == 0.0 {
        return None;
    }

    Some(DVec2::new(mid_x, mid_y) + (perp / length) * offset)
}

/// Orient every segment of `isoline` in place.
///
/// A probe outside the surface coverage leaves its segment unchanged (the
/// ground is treated as not higher). Any other query failure aborts the
/// level and is returned to the caller.
pub fn orient_isoline<S: Surface>(
    surface: &S,
    isoline: &mut Isoline,
    probe_offset: f64,
) -> Result<OrientStats, QueryError> {
    let mut stats = OrientStats::default();

    for segment in isoline.segments.iter_mut() {
        let Some(probe) = probe_point(segment, probe_offset) else {
            stats.degenerate += 1;
            continue;
        };

        match surface.interpolate(probe.x, probe.y) {
            Ok(z) => {
                if z > segment.height() {
                    segment.flip();
                    stats.flipped += 1;
                }
            }
            Err(QueryError::OutOfCoverage { .. }) => stats.out_of_coverage += 1,
            Err(e) => return Err(e),
        }
    }

    debug!(
        "Level {}: {} flipped, {} probes out of coverage, {} degenerate",
        isoline.height, stats.flipped, stats.out_of_coverage, stats.degenerate
    );

    Ok(stats)
}
