//! Contour segment extraction from surface triangles.
//!
//! Each triangle that reaches the level contributes at most one segment.
//! Segments stay independent: they are never chained into polylines,
//! because illumination is a per-segment property.

use std::collections::HashSet;

use log::debug;
use tanaka_core::surface::Surface;
use tanaka_core::types::{Isoline, Point3, Segment, Triangle};

use crate::crossing::resolve_crossing;

/// Counters gathered while extracting one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub triangles: usize,
    pub skipped: usize,
    pub discarded: usize,
    pub duplicates: usize,
}

/// Extract every contour segment at `height`.
pub fn extract_isoline<S: Surface>(surface: &S, height: f64) -> Isoline {
    extract_isoline_with_stats(surface, height).0
}

/// Same as [`extract_isoline`], also returning extraction counters.
pub fn extract_isoline_with_stats<S: Surface>(
    surface: &S,
    height: f64,
) -> (Isoline, ExtractStats) {
    let mut isoline = Isoline::new(height);
    let mut seen: HashSet<[[u64; 3]; 2]> = HashSet::new();
    let mut stats = ExtractStats::default();

    for triangle in surface.triangles() {
        stats.triangles += 1;
        if triangle.misses_level(height) {
            stats.skipped += 1;
            continue;
        }

        let Some(segment) = triangle_segment(&triangle, height) else {
            stats.discarded += 1;
            continue;
        };

        if seen.insert(segment.unordered_key()) {
            isoline.segments.push(segment);
        } else {
            stats.duplicates += 1;
        }
    }

    debug!(
        "Level {height}: {} triangles, {} skipped, {} discarded, {} duplicates, {} segments",
        stats.triangles,
        stats.skipped,
        stats.discarded,
        stats.duplicates,
        isoline.len()
    );

    (isoline, stats)
}

/// The segment a single triangle contributes at `height`, if any.
///
/// All three edges are resolved before deciding. The triangle yields a
/// segment only when exactly two distinct crossing points remain; a lone
/// vertex touching the level, or a triangle lying flat on it, yields none.
pub fn triangle_segment(triangle: &Triangle, height: f64) -> Option<Segment> {
    let mut points: Vec<Point3> = Vec::with_capacity(6);

    for (p1, p2) in triangle.edges() {
        for p in resolve_crossing(p1, p2, height).points() {
            if !points.iter().any(|q| q.key() == p.key()) {
                points.push(p);
            }
        }
    }

    match points.as_slice() {
        [a, b] => Some(Segment::new(*a, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanaka_core::surface::QueryError;

    /// Bare triangle list with no interpolation.
    struct TriangleSoup(Vec<Triangle>);

    impl Surface for TriangleSoup {
        fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
            self.0.iter().copied()
        }

        fn interpolate(&self, x: f64, y: f64) -> Result<f64, QueryError> {
            Err(QueryError::OutOfCoverage { x, y })
        }
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_single_triangle_crossing() {
        let tri = Triangle::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 10.0), p(0.0, 10.0, 10.0));
        let iso = extract_isoline(&TriangleSoup(vec![tri]), 5.0);
        assert_eq!(iso.len(), 1);
        let seg = iso.segments[0];
        assert_eq!(seg.start, p(5.0, 0.0, 5.0));
        assert_eq!(seg.end, p(0.0, 5.0, 5.0));
        assert!(seg.illumination.is_none());
    }

    #[test]
    fn test_strict_crossing_gives_one_segment_at_level() {
        let tri = Triangle::new(p(0.0, 0.0, 1.0), p(4.0, 1.0, 7.0), p(2.0, 5.0, 3.5));
        for &h in &[1.5, 2.0, 3.0, 4.0, 6.9] {
            let seg = triangle_segment(&tri, h).expect("strict crossing must yield a segment");
            assert_eq!(seg.start.z, h);
            assert_eq!(seg.end.z, h);
        }
    }

    #[test]
    fn test_non_strict_sides_give_nothing() {
        // Lone vertex at level, others above.
        let above = Triangle::new(p(0.0, 0.0, 5.0), p(1.0, 0.0, 6.0), p(0.0, 1.0, 7.0));
        assert!(triangle_segment(&above, 5.0).is_none());
        // Lone vertex at level, others below.
        let below = Triangle::new(p(0.0, 0.0, 5.0), p(1.0, 0.0, 4.0), p(0.0, 1.0, 3.0));
        assert!(triangle_segment(&below, 5.0).is_none());
        // Entire triangle flat on the level.
        let flat = Triangle::new(p(0.0, 0.0, 5.0), p(1.0, 0.0, 5.0), p(0.0, 1.0, 5.0));
        assert!(triangle_segment(&flat, 5.0).is_none());
    }

    #[test]
    fn test_vertex_on_level_between_higher_and_lower() {
        // a sits at the level, b above, c below: the segment runs from a to the b–c crossing.
        let tri = Triangle::new(p(0.0, 0.0, 5.0), p(10.0, 0.0, 10.0), p(10.0, 10.0, 0.0));
        let seg = triangle_segment(&tri, 5.0).unwrap();
        let mut ends = [seg.start, seg.end];
        ends.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(ends, [p(0.0, 0.0, 5.0), p(10.0, 5.0, 5.0)]);
    }

    #[test]
    fn test_last_vertex_on_level_with_irregular_coordinates() {
        // c is the second endpoint of both edges it belongs to.
        let a = p(412.0937717012395, 871.2269113842376, 11.0);
        let b = p(35.84407159470513, 290.56623497122764, 12.0);
        let c = p(183.39291592934836, 334.6029393646604, 10.0);
        assert!(
            triangle_segment(&Triangle::new(a, b, c), 10.0).is_none(),
            "Vertex touching the level from below the rest must not yield a segment"
        );

        let below = p(35.84407159470513, 290.56623497122764, 9.0);
        let seg = triangle_segment(&Triangle::new(a, below, c), 10.0)
            .expect("Vertex between higher and lower ground must yield a segment");
        assert!(seg.start == c || seg.end == c, "Segment must start or end exactly at c");
        assert_eq!(seg.start.z, 10.0);
        assert_eq!(seg.end.z, 10.0);
    }

    #[test]
    fn test_many_irregular_triangles_touching_the_level() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut coord = || p(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0), 0.0);
        for _ in 0..10_000 {
            let (a, b, c) = (coord(), coord(), coord());
            let touch = Triangle::new(a.with_z(11.0), b.with_z(12.0), c.with_z(10.0));
            assert!(triangle_segment(&touch, 10.0).is_none());
            let split = Triangle::new(a.with_z(11.0), b.with_z(9.0), c.with_z(10.0));
            assert!(triangle_segment(&split, 10.0).is_some());
        }
    }

    #[test]
    fn test_edge_on_level_yields_edge_segment() {
        // Edge a–b lies on the level, c is above.
        let tri = Triangle::new(p(0.0, 0.0, 5.0), p(10.0, 0.0, 5.0), p(5.0, 5.0, 9.0));
        let seg = triangle_segment(&tri, 5.0).unwrap();
        let expected = Segment::new(p(0.0, 0.0, 5.0), p(10.0, 0.0, 5.0));
        assert_eq!(seg.unordered_key(), expected.unordered_key());
    }

    #[test]
    fn test_shared_flat_edge_is_emitted_once() {
        let a = p(0.0, 0.0, 5.0);
        let b = p(10.0, 0.0, 5.0);
        let up = Triangle::new(a, b, p(5.0, 5.0, 9.0));
        let down = Triangle::new(b, a, p(5.0, -5.0, 1.0));
        let (iso, stats) = extract_isoline_with_stats(&TriangleSoup(vec![up, down]), 5.0);
        assert_eq!(iso.len(), 1, "Shared edge on the level must appear once");
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn test_triangles_off_level_are_skipped() {
        let tri = Triangle::new(p(0.0, 0.0, 1.0), p(1.0, 0.0, 2.0), p(0.0, 1.0, 3.0));
        let (iso, stats) = extract_isoline_with_stats(&TriangleSoup(vec![tri]), 10.0);
        assert!(iso.is_empty());
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.triangles, 1);
    }

    #[test]
    fn test_triangle_order_does_not_change_result() {
        let tris = vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(10.0, 0.0, 10.0), p(0.0, 10.0, 10.0)),
            Triangle::new(p(10.0, 0.0, 10.0), p(10.0, 10.0, 0.0), p(0.0, 10.0, 10.0)),
            Triangle::new(p(0.0, 0.0, 5.0), p(10.0, 0.0, 5.0), p(5.0, -5.0, 9.0)),
        ];
        let forward = extract_isoline(&TriangleSoup(tris.clone()), 5.0);
        let mut reversed_tris = tris;
        reversed_tris.reverse();
        let backward = extract_isoline(&TriangleSoup(reversed_tris), 5.0);

        let keys = |iso: &Isoline| {
            let mut k: Vec<_> = iso.segments.iter().map(Segment::unordered_key).collect();
            k.sort();
            k
        };
        assert_eq!(keys(&forward), keys(&backward));
    }
}
