//! Where a triangle edge meets a contour level.

use tanaka_core::types::Point3;

/// Intersection of an edge with the horizontal plane `z = height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The edge does not reach the level.
    None,
    /// The edge passes through the level at one point.
    Point(Point3),
    /// The whole edge lies on the level.
    Edge(Point3, Point3),
}

impl Crossing {
    /// The crossing's points (0, 1 or 2), all at the level's elevation.
    pub fn points(&self) -> impl Iterator<Item = Point3> {
        let (a, b) = match *self {
            Crossing::None => (None, None),
            Crossing::Point(p) => (Some(p), None),
            Crossing::Edge(p, q) => (Some(p), Some(q)),
        };
        a.into_iter().chain(b)
    }
}

/// Intersect the edge `p1`–`p2` with the level `height`.
///
/// A flat edge counts only when it sits exactly on the level; the
/// comparison is exact so flat edges are never picked up by rounding.
pub fn resolve_crossing(p1: Point3, p2: Point3, height: f64) -> Crossing {
    if p1.z == p2.z {
        return if p1.z == height {
            Crossing::Edge(p1.with_z(height), p2.with_z(height))
        } else {
            Crossing::None
        };
    }

    // An endpoint on the level is returned as-is so edges sharing that
    // vertex produce bit-identical points.
    if p1.z == height {
        return Crossing::Point(p1.with_z(height));
    }
    if p2.z == height {
        return Crossing::Point(p2.with_z(height));
    }

    let t = (height - p1.z) / (p2.z - p1.z);
    if !(0.0..=1.0).contains(&t) {
        return Crossing::None;
    }

    let x = p1.x + t * (p2.x - p1.x);
    let y = p1.y + t * (p2.y - p1.y);
    Crossing::Point(Point3::new(x, y, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_crossing() {
        let c = resolve_crossing(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 10.0), 5.0);
        assert_eq!(c, Crossing::Point(Point3::new(5.0, 0.0, 5.0)));
    }

    #[test]
    fn test_flat_edge_on_level() {
        let p1 = Point3::new(0.0, 0.0, 5.0);
        let p2 = Point3::new(10.0, 0.0, 5.0);
        assert_eq!(resolve_crossing(p1, p2, 5.0), Crossing::Edge(p1, p2));
        assert_eq!(resolve_crossing(p1, p2, 5.0).points().count(), 2);
    }

    #[test]
    fn test_flat_edge_off_level() {
        let p1 = Point3::new(0.0, 0.0, 5.0);
        let p2 = Point3::new(10.0, 0.0, 5.0);
        assert_eq!(resolve_crossing(p1, p2, 5.000001), Crossing::None);
    }

    #[test]
    fn test_level_outside_edge_range() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(1.0, 1.0, 2.0);
        assert_eq!(resolve_crossing(p1, p2, 3.0), Crossing::None);
        assert_eq!(resolve_crossing(p1, p2, -0.5), Crossing::None);
        assert_eq!(resolve_crossing(p1, p2, 3.0).points().count(), 0);
    }

    #[test]
    fn test_crossing_at_endpoint() {
        let p1 = Point3::new(2.0, 3.0, 4.0);
        let p2 = Point3::new(6.0, 7.0, 8.0);
        assert_eq!(resolve_crossing(p1, p2, 4.0), Crossing::Point(p1));
        assert_eq!(resolve_crossing(p1, p2, 8.0), Crossing::Point(p2));
    }

    #[test]
    fn test_on_level_endpoint_is_returned_exactly() {
        let on_level = Point3::new(183.39291592934836, 334.6029393646604, 10.0);
        let above = Point3::new(712.3118003462613, 48.77190322211851, 11.0);
        assert_eq!(resolve_crossing(above, on_level, 10.0), Crossing::Point(on_level));
        assert_eq!(resolve_crossing(on_level, above, 10.0), Crossing::Point(on_level));
    }

    #[test]
    fn test_direction_of_edge_does_not_matter() {
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(4.0, 8.0, 4.0);
        assert_eq!(resolve_crossing(p1, p2, 1.0), resolve_crossing(p2, p1, 1.0));
    }
}
