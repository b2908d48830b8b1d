use crate::domain::{PolygonGeometry, ProjectedPoint};

/// Collects accepted points in input order and closes the ring on finish
#[derive(Debug, Default, Clone)]
pub struct RingAssembler {
    points: Vec<ProjectedPoint>,
}

impl RingAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: ProjectedPoint) {
        self.points.push(point);
    }

    /// Build the polygon, or `None` when no point was accepted
    ///
    /// A copy of the first point is appended unless the last point is
    /// already coordinate-identical to it. No minimum vertex count is
    /// enforced, so a single accepted point yields a one-position ring.
    pub fn finish(self) -> Option<PolygonGeometry> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;

        let mut ring: Vec<[f64; 2]> = self.points.iter().map(ProjectedPoint::position).collect();
        if first != last {
            ring.push(first.position());
        }

        Some(PolygonGeometry::from_ring(ring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lon: f64, lat: f64) -> ProjectedPoint {
        ProjectedPoint::new(lon, lat)
    }

    #[test]
    fn test_empty_yields_none() {
        assert!(RingAssembler::new().finish().is_none());
    }

    #[test]
    fn test_closes_open_ring() {
        let mut ring = RingAssembler::new();
        ring.push(point(178.0, -17.0));
        ring.push(point(178.1, -17.0));
        ring.push(point(178.1, -17.1));

        let polygon = ring.finish().unwrap();
        let outer = polygon.outer_ring().unwrap();
        assert_eq!(outer.len(), 4);
        assert_eq!(outer.first(), outer.last());
    }

    #[test]
    fn test_keeps_already_closed_ring() {
        let mut ring = RingAssembler::new();
        ring.push(point(178.0, -17.0));
        ring.push(point(178.1, -17.0));
        ring.push(point(178.1, -17.1));
        ring.push(point(178.0, -17.0));

        let polygon = ring.finish().unwrap();
        assert_eq!(polygon.outer_ring().unwrap().len(), 4);
        assert!(polygon.is_closed());
    }

    #[test]
    fn test_single_point_ring() {
        let mut ring = RingAssembler::new();
        ring.push(point(178.0, -17.0));

        let polygon = ring.finish().unwrap();
        assert_eq!(polygon.outer_ring().unwrap(), &[[178.0, -17.0]]);
    }

    #[test]
    fn test_preserves_input_order() {
        let mut ring = RingAssembler::new();
        ring.push(point(178.2, -17.0));
        ring.push(point(178.0, -17.0));

        let polygon = ring.finish().unwrap();
        assert_eq!(
            polygon.outer_ring().unwrap(),
            &[[178.2, -17.0], [178.0, -17.0], [178.2, -17.0]]
        );
    }
}
