//! Route geometry as decoded coordinate sequences.
//!
//! Geometry is presentation-only: it never feeds back into ordering or cost.

use serde::{Deserialize, Serialize};

use crate::unit::Coordinate;

/// A route line of `(lat, lng)` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// GeoJSON order is `[lng, lat]`.
    pub fn from_lng_lat(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().map(|[lng, lat]| (*lat, *lng)).collect(),
        }
    }

    /// Straight segments between consecutive stops.
    pub fn straight(stops: &[Coordinate]) -> Self {
        Self {
            points: stops.iter().map(|c| (c.lat, c.lng)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lng_lat_swaps_axes() {
        let line = Polyline::from_lng_lat(&[[-115.1, 36.1], [-115.2, 36.2]]);
        assert_eq!(line.points(), &[(36.1, -115.1), (36.2, -115.2)]);
    }

    #[test]
    fn test_straight_keeps_stop_order() {
        let stops = [Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0), Coordinate::new(1.0, 2.0)];
        let line = Polyline::straight(&stops);
        assert_eq!(line.into_points(), vec![(1.0, 2.0), (3.0, 4.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_empty_polyline() {
        assert!(Polyline::new(vec![]).is_empty());
        assert!(Polyline::straight(&[]).is_empty());
    }
}
