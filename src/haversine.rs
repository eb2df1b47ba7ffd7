//! Haversine cost matrix provider (fallback when the road network is unavailable).
//!
//! Uses great-circle distance in kilometers. Less accurate than road routing
//! (ignores roads) but always available.

use rayon::prelude::*;

use crate::matrix::CostMatrix;
use crate::unit::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine-based cost matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    /// Kilometer matrix over `points`. Exactly symmetric: each pair is
    /// evaluated in index order regardless of direction.
    pub fn matrix_for(&self, points: &[Coordinate]) -> CostMatrix {
        let n = points.len();
        let data: Vec<f64> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| {
                (0..n).map(move |j| match i.cmp(&j) {
                    std::cmp::Ordering::Equal => 0.0,
                    std::cmp::Ordering::Less => haversine_km(points[i], points[j]),
                    std::cmp::Ordering::Greater => haversine_km(points[j], points[i]),
                })
            })
            .collect();

        CostMatrix::from_trusted(n, data)
    }
}
