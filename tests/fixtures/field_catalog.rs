//! Unit catalogs laid out around two depot towns in southeastern Pará.
//!
//! Positions are generated on a deterministic jittered grid around each
//! town center so that tests are reproducible.

use field_route::unit::{Coordinate, Unit};

pub const PARAUAPEBAS: Coordinate = Coordinate::new(-6.0675, -49.9025);
pub const CANAA: Coordinate = Coordinate::new(-6.4966, -49.8781);

/// Depot (0,0) and units A(0,1), B(1,1), C(1,0) weighted 5, 3, 9.
pub fn square() -> Vec<Unit> {
    vec![
        Unit::new("A", "SQUARE", 5.0, Coordinate::new(0.0, 1.0)),
        Unit::new("B", "SQUARE", 3.0, Coordinate::new(1.0, 1.0)),
        Unit::new("C", "SQUARE", 9.0, Coordinate::new(1.0, 0.0)),
    ]
}

/// `count` units of `group` spread over roughly 20 km around `center`.
pub fn grid_group(group: &str, center: Coordinate, count: usize, seed: u64) -> Vec<Unit> {
    let mut state = seed;
    let mut jitter = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5
    };

    let side = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            let (row, col) = ((i / side) as f64, (i % side) as f64);
            let lat = center.lat + (row - side as f64 / 2.0) * 0.03 + jitter() * 0.01;
            let lng = center.lng + (col - side as f64 / 2.0) * 0.03 + jitter() * 0.01;
            let weight = ((i * 37 + 11) % 100) as f64 / 4.0;
            Unit::new(format!("{group}-{i:03}"), group, weight, Coordinate::new(lat, lng))
        })
        .collect()
}

/// Two depot groups, interleaved the way catalog files usually list them.
pub fn field_catalog() -> Vec<Unit> {
    let north = grid_group("PARAUAPEBAS", PARAUAPEBAS, 30, 7);
    let south = grid_group("CANAA", CANAA, 24, 11);

    let mut all = Vec::with_capacity(north.len() + south.len());
    let mut north = north.into_iter();
    let mut south = south.into_iter();
    loop {
        match (north.next(), south.next()) {
            (None, None) => break,
            (a, b) => all.extend(a.into_iter().chain(b)),
        }
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_counts() {
        let all = field_catalog();
        assert_eq!(all.len(), 54);
        assert_eq!(all.iter().filter(|u| u.group == "CANAA").count(), 24);
    }

    #[test]
    fn test_catalog_coordinates_valid() {
        for unit in field_catalog() {
            assert!(unit.coordinate.is_valid(), "{} has invalid coordinate", unit.id);
            assert!(unit.weight.is_finite() && unit.weight >= 0.0);
        }
    }
}
