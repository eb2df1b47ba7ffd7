//! Coordinates and the default unit record.

use serde::{Deserialize, Serialize};

use crate::traits::Site;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a coordinate only if both components are finite and within
    /// geographic ranges.
    pub fn checked(lat: f64, lng: f64) -> Option<Self> {
        let coordinate = Self::new(lat, lng);
        coordinate.is_valid().then_some(coordinate)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// `lat,lng` with six decimals, the format used in links and exports.
    pub fn to_lat_lng_string(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Catalog record for a maintained asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub group: String,
    pub weight: f64,
    pub coordinate: Coordinate,
}

impl Unit {
    pub fn new(
        id: impl Into<String>,
        group: impl Into<String>,
        weight: f64,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            id: id.into(),
            group: group.into(),
            weight,
            coordinate,
        }
    }
}

impl Site for Unit {
    fn id(&self) -> &str {
        &self.id
    }

    fn group(&self) -> &str {
        &self.group
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn location(&self) -> Coordinate {
        self.coordinate
    }
}
