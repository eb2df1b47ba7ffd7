//! Where a route ends, and whether the return leg counts toward its cost.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::unit::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum TourEnd {
    /// Closed tour back to the depot.
    #[default]
    ReturnToDepot,
    /// Open tour ending at the last visited unit.
    EndAtLast,
    /// Open tour reported as ending at a chosen point. Missing or invalid
    /// components fall back to the last visited unit.
    Custom { lat: Option<f64>, lng: Option<f64> },
}

/// Resolved endpoint of a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub destination: Coordinate,
    pub is_closed: bool,
}

impl TourEnd {
    /// Objective used by construction and local search.
    pub fn is_closed(&self) -> bool {
        matches!(self, TourEnd::ReturnToDepot)
    }

    /// Picks the reported endpoint from points already in visiting order.
    /// `None` only for an empty sequence.
    pub fn resolve(&self, ordered: &[Coordinate]) -> Option<PolicyResult> {
        let first = *ordered.first()?;
        let last = *ordered.last()?;

        let destination = match *self {
            TourEnd::ReturnToDepot => first,
            TourEnd::EndAtLast => last,
            TourEnd::Custom { lat, lng } => match (lat, lng) {
                (Some(lat), Some(lng)) => Coordinate::checked(lat, lng).unwrap_or_else(|| {
                    warn!(lat, lng, "custom destination out of range, ending at last stop");
                    last
                }),
                _ => last,
            },
        };

        Some(PolicyResult {
            destination,
            is_closed: self.is_closed(),
        })
    }
}
