//! Cost matrix construction with explicit fallback to the geodesic provider.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::haversine::HaversineMatrix;
use crate::matrix::CostMatrix;
use crate::traits::{RoadMetric, RoadTable};
use crate::unit::Coordinate;

/// Requested cost source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostProvider {
    #[default]
    Geodesic,
    RoadDistance,
    RoadDuration,
}

impl CostProvider {
    fn road_metric(self) -> Option<RoadMetric> {
        match self {
            CostProvider::Geodesic => None,
            CostProvider::RoadDistance => Some(RoadMetric::Distance),
            CostProvider::RoadDuration => Some(RoadMetric::Duration),
        }
    }

    pub fn unit(self) -> CostUnit {
        match self {
            CostProvider::Geodesic | CostProvider::RoadDistance => CostUnit::Kilometers,
            CostProvider::RoadDuration => CostUnit::Minutes,
        }
    }

    pub fn is_road(self) -> bool {
        self.road_metric().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostUnit {
    Kilometers,
    Minutes,
}

/// A matrix together with the provider that actually produced it.
#[derive(Debug)]
pub struct MatrixOutcome {
    pub matrix: CostMatrix,
    pub provider_used: CostProvider,
    /// Set when a road provider was requested and the geodesic one answered.
    pub fallback_reason: Option<ProviderError>,
}

impl MatrixOutcome {
    pub fn unit(&self) -> CostUnit {
        self.provider_used.unit()
    }
}

/// Builds the cost matrix over `points` (index 0 is the depot).
///
/// Never fails: a road request that cannot be served falls back to geodesic
/// distance and says so in `provider_used`.
pub fn compute_cost_matrix<T>(
    requested: CostProvider,
    points: &[Coordinate],
    road: Option<&T>,
) -> MatrixOutcome
where
    T: RoadTable + ?Sized,
{
    let Some(metric) = requested.road_metric() else {
        return geodesic(points, None);
    };

    let attempt = match road {
        Some(road) => road.table_for(points, metric).and_then(|matrix| {
            if matrix.len() != points.len() {
                return Err(ProviderError::MissingMatrix);
            }
            matrix.ensure_finite()?;
            Ok(matrix)
        }),
        None => Err(ProviderError::NotConfigured),
    };

    match attempt {
        Ok(matrix) => {
            debug!(points = points.len(), ?requested, "road table accepted");
            MatrixOutcome {
                matrix,
                provider_used: requested,
                fallback_reason: None,
            }
        }
        Err(reason) => {
            warn!(%reason, ?requested, "road table unavailable, using geodesic distance");
            geodesic(points, Some(reason))
        }
    }
}

fn geodesic(points: &[Coordinate], fallback_reason: Option<ProviderError>) -> MatrixOutcome {
    MatrixOutcome {
        matrix: HaversineMatrix.matrix_for(points),
        provider_used: CostProvider::Geodesic,
        fallback_reason,
    }
}
