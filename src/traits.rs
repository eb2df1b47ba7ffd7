//! Core domain traits for the route planner.
//!
//! These are intentionally minimal. Catalog loaders and remote services
//! implement them for their own data models.

use crate::error::ProviderError;
use crate::matrix::CostMatrix;
use crate::polyline::Polyline;
use crate::unit::Coordinate;

/// A unit of the catalog that can be selected and routed.
///
/// Records are expected to be validated at ingestion: finite weight and a
/// coordinate within geographic ranges.
pub trait Site {
    /// Identifier, unique within a group.
    fn id(&self) -> &str;

    /// Depot/site grouping key.
    fn group(&self) -> &str;

    /// Business priority (higher is more urgent).
    fn weight(&self) -> f64;

    fn location(&self) -> Coordinate;
}

/// What a road table should measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadMetric {
    /// Kilometers.
    Distance,
    /// Minutes.
    Duration,
}

/// Provides a pairwise road cost table for an ordered set of points.
///
/// The table is indexed by the provided point order and is not assumed
/// symmetric. Failures are reported, never swallowed; the caller decides
/// how to recover.
pub trait RoadTable {
    fn table_for(
        &self,
        points: &[Coordinate],
        metric: RoadMetric,
    ) -> Result<CostMatrix, ProviderError>;
}

/// Provides a road-following geometry for an ordered point sequence.
pub trait RouteGeometry {
    /// `None` when no geometry is available; callers draw straight segments.
    fn geometry_for(&self, points: &[Coordinate]) -> Option<Polyline>;
}
