//! Route generation: selection, cost matrix, construction, local search and
//! endpoint resolution for one request.
//!
//! Every request builds its own matrix and tour; nothing is shared between
//! calls, so concurrent requests do not interfere.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cost::{compute_cost_matrix, CostProvider, CostUnit};
use crate::error::{PlanError, ProviderError};
use crate::export::{self, RouteStep};
use crate::improve::{improve, ImproveOptions};
use crate::matrix::CostMatrix;
use crate::policy::{PolicyResult, TourEnd};
use crate::polyline::Polyline;
use crate::select::{select, SelectionStrategy};
use crate::tour::{nearest_neighbor, Tour};
use crate::traits::{RoadTable, RouteGeometry, Site};
use crate::unit::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRequest {
    pub strategy: SelectionStrategy,
    pub provider: CostProvider,
    pub tour_end: TourEnd,
    pub improve: ImproveOptions,
}

#[derive(Debug)]
pub struct RoutePlan<'a, S> {
    /// Selected units; unit `k` is point `k + 1`.
    pub selection: Vec<&'a S>,
    /// `[depot, selection...]`.
    pub points: Vec<Coordinate>,
    pub matrix: CostMatrix,
    pub tour: Tour,
    pub provider_used: CostProvider,
    /// Why a requested road provider was not used.
    pub fallback_reason: Option<ProviderError>,
    pub total_cost: f64,
    pub end: PolicyResult,
}

/// Plans a route from `depot` over units picked from `pool`.
///
/// Provider failures never fail the plan; they show up as
/// `provider_used == Geodesic` with a `fallback_reason`.
pub fn plan_route<'a, S, T>(
    pool: &[&'a S],
    depot: Coordinate,
    request: &RouteRequest,
    road: Option<&T>,
) -> Result<RoutePlan<'a, S>, PlanError>
where
    S: Site + Sync,
    T: RoadTable + ?Sized,
{
    if !depot.is_valid() {
        return Err(PlanError::InvalidDepot {
            lat: depot.lat,
            lng: depot.lng,
        });
    }

    let selection = select(pool, &request.strategy)?;
    if selection.is_empty() {
        return Err(PlanError::EmptySelection);
    }

    let points: Vec<Coordinate> = std::iter::once(depot)
        .chain(selection.iter().map(|unit| unit.location()))
        .collect();

    let outcome = compute_cost_matrix(request.provider, &points, road);
    let closed = request.tour_end.is_closed();

    let tour = nearest_neighbor(&outcome.matrix, 0);
    let tour = improve(tour, &outcome.matrix, closed, &request.improve);
    let total_cost = tour.length(&outcome.matrix, closed);

    let ordered: Vec<Coordinate> = tour.order().iter().map(|&idx| points[idx]).collect();
    let end = request
        .tour_end
        .resolve(&ordered)
        .ok_or(PlanError::EmptySelection)?;

    info!(
        stops = selection.len(),
        provider = ?outcome.provider_used,
        total_cost,
        closed,
        "route planned"
    );

    Ok(RoutePlan {
        selection,
        points,
        matrix: outcome.matrix,
        tour,
        provider_used: outcome.provider_used,
        fallback_reason: outcome.fallback_reason,
        total_cost,
        end,
    })
}

impl<'a, S: Site> RoutePlan<'a, S> {
    /// Unit of `total_cost` and of every step cost.
    pub fn cost_unit(&self) -> CostUnit {
        self.provider_used.unit()
    }

    pub fn ordered_points(&self) -> Vec<Coordinate> {
        self.tour.order().iter().map(|&idx| self.points[idx]).collect()
    }

    /// Selected units in visiting order.
    pub fn ordered_units(&self) -> Vec<&'a S> {
        self.tour
            .order()
            .iter()
            .filter(|&&idx| idx > 0)
            .map(|&idx| self.selection[idx - 1])
            .collect()
    }

    pub fn steps(&self) -> Vec<RouteStep> {
        export::route_steps(
            &self.tour,
            self.points[0],
            &self.selection,
            &self.matrix,
            self.end.is_closed,
        )
    }

    pub fn to_csv(&self) -> String {
        export::steps_to_csv(&self.steps(), self.cost_unit())
    }

    pub fn directions_link(&self) -> Option<Url> {
        let ordered = self.ordered_points();
        export::directions_link(self.points[0], &ordered[1..], self.end.destination)
    }

    /// Line to draw. Road geometry is only requested when road costs were
    /// actually used; otherwise, or when the service has none, the stops are
    /// joined by straight segments.
    pub fn geometry<G: RouteGeometry + ?Sized>(&self, service: Option<&G>) -> Polyline {
        let seq = export::display_sequence(&self.ordered_points(), self.end.is_closed);
        service
            .filter(|_| self.provider_used.is_road())
            .and_then(|service| service.geometry_for(&seq))
            .unwrap_or_else(|| Polyline::straight(&seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    struct Unreachable;

    impl RoadTable for Unreachable {
        fn table_for(
            &self,
            _: &[Coordinate],
            _: crate::traits::RoadMetric,
        ) -> Result<CostMatrix, ProviderError> {
            Err(ProviderError::Status(502))
        }
    }

    fn units() -> Vec<Unit> {
        vec![
            Unit::new("A", "G", 5.0, Coordinate::new(0.0, 1.0)),
            Unit::new("B", "G", 3.0, Coordinate::new(1.0, 1.0)),
            Unit::new("C", "G", 9.0, Coordinate::new(1.0, 0.0)),
        ]
    }

    #[test]
    fn test_invalid_depot_rejected() {
        let units = units();
        let pool: Vec<&Unit> = units.iter().collect();
        let err = plan_route::<_, Unreachable>(&pool, Coordinate::new(f64::NAN, 0.0), &RouteRequest::default(), None)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidDepot { .. }));
    }

    #[test]
    fn test_zero_count_is_empty_selection() {
        let units = units();
        let pool: Vec<&Unit> = units.iter().collect();
        let request = RouteRequest {
            strategy: SelectionStrategy::Priority { count: 0 },
            ..RouteRequest::default()
        };
        let err = plan_route::<_, Unreachable>(&pool, Coordinate::new(0.0, 0.0), &request, None).unwrap_err();
        assert_eq!(err, PlanError::EmptySelection);
    }

    #[test]
    fn test_ordered_units_skip_depot() {
        let units = units();
        let pool: Vec<&Unit> = units.iter().collect();
        let plan = plan_route::<_, Unreachable>(&pool, Coordinate::new(0.0, 0.0), &RouteRequest::default(), None)
            .unwrap();
        let ordered = plan.ordered_units();
        assert_eq!(ordered.len(), 3);
        assert_eq!(plan.ordered_points()[0], Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_geometry_straight_without_road_costs() {
        let units = units();
        let pool: Vec<&Unit> = units.iter().collect();
        let plan = plan_route(&pool, Coordinate::new(0.0, 0.0), &RouteRequest::default(), Some(&Unreachable))
            .unwrap();
        let line = plan.geometry::<crate::osrm::OsrmClient>(None);
        // Closed by default: depot, three units, depot again.
        assert_eq!(line.points().len(), 5);
        assert_eq!(line.points().first(), line.points().last());
    }

    #[test]
    fn test_request_from_json_fills_defaults() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"strategy":{"kind":"priority","count":3},"provider":"road-duration"}"#,
        )
        .unwrap();
        assert_eq!(request.provider, CostProvider::RoadDuration);
        assert_eq!(request.tour_end, TourEnd::ReturnToDepot);
        assert_eq!(request.improve.max_iterations, 200);
    }
}
