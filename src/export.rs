//! Presentation of a planned route: per-stop cost breakdown, CSV, display
//! sequence and a directions link.

use reqwest::Url;
use serde::Serialize;

use crate::cost::CostUnit;
use crate::matrix::CostMatrix;
use crate::tour::Tour;
use crate::traits::Site;
use crate::unit::Coordinate;

pub const DEPOT_LABEL: &str = "BASE";
pub const RETURN_LABEL: &str = "BASE (return)";

/// Directions links accept a limited number of intermediate stops.
pub const MAX_LINK_WAYPOINTS: usize = 23;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    /// 1-based position along the route.
    pub position: usize,
    pub label: String,
    pub coordinate: Coordinate,
    /// `None` for the depot.
    pub weight: Option<f64>,
    /// Cost from the previous step; zero for the first.
    pub leg_cost: f64,
    pub cumulative_cost: f64,
}

/// One step per tour position over `[depot, units...]`, plus a return step
/// for closed tours.
pub fn route_steps<S: Site>(
    tour: &Tour,
    depot: Coordinate,
    units: &[&S],
    matrix: &CostMatrix,
    closed: bool,
) -> Vec<RouteStep> {
    let describe = |idx: usize| match idx {
        0 => (DEPOT_LABEL.to_string(), depot, None),
        _ => {
            let unit = units[idx - 1];
            (unit.id().to_string(), unit.location(), Some(unit.weight()))
        }
    };

    let order = tour.order();
    let mut steps = Vec::with_capacity(order.len() + 1);
    let mut cumulative = 0.0;

    for (pos, &idx) in order.iter().enumerate() {
        let leg_cost = if pos == 0 { 0.0 } else { matrix.get(order[pos - 1], idx) };
        cumulative += leg_cost;
        let (label, coordinate, weight) = describe(idx);
        steps.push(RouteStep {
            position: pos + 1,
            label,
            coordinate,
            weight,
            leg_cost,
            cumulative_cost: cumulative,
        });
    }

    if closed && order.len() > 1 {
        let (first, last) = (order[0], order[order.len() - 1]);
        let leg_cost = matrix.get(last, first);
        cumulative += leg_cost;
        let (_, coordinate, _) = describe(first);
        steps.push(RouteStep {
            position: steps.len() + 1,
            label: RETURN_LABEL.to_string(),
            coordinate,
            weight: None,
            leg_cost,
            cumulative_cost: cumulative,
        });
    }

    steps
}

/// CSV with a header; kilometers use three decimals, minutes two.
pub fn steps_to_csv(steps: &[RouteStep], unit: CostUnit) -> String {
    let (suffix, decimals) = match unit {
        CostUnit::Kilometers => ("km", 3),
        CostUnit::Minutes => ("min", 2),
    };

    let mut out = format!("order,id,lat,lng,weight,leg_{suffix},cumulative_{suffix}\n");
    for step in steps {
        let weight = step.weight.map(|w| w.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{:.*},{:.*}\n",
            step.position,
            csv_field(&step.label),
            step.coordinate.lat,
            step.coordinate.lng,
            weight,
            decimals,
            step.leg_cost,
            decimals,
            step.cumulative_cost,
        ));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Stops in visiting order, with the start repeated at the end of a closed
/// route so it can be drawn.
pub fn display_sequence(ordered: &[Coordinate], closed: bool) -> Vec<Coordinate> {
    let mut seq = ordered.to_vec();
    if closed && ordered.len() > 1 {
        seq.push(ordered[0]);
    }
    seq
}

/// Driving directions from `origin` through `waypoints` (first
/// [`MAX_LINK_WAYPOINTS`] only) to `destination`.
pub fn directions_link(origin: Coordinate, waypoints: &[Coordinate], destination: Coordinate) -> Option<Url> {
    let mut url = Url::parse(DIRECTIONS_URL).ok()?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("api", "1")
            .append_pair("origin", &origin.to_lat_lng_string())
            .append_pair("destination", &destination.to_lat_lng_string())
            .append_pair("travelmode", "driving");

        let stops = waypoints
            .iter()
            .take(MAX_LINK_WAYPOINTS)
            .map(Coordinate::to_lat_lng_string)
            .collect::<Vec<_>>()
            .join("|");
        if !stops.is_empty() {
            query.append_pair("waypoints", &stops);
        }
    }
    Some(url)
}
