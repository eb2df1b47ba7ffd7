//! OSRM HTTP adapter for road cost tables and route geometry.

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::matrix::CostMatrix;
use crate::polyline::Polyline;
use crate::traits::{RoadMetric, RoadTable, RouteGeometry};
use crate::unit::Coordinate;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Largest point set sent to the table service.
    pub max_table_points: usize,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
            max_table_points: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ProviderError::Client(err.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn service_url(&self, service: &str, points: &[Coordinate]) -> String {
        format!(
            "{}/{}/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            service,
            self.config.profile,
            coordinate_list(points)
        )
    }
}

/// OSRM expects `lng,lat` pairs joined by `;`.
fn coordinate_list(points: &[Coordinate]) -> String {
    points
        .iter()
        .map(|p| format!("{:.6},{:.6}", p.lng, p.lat))
        .collect::<Vec<_>>()
        .join(";")
}

impl RoadTable for OsrmClient {
    fn table_for(
        &self,
        points: &[Coordinate],
        metric: RoadMetric,
    ) -> Result<CostMatrix, ProviderError> {
        if points.len() > self.config.max_table_points {
            return Err(ProviderError::TooManyPoints {
                count: points.len(),
                limit: self.config.max_table_points,
            });
        }
        if points.is_empty() {
            return Ok(CostMatrix::from_trusted(0, Vec::new()));
        }

        let annotation = match metric {
            RoadMetric::Distance => "distance",
            RoadMetric::Duration => "duration",
        };
        let url = format!(
            "{}?annotations={}",
            self.service_url("table", points),
            annotation
        );
        debug!(points = points.len(), annotation, "requesting OSRM table");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        let body = response.json::<TableResponse>()?;

        body.into_matrix(metric)
    }
}

impl RouteGeometry for OsrmClient {
    fn geometry_for(&self, points: &[Coordinate]) -> Option<Polyline> {
        if points.len() < 2 {
            return None;
        }

        let url = format!(
            "{}?overview=full&geometries=geojson",
            self.service_url("route", points)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<RouteResponse>());

        match response {
            Ok(body) => body.into_polyline(),
            Err(err) => {
                debug!(error = %err, "OSRM route geometry unavailable");
                None
            }
        }
    }
}

/// Body of an OSRM `/table` answer. Unreachable pairs come back as `null`.
#[derive(Debug, Deserialize)]
pub struct TableResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

impl TableResponse {
    /// Converts meters to kilometers or seconds to minutes. Any unreachable
    /// pair fails the whole table.
    pub fn into_matrix(self, metric: RoadMetric) -> Result<CostMatrix, ProviderError> {
        if self.code.as_deref().is_some_and(|code| code != "Ok") {
            return Err(ProviderError::MissingMatrix);
        }

        let (rows, divisor) = match metric {
            RoadMetric::Distance => (self.distances, 1000.0),
            RoadMetric::Duration => (self.durations, 60.0),
        };
        let rows = rows.ok_or(ProviderError::MissingMatrix)?;

        let converted = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| value.map_or(f64::INFINITY, |v| v / divisor))
                    .collect()
            })
            .collect();

        let matrix = CostMatrix::from_rows(converted)?;
        matrix.ensure_finite()?;
        Ok(matrix)
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    geometry: GeoJsonLine,
}

#[derive(Debug, Deserialize)]
struct GeoJsonLine {
    coordinates: Vec<[f64; 2]>,
}

impl RouteResponse {
    fn into_polyline(self) -> Option<Polyline> {
        let route = self.routes.into_iter().next()?;
        Some(Polyline::from_lng_lat(&route.geometry.coordinates))
    }
}
