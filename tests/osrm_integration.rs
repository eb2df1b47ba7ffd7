//! Road table and geometry against a live OSRM container.
//!
//! Needs docker and a preprocessed (MLD) OSRM dataset:
//!
//! ```text
//! OSRM_DATA_DIR=/path/to/data OSRM_DATASET=nevada-latest.osrm \
//!     cargo test --test osrm_integration -- --ignored
//! ```
//!
//! The probe points are in Las Vegas, so the dataset must cover Nevada.

use std::env;
use std::time::{Duration, Instant};

use testcontainers::core::{IntoContainerPort, Mount};
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, ReuseDirective, TestcontainersError};

use field_route::cost::{compute_cost_matrix, CostProvider, CostUnit};
use field_route::osrm::{OsrmClient, OsrmConfig};
use field_route::traits::{RoadMetric, RoadTable, RouteGeometry};
use field_route::unit::Coordinate;

const PROBES: [Coordinate; 3] = [
    Coordinate::new(36.1147, -115.1728),
    Coordinate::new(36.1727, -115.1580),
    Coordinate::new(36.1215, -115.1739),
];

fn osrm_container(data_dir: &str, dataset: &str) -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("osrm/osrm-backend", "latest")
        .with_exposed_port(5000.tcp())
        .with_mount(Mount::bind_mount(data_dir.to_string(), "/data"))
        .with_cmd(vec![
            "osrm-routed".to_string(),
            "--algorithm".to_string(),
            "mld".to_string(),
            format!("/data/{dataset}"),
        ])
        .with_container_name(format!("field-route-osrm-{}", dataset.replace('.', "-")))
        .with_startup_timeout(Duration::from_secs(30))
        .with_reuse(ReuseDirective::Always);

    let container = image.start()?;
    let port = container.get_host_port_ipv4(5000.tcp())?;
    Ok((container, format!("http://127.0.0.1:{port}")))
}

fn client_for(base_url: String) -> OsrmClient {
    OsrmClient::new(OsrmConfig {
        base_url,
        profile: "driving".to_string(),
        ..OsrmConfig::default()
    })
    .expect("build OSRM client")
}

#[test]
#[ignore = "requires docker and a preprocessed OSRM dataset"]
fn osrm_table_and_route_geometry() {
    let (Ok(data_dir), Ok(dataset)) = (env::var("OSRM_DATA_DIR"), env::var("OSRM_DATASET")) else {
        eprintln!("OSRM_DATA_DIR / OSRM_DATASET not set, skipping");
        return;
    };

    let (container, base_url) = osrm_container(&data_dir, &dataset).expect("start OSRM container");
    let client = client_for(base_url);

    // The server may still be loading the dataset right after start.
    let started = Instant::now();
    let distances = loop {
        match client.table_for(&PROBES, RoadMetric::Distance) {
            Ok(matrix) => break matrix,
            Err(err) if started.elapsed() < Duration::from_secs(15) => {
                eprintln!("OSRM not ready: {err}");
                std::thread::sleep(Duration::from_millis(500));
            }
            Err(err) => {
                if let Ok(stderr) = container.stderr_to_vec() {
                    eprintln!("OSRM stderr:\n{}", String::from_utf8_lossy(&stderr));
                }
                panic!("OSRM table failed: {err}");
            }
        }
    };

    assert_eq!(distances.len(), PROBES.len());
    // Road distance between Strip points is a few kilometers, not meters.
    assert!(distances.get(0, 1) > 1.0 && distances.get(0, 1) < 30.0);

    let outcome = compute_cost_matrix(CostProvider::RoadDuration, &PROBES, Some(&client));
    assert_eq!(outcome.provider_used, CostProvider::RoadDuration);
    assert_eq!(outcome.unit(), CostUnit::Minutes);

    let line = client.geometry_for(&PROBES).expect("route geometry");
    assert!(line.points().len() >= PROBES.len());

    drop(container);
}
