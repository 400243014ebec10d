use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const REQUEST_HEADER: &str = "ride_type, pickup_lat, pickup_lng, dropoff_lat, dropoff_lng, \
                              distance_km, duration_min, ratio, moment, weather";

fn catalog_with_active_version() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "versions": [{{"id": 1, "name": "launch", "status": "draft"}}],
            "geofences": [{{
                "min_lat": 39.0, "max_lat": 41.0, "min_lng": -4.0, "max_lng": -3.0,
                "location": {{
                    "country_id": 1, "region_id": 10, "city_id": 100,
                    "zone_id": null, "utc_offset_min": 0
                }}
            }}],
            "activate_version": 1
        }}"#
    )
    .unwrap();
    file
}

#[test]
fn test_estimates_fares_from_csv() {
    let catalog = catalog_with_active_version();
    let mut requests = NamedTempFile::new().unwrap();
    writeln!(requests, "{REQUEST_HEADER}").unwrap();
    writeln!(
        requests,
        "economy, 40.0, -3.5, 39.5, -3.2, 10.0, 20, 1.0, 2026-07-03T12:00:00Z,"
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("fare-engine"));
    cmd.arg(requests.path()).arg("--catalog").arg(catalog.path());

    // defaults: 3.00 + 15.00 + 5.00 + 1.00 booking = 24.00
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,24.00,1,24.00,0.00,24.00,4.80,19.20"));
}

#[test]
fn test_missing_active_version_reports_per_request_error() {
    let mut catalog = NamedTempFile::new().unwrap();
    write!(
        catalog,
        r#"{{
            "versions": [{{"id": 1, "name": "launch", "status": "draft"}}],
            "geofences": [{{
                "min_lat": 39.0, "max_lat": 41.0, "min_lng": -4.0, "max_lng": -3.0,
                "location": {{
                    "country_id": 1, "region_id": 10, "city_id": 100,
                    "zone_id": null, "utc_offset_min": 0
                }}
            }}]
        }}"#
    )
    .unwrap();
    let mut requests = NamedTempFile::new().unwrap();
    writeln!(requests, "{REQUEST_HEADER}").unwrap();
    writeln!(
        requests,
        "economy, 40.0, -3.5, 39.5, -3.2, 10.0, 20, 1.0, 2026-07-03T12:00:00Z,"
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("fare-engine"));
    cmd.arg(requests.path()).arg("--catalog").arg(catalog.path());

    // the stream keeps going; the failure surfaces on stderr
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("no active pricing version"));
}

#[test]
fn test_malformed_request_row_is_skipped() {
    let catalog = catalog_with_active_version();
    let mut requests = NamedTempFile::new().unwrap();
    writeln!(requests, "{REQUEST_HEADER}").unwrap();
    writeln!(requests, "rocket, 40.0, -3.5, x, y, 1, 1, 1, nope,").unwrap();
    writeln!(
        requests,
        "economy, 40.0, -3.5, 39.5, -3.2, 10.0, 20, 1.0, 2026-07-03T12:00:00Z,"
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("fare-engine"));
    cmd.arg(requests.path()).arg("--catalog").arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("24.00"))
        .stderr(predicate::str::contains("Error reading request"));
}
