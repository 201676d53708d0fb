use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixture dataset present")
}

fn cli() -> Command {
    cargo_bin_cmd!("shiproute-cli")
}

fn command_for(data_dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("SHIPROUTE_ROUTES")
        .env_remove("SHIPROUTE_FUEL_PROFILES")
        .env_remove("SHIPROUTE_PORT_DATA")
        .env_remove("SHIPROUTE_OILPRICE_TOKEN")
        .arg("--no-logo")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

/// Dataset with routes A->B (500), B->C (300) and A->C (1000).
fn abc_dataset() -> TempDir {
    let dir = tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("routes.csv"),
        "Source,Destination,Distance_km\nA,B,500\nB,C,300\nA,C,1000\n",
    )
    .expect("write routes");
    fs::write(
        dir.path().join("ship_fuel_efficiency.csv"),
        "ship_type,fuel_consumption\ncargo,10\n",
    )
    .expect("write fuel profiles");
    dir
}

fn route_args<'a>(cmd: &'a mut Command, from: &str, to: &str, ship_type: &str) -> &'a mut Command {
    cmd.arg("route")
        .arg("--from")
        .arg(from)
        .arg("--to")
        .arg(to)
        .arg("--ship-type")
        .arg(ship_type)
        .arg("--offline")
}

#[test]
fn text_output_shows_costs_and_best_route() {
    let data = abc_dataset();
    let mut cmd = command_for(data.path());
    route_args(&mut cmd, "A", "C", "cargo");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route estimate: A -> C (ship type: cargo)"))
        .stdout(predicate::str::contains("Fuel price: 1.50 per liter (default)"))
        .stdout(predicate::str::contains("Option 1: A -> B -> C"))
        .stdout(predicate::str::contains("Distance:   800.00 km"))
        .stdout(predicate::str::contains("Duration:   40.00 h"))
        .stdout(predicate::str::contains("Fuel cost:  12000.00"))
        .stdout(predicate::str::contains("Halt cost:  0.00"))
        .stdout(predicate::str::contains("Best route: A -> B -> C (total cost 12000.00)"))
        .stdout(predicate::str::contains("No issues on the best route."));
}

#[test]
fn json_output_is_machine_readable() {
    let data = abc_dataset();
    let mut cmd = command_for(data.path());
    cmd.arg("--format").arg("json");
    route_args(&mut cmd, "A", "C", "cargo");

    let output = cmd.output().expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");

    assert_eq!(value["fuel_price"], 1.5);
    assert_eq!(value["fuel_price_source"], "default");
    assert_eq!(value["ranking"]["best_index"], 0);
    let best = &value["ranking"]["options"][0];
    assert_eq!(best["route"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(best["distance"], 800.0);
    assert_eq!(best["fuel_cost"], 12000.0);
    assert_eq!(best["total_cost"], 12000.0);
    assert_eq!(best["weather"][0]["report"]["status"], "unavailable");
}

#[test]
fn unknown_ship_type_falls_back_to_default_rate() {
    let data = abc_dataset();
    let mut cmd = command_for(data.path());
    route_args(&mut cmd, "A", "C", "ferry");

    cmd.assert()
        .success()
        // 150 × 800 km × 1.5
        .stdout(predicate::str::contains("Fuel cost:  180000.00"));
}

#[test]
fn unknown_port_suggests_alternatives() {
    let fixtures = fixtures_dir();
    let mut cmd = command_for(&fixtures);
    route_args(&mut cmd, "Roterdam", "Singapore", "Container Ship");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown port 'Roterdam'."))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("'Rotterdam'"));
}

#[test]
fn unreachable_port_reports_no_route() {
    let fixtures = fixtures_dir();
    let mut cmd = command_for(&fixtures);
    route_args(&mut cmd, "Rotterdam", "Nuuk", "Container Ship");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "No route found between Rotterdam and Nuuk.",
        ));
}

#[test]
fn fixture_dataset_includes_halt_costs() {
    let fixtures = fixtures_dir();
    let mut cmd = command_for(&fixtures);
    route_args(&mut cmd, "Rotterdam", "Singapore", "container ship");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Option 1: Rotterdam -> Algeciras -> Port Said -> Colombo -> Singapore",
        ))
        .stdout(predicate::str::contains("Halt cost:  5370.00"))
        .stdout(predicate::str::contains("Total cost: 292245.00"));
}

#[test]
fn map_export_writes_geojson() {
    let data = abc_dataset();
    let map = data.path().join("route.geojson");
    let mut cmd = command_for(data.path());
    route_args(&mut cmd, "A", "C", "cargo").arg("--map").arg(&map);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Route map written to"));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&map).expect("map written")).expect("GeoJSON");
    assert_eq!(document["type"], "FeatureCollection");
    // Offline mode geocodes nothing.
    assert_eq!(document["features"], serde_json::json!([]));
}

#[test]
fn missing_dataset_is_reported() {
    let empty = tempdir().expect("create temp dir");
    let mut cmd = command_for(empty.path());
    route_args(&mut cmd, "A", "C", "cargo");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to locate the route dataset"));
}

#[test]
fn offline_can_be_enabled_from_the_environment() {
    let data = abc_dataset();
    let mut cmd = command_for(data.path());
    cmd.env("SHIPROUTE_OFFLINE", "1")
        .arg("route")
        .arg("--from")
        .arg("A")
        .arg("--to")
        .arg("B")
        .arg("--ship-type")
        .arg("cargo");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Best route: A -> B (total cost 7500.00)"));
}
