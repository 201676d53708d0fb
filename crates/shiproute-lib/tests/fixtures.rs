mod common;

use shiproute_lib::{
    estimate_route, DatasetPaths, FuelProfileCatalog, FuelProfileLookup, HaltProfileLookup,
    PortHaltCatalog, Providers, RouteRequest,
};

use common::fixtures_dir;

#[test]
fn fuel_profiles_use_the_first_row_per_ship_type() {
    let catalog = FuelProfileCatalog::from_path(&fixtures_dir().join("ship_fuel_efficiency.csv"))
        .expect("fixture loads");

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.consumption_rate("container ship"), Some(12.5));
    assert_eq!(catalog.consumption_rate(" TANKER SHIP "), Some(18.0));
    assert_eq!(catalog.consumption_rate("ferry"), None);
    assert!(catalog.source_path().is_some());
    assert_eq!(
        catalog
            .profiles_sorted()
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>(),
        vec![
            "Bulk Carrier",
            "Container Ship",
            "Fishing Trawler",
            "Tanker Ship"
        ]
    );
}

#[test]
fn port_data_uses_the_first_row_per_port() {
    let catalog =
        PortHaltCatalog::from_path(&fixtures_dir().join("Port_Data.csv")).expect("fixture loads");

    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.vessels_in_port("Singapore"), Some(310));
    assert_eq!(catalog.vessels_in_port(" Rotterdam "), Some(120));
    assert_eq!(catalog.vessels_in_port("Shanghai"), None);
}

#[test]
fn fixture_dataset_estimates_rotterdam_to_singapore() {
    let paths = DatasetPaths::in_dir(&fixtures_dir()).expect("fixture dataset");
    let graph = paths.load_graph().unwrap();
    let fuel = paths.load_fuel_profiles().unwrap();
    let halts = paths.load_port_data().unwrap();

    let estimate = estimate_route(
        &graph,
        &RouteRequest::new("Rotterdam", "Singapore", "Container Ship"),
        &fuel,
        &halts,
        &Providers::offline(),
    )
    .expect("route exists");

    let best = estimate.best();
    assert_eq!(
        best.route,
        vec!["Rotterdam", "Algeciras", "Port Said", "Colombo", "Singapore"]
    );
    assert_eq!(best.distance, 15_300.0);
    assert_eq!(best.duration, 765.0);
    // 12.5 × 15 300 km × 1.5 (default price)
    assert_eq!(best.fuel_cost, 286_875.0);
    // (120 + 41 + 37 + 29 + 310) vessels × 10
    assert_eq!(best.halt_cost, 5_370.0);
    assert_eq!(best.total_cost, 292_245.0);
}
