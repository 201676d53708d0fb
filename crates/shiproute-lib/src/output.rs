use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::providers::{Coordinates, WeatherReport};
use crate::ranking::RouteOption;
use crate::routing::RouteEstimate;

/// Render an estimate as plain text: every option followed by the best one.
pub fn render_estimate(estimate: &RouteEstimate) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route estimate: {} -> {} (ship type: {})",
        estimate.start, estimate.goal, estimate.ship_type
    );
    let _ = writeln!(
        buffer,
        "Fuel price: {:.2} per liter ({})",
        estimate.fuel_price, estimate.fuel_price_source
    );

    for (index, option) in estimate.ranking.options().iter().enumerate() {
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Option {}: {}", index + 1, option.route.join(" -> "));
        render_option(&mut buffer, option);
    }

    let best = estimate.best();
    let _ = writeln!(buffer);
    let _ = writeln!(
        buffer,
        "Best route: {} (total cost {:.2})",
        best.route.join(" -> "),
        best.total_cost
    );
    buffer
}

fn render_option(buffer: &mut String, option: &RouteOption) {
    let _ = writeln!(buffer, "  Distance:   {:.2} km", option.distance);
    let _ = writeln!(buffer, "  Duration:   {:.2} h", option.duration);
    let _ = writeln!(buffer, "  Fuel cost:  {:.2}", option.fuel_cost);
    let _ = writeln!(buffer, "  Halt cost:  {:.2}", option.halt_cost);
    let _ = writeln!(buffer, "  Total cost: {:.2}", option.total_cost);

    if option.issues.is_empty() {
        let _ = writeln!(buffer, "  Issues:     none");
    } else {
        let _ = writeln!(buffer, "  Issues:");
        for (issue, precaution) in option.issues.iter().zip(&option.precautions) {
            let _ = writeln!(buffer, "    - {issue} ({precaution})");
        }
    }

    let _ = writeln!(buffer, "  Weather:");
    for port in &option.weather {
        let _ = writeln!(buffer, "    {}: {}", port.port, describe_weather(&port.report));
    }
}

fn describe_weather(report: &WeatherReport) -> String {
    match report {
        WeatherReport::Available { temperature, .. } => {
            let wind = report
                .max_wind_speed()
                .map(|max| format!("max wind {max:.1} km/h"))
                .unwrap_or_else(|| "no wind data".to_string());
            let temp = temperature
                .first()
                .map(|t| format!("{t:.1} °C"))
                .unwrap_or_else(|| "no temperature data".to_string());
            format!("{temp}, {wind}")
        }
        WeatherReport::Unavailable => "unavailable".to_string(),
    }
}

/// GeoJSON `FeatureCollection` for a route: one `Point` per located port and
/// a `LineString` through them in route order.
///
/// Ports without coordinates are left out; the line is omitted when fewer
/// than two ports are located.
pub fn route_geojson(option: &RouteOption, coordinates: &BTreeMap<String, Coordinates>) -> Value {
    let located: Vec<(&str, Coordinates)> = option
        .route
        .iter()
        .filter_map(|port| coordinates.get(port).map(|at| (port.as_str(), *at)))
        .collect();

    let mut features: Vec<Value> = located
        .iter()
        .map(|(port, at)| {
            json!({
                "type": "Feature",
                "properties": { "name": port },
                "geometry": {
                    "type": "Point",
                    "coordinates": [at.longitude, at.latitude],
                },
            })
        })
        .collect();

    if located.len() >= 2 {
        let line: Vec<[f64; 2]> = located
            .iter()
            .map(|(_, at)| [at.longitude, at.latitude])
            .collect();
        features.push(json!({
            "type": "Feature",
            "properties": {
                "route": option.route.join(" -> "),
                "total_cost": option.total_cost,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": line,
            },
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write the best route of `estimate` as GeoJSON to `path`.
///
/// Returns the number of ports placed on the map.
pub fn write_route_map(estimate: &RouteEstimate, path: &Path) -> Result<usize> {
    let best = estimate.best();
    let located = best
        .route
        .iter()
        .filter(|port| estimate.coordinates.contains_key(port.as_str()))
        .count();

    let document = route_geojson(best, &estimate.coordinates);
    fs::write(path, serde_json::to_string_pretty(&document)?)?;
    info!(path = %path.display(), located, "wrote route map");
    Ok(located)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> RouteOption {
        RouteOption {
            route: vec!["A".into(), "B".into(), "C".into()],
            distance: 800.0,
            duration: 40.0,
            fuel_cost: 16_000.0,
            halt_cost: 0.0,
            total_cost: 16_000.0,
            issues: vec!["High winds near B".into()],
            precautions: vec!["Reduce speed".into()],
            weather: Vec::new(),
        }
    }

    #[test]
    fn geojson_skips_unlocated_ports() {
        let mut coordinates = BTreeMap::new();
        coordinates.insert(
            "A".to_string(),
            Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            },
        );
        coordinates.insert(
            "C".to_string(),
            Coordinates {
                latitude: 3.0,
                longitude: 4.0,
            },
        );

        let document = route_geojson(&option(), &coordinates);
        let features = document["features"].as_array().expect("features");
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["properties"]["name"], "A");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([2.0, 1.0]));
        assert_eq!(features[2]["geometry"]["type"], "LineString");
        assert_eq!(
            features[2]["geometry"]["coordinates"],
            json!([[2.0, 1.0], [4.0, 3.0]])
        );
    }

    #[test]
    fn geojson_without_coordinates_is_empty() {
        let document = route_geojson(&option(), &BTreeMap::new());
        assert_eq!(document["type"], "FeatureCollection");
        assert_eq!(document["features"], json!([]));
    }

    #[test]
    fn weather_description() {
        let report = WeatherReport::Available {
            temperature: vec![12.3, 13.0],
            wind_speed: vec![10.0, 31.0],
        };
        assert_eq!(describe_weather(&report), "12.3 °C, max wind 31.0 km/h");
        assert_eq!(describe_weather(&WeatherReport::Unavailable), "unavailable");
    }
}
