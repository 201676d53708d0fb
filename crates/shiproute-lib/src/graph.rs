use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::routes::RouteRecord;

/// Dense identifier assigned to each port on first reference.
pub type PortId = usize;

/// Minimum similarity (Jaro-Winkler, case-insensitive) for a port name to be
/// offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Directed edge within the route graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: PortId,
    pub distance: f64,
}

/// Directed, distance-weighted graph of ports.
///
/// Built once from route records and read-only afterwards. Ports are interned
/// into [`PortId`]s in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    names: Vec<String>,
    index: HashMap<String, PortId>,
    adjacency: Vec<Vec<Edge>>,
}

impl RouteGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed edge, creating both ports if needed.
    ///
    /// A second edge for the same `(source, destination)` pair replaces the
    /// first one.
    pub fn insert_edge(&mut self, source: &str, destination: &str, distance_km: f64) -> Result<()> {
        let source = normalize_port_name(source);
        let destination = normalize_port_name(destination);

        if source.is_empty() || destination.is_empty() {
            return Err(Error::InvalidRouteData {
                message: "port names must not be empty".to_string(),
            });
        }
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Err(Error::InvalidRouteData {
                message: format!(
                    "distance from {} to {} must be finite and positive, got {}",
                    source, destination, distance_km
                ),
            });
        }

        let from = self.intern(source);
        let to = self.intern(destination);
        let edges = &mut self.adjacency[from];
        if let Some(existing) = edges.iter_mut().find(|edge| edge.target == to) {
            debug!(
                from = %self.names[from],
                to = %self.names[to],
                previous = existing.distance,
                replacement = distance_km,
                "overwriting duplicate route edge"
            );
            existing.distance = distance_km;
        } else {
            edges.push(Edge {
                target: to,
                distance: distance_km,
            });
        }
        Ok(())
    }

    fn intern(&mut self, name: &str) -> PortId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Whether the (trimmed) port name is a node of the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.port_id(name).is_some()
    }

    /// Lookup a port identifier by its trimmed, case-sensitive name.
    pub fn port_id(&self, name: &str) -> Option<PortId> {
        self.index.get(normalize_port_name(name)).copied()
    }

    /// Lookup a port name by identifier.
    pub fn port_name(&self, id: PortId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Outgoing edges of a port.
    pub fn neighbours(&self, port: PortId) -> &[Edge] {
        self.adjacency.get(port).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distance of the direct edge `from -> to`, if one exists.
    pub fn edge_distance(&self, from: PortId, to: PortId) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.distance)
    }

    /// Sum of edge distances along `path`, or `None` when a hop has no edge.
    pub fn path_distance(&self, path: &[PortId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_distance(pair[0], pair[1]))
            .sum()
    }

    /// Resolve a path of identifiers into port names.
    pub fn path_names(&self, path: &[PortId]) -> Vec<String> {
        path.iter()
            .filter_map(|&id| self.port_name(id))
            .map(str::to_string)
            .collect()
    }

    /// All port names, sorted alphabetically.
    pub fn port_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn port_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Up to `limit` port names that look similar to `name`, best match first.
    pub fn fuzzy_port_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_port_name(name).to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .names
            .iter()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Build the route graph from loaded route records.
pub fn build_graph(records: &[RouteRecord]) -> Result<RouteGraph> {
    let mut graph = RouteGraph::new();
    for record in records {
        graph.insert_edge(&record.source, &record.destination, record.distance_km)?;
    }
    debug!(
        ports = graph.port_count(),
        edges = graph.edge_count(),
        "built route graph"
    );
    Ok(graph)
}

/// Port identity is the trimmed name.
pub fn normalize_port_name(name: &str) -> &str {
    name.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, destination: &str, distance_km: f64) -> RouteRecord {
        RouteRecord {
            source: source.to_string(),
            destination: destination.to_string(),
            distance_km,
        }
    }

    #[test]
    fn builds_directed_edges_with_trimmed_names() {
        let graph = build_graph(&[record(" A ", "B", 500.0), record("B", " C", 300.0)])
            .expect("valid records");

        assert_eq!(graph.port_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains("A"));
        assert!(graph.contains("  C  "));

        let a = graph.port_id("A").unwrap();
        let b = graph.port_id("B").unwrap();
        assert_eq!(graph.edge_distance(a, b), Some(500.0));
        assert_eq!(graph.edge_distance(b, a), None, "edges are directed");
    }

    #[test]
    fn duplicate_edge_last_write_wins() {
        let graph = build_graph(&[record("A", "B", 500.0), record("A", "B", 420.0)])
            .expect("valid records");
        let a = graph.port_id("A").unwrap();
        let b = graph.port_id("B").unwrap();

        assert_eq!(graph.neighbours(a).len(), 1);
        assert_eq!(graph.edge_distance(a, b), Some(420.0));
    }

    #[test]
    fn rejects_non_positive_distances() {
        for distance in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = build_graph(&[record("A", "B", distance)]).expect_err("invalid distance");
            assert!(matches!(err, Error::InvalidRouteData { .. }));
        }
    }

    #[test]
    fn rejects_blank_port_names() {
        let err = build_graph(&[record("  ", "B", 10.0)]).expect_err("blank source");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn path_distance_requires_every_hop() {
        let graph = build_graph(&[record("A", "B", 500.0), record("B", "C", 300.0)]).unwrap();
        let a = graph.port_id("A").unwrap();
        let b = graph.port_id("B").unwrap();
        let c = graph.port_id("C").unwrap();

        assert_eq!(graph.path_distance(&[a, b, c]), Some(800.0));
        assert_eq!(graph.path_distance(&[a]), Some(0.0));
        assert_eq!(graph.path_distance(&[a, c]), None);
        assert_eq!(graph.path_names(&[a, b, c]), vec!["A", "B", "C"]);
    }

    #[test]
    fn fuzzy_matches_suggest_close_names() {
        let graph = build_graph(&[
            record("Singapore", "Rotterdam", 15_000.0),
            record("Rotterdam", "Hamburg", 500.0),
        ])
        .unwrap();

        let matches = graph.fuzzy_port_matches("singapor", 3);
        assert_eq!(matches.first().map(String::as_str), Some("Singapore"));
        assert!(graph.fuzzy_port_matches("Xyzzy", 3).is_empty());
    }
}
