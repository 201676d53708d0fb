use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::graph::{PortId, RouteGraph};

/// Relative tolerance under which two path costs count as equal.
const COST_TOLERANCE: f64 = 1e-9;

/// Find the minimum-distance path from `start` to `goal` using Dijkstra's
/// algorithm.
///
/// Returns the ordered ports including both endpoints, `Some(vec![start])`
/// when `start == goal`, or `None` when `goal` is unreachable. Both ports must
/// already be members of `graph`.
///
/// When several paths share the minimum distance, each port keeps the optimal
/// predecessor whose name sorts first, so the result does not depend on the
/// order in which routes were loaded.
pub fn find_path(graph: &RouteGraph, start: PortId, goal: PortId) -> Option<Vec<PortId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances: HashMap<PortId, f64> = HashMap::new();
    let mut parents: HashMap<PortId, Option<PortId>> = HashMap::new();
    let mut settled: HashSet<PortId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }

        if entry.node == goal {
            let path = reconstruct_path(&parents, start, goal);
            debug!(
                hops = path.len().saturating_sub(1),
                distance = entry.cost.0,
                "found shortest path"
            );
            return Some(path);
        }

        let current_distance = entry.cost.0;
        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let next_cost = current_distance + edge.distance;
            match distances.get(&next).copied() {
                Some(known) if costs_equal(next_cost, known) => {
                    let current_parent = parents.get(&next).copied().flatten();
                    if sorts_before(graph, entry.node, current_parent) {
                        parents.insert(next, Some(entry.node));
                    }
                }
                Some(known) if next_cost > known => {}
                _ => {
                    distances.insert(next, next_cost);
                    parents.insert(next, Some(entry.node));
                    queue.push(QueueEntry::new(next, next_cost));
                }
            }
        }
    }

    None
}

/// Candidate paths considered for ranking.
///
/// Only the single shortest path is produced; the ranker accepts any number of
/// candidates.
pub fn find_candidate_paths(graph: &RouteGraph, start: PortId, goal: PortId) -> Vec<Vec<PortId>> {
    find_path(graph, start, goal).into_iter().collect()
}

fn costs_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= COST_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn sorts_before(graph: &RouteGraph, candidate: PortId, current: Option<PortId>) -> bool {
    let Some(current) = current else {
        return true;
    };
    match (graph.port_name(candidate), graph.port_name(current)) {
        (Some(a), Some(b)) => a < b,
        _ => candidate < current,
    }
}

fn reconstruct_path(
    parents: &HashMap<PortId, Option<PortId>>,
    start: PortId,
    goal: PortId,
) -> Vec<PortId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: PortId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: PortId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
