//! Shared fixtures for integration tests

// Not every suite uses every helper.
#![allow(dead_code)]

use pathboard::{GraphModel, NodeId, Position};
use std::collections::HashSet;

/// Build a model holding nodes `1..=max referenced id` and the given
/// edges. Ids are allocated monotonically from 1, so the literal ids in
/// the edge list line up with the model's.
pub fn build_model(edges: &[(u64, u64, i64)]) -> GraphModel {
    let max_id = edges
        .iter()
        .flat_map(|&(a, b, _)| [a, b])
        .max()
        .unwrap_or(0);
    let mut model = GraphModel::new();
    for i in 0..max_id {
        model.add_node(Position::new(i as f64 * 10.0, 0.0));
    }
    for &(a, b, weight) in edges {
        model
            .add_edge(NodeId::from(a), NodeId::from(b), weight)
            .unwrap();
    }
    model
}

/// Check the model's structural invariants:
/// mirrored adjacency, canonical-key uniqueness, positive weights, and
/// no references to absent nodes.
pub fn assert_invariants(model: &GraphModel) {
    let mut seen_keys = HashSet::new();
    let mut degree_sum = 0usize;

    for node in model.nodes() {
        for entry in &node.adjacency {
            degree_sum += 1;
            assert!(entry.weight > 0, "weight must be strictly positive");
            assert_eq!(
                entry.key,
                pathboard::EdgeKey::new(node.id, entry.neighbor),
                "adjacency key must be canonical for its endpoints"
            );

            // The referenced edge exists and agrees on the weight.
            let edge = model
                .get_edge(entry.key)
                .unwrap_or_else(|| panic!("adjacency references missing edge {}", entry.key));
            assert_eq!(edge.weight, entry.weight);

            // The mirror entry exists on the other endpoint.
            let mirror = model
                .get_node(entry.neighbor)
                .unwrap_or_else(|| panic!("adjacency references missing node {}", entry.neighbor));
            let mirrored = mirror
                .adjacency
                .iter()
                .filter(|m| m.key == entry.key && m.neighbor == node.id && m.weight == entry.weight)
                .count();
            assert_eq!(mirrored, 1, "exactly one mirror entry per edge");
        }
    }

    for edge in model.edges() {
        assert!(seen_keys.insert(edge.key), "duplicate canonical key");
        let (a, b) = edge.key.endpoints();
        assert_ne!(a, b, "self-loops are forbidden");
        assert!(model.contains_node(a), "edge endpoint {} missing", a);
        assert!(model.contains_node(b), "edge endpoint {} missing", b);
    }

    assert_eq!(
        degree_sum,
        model.edge_count() * 2,
        "every edge contributes exactly two adjacency entries"
    );
}

/// Minimum path weight by exhaustive search over simple paths.
/// Only usable on small graphs.
pub fn brute_force_cost(model: &GraphModel, source: NodeId, target: NodeId) -> Option<u64> {
    fn walk(
        model: &GraphModel,
        current: NodeId,
        target: NodeId,
        spent: u64,
        on_path: &mut HashSet<NodeId>,
        best: &mut Option<u64>,
    ) {
        if current == target {
            *best = Some(best.map_or(spent, |b: u64| b.min(spent)));
            return;
        }
        for entry in model.neighbors(current).unwrap() {
            if on_path.insert(entry.neighbor) {
                walk(model, entry.neighbor, target, spent + entry.weight, on_path, best);
                on_path.remove(&entry.neighbor);
            }
        }
    }

    if !model.contains_node(source) || !model.contains_node(target) {
        return None;
    }
    let mut best = None;
    let mut on_path = HashSet::from([source]);
    walk(model, source, target, 0, &mut on_path, &mut best);
    best
}
