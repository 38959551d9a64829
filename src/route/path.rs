//! Shortest-path search over a graph model

use super::queue::MinQueue;
use super::types::PathResult;
use crate::graph::{GraphError, GraphModel, GraphResult, NodeId};
use std::collections::HashMap;
use tracing::debug;

/// Query for the minimum-weight path between two nodes
///
/// Dijkstra with a lazy-deletion frontier: relaxing a node enqueues a
/// fresh entry instead of decreasing a key, and stale entries are
/// skipped when popped. Ties on the frontier resolve in enqueue order,
/// so the visitation order is deterministic for a fixed model.
#[derive(Debug, Clone)]
pub struct RouteQuery {
    /// Source node id
    pub source: NodeId,
    /// Target node id
    pub target: NodeId,
}

impl RouteQuery {
    /// Create a new route query between two nodes
    pub fn between(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Execute the query against a model
    ///
    /// Fails with `NodeNotFound` when either endpoint is absent. An
    /// unreachable target is not an error: the result carries an empty
    /// path.
    pub fn execute(&self, model: &GraphModel) -> GraphResult<PathResult> {
        if !model.contains_node(self.source) {
            return Err(GraphError::NodeNotFound(self.source));
        }
        if !model.contains_node(self.target) {
            return Err(GraphError::NodeNotFound(self.target));
        }
        if self.source == self.target {
            return Ok(PathResult::found(vec![self.source], vec![self.source], 0));
        }

        // Missing entry = infinite distance.
        let mut best: HashMap<NodeId, u64> = HashMap::new();
        let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
        let mut frontier: MinQueue<NodeId> = MinQueue::new();
        let mut visited: Vec<NodeId> = Vec::new();

        best.insert(self.source, 0);
        frontier.enqueue(self.source, 0);

        while let Some((current, distance)) = frontier.dequeue() {
            // A node can sit on the frontier several times; only the
            // entry matching its best distance finalizes it.
            if best.get(&current).is_some_and(|b| distance > *b) {
                continue;
            }
            visited.push(current);
            if current == self.target {
                break;
            }

            for entry in model.neighbors(current)? {
                let candidate = distance + entry.weight;
                let improves = best
                    .get(&entry.neighbor)
                    .map_or(true, |&known| candidate < known);
                if improves {
                    best.insert(entry.neighbor, candidate);
                    predecessor.insert(entry.neighbor, current);
                    frontier.enqueue(entry.neighbor, candidate);
                }
            }
        }

        let result = self.reconstruct(&best, &predecessor, visited);
        debug!(
            source = %self.source,
            target = %self.target,
            visited = result.visited.len(),
            found = result.is_found(),
            "route computed"
        );
        Ok(result)
    }

    /// Walk predecessors backward from the target; empty path on failure
    fn reconstruct(
        &self,
        best: &HashMap<NodeId, u64>,
        predecessor: &HashMap<NodeId, NodeId>,
        visited: Vec<NodeId>,
    ) -> PathResult {
        let Some(&cost) = best.get(&self.target) else {
            return PathResult::not_found(visited);
        };

        let mut path = vec![self.target];
        let mut current = self.target;
        while current != self.source {
            match predecessor.get(&current) {
                Some(&previous) => {
                    path.push(previous);
                    current = previous;
                }
                None => return PathResult::not_found(visited),
            }
        }
        path.reverse();
        PathResult::found(visited, path, cost)
    }
}
