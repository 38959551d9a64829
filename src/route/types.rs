//! Route result structures

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// Result of a shortest-path run
///
/// A transient value: it captures one run over one model state and has
/// no lifecycle beyond that run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Node ids in the order the algorithm finalized them.
    /// Contains each id at most once.
    pub visited: Vec<NodeId>,
    /// Node ids from source to target inclusive; empty when no path exists
    pub path: Vec<NodeId>,
    /// Total weight along `path`; `None` when no path exists
    pub cost: Option<u64>,
}

impl PathResult {
    /// A run that reached the target
    pub fn found(visited: Vec<NodeId>, path: Vec<NodeId>, cost: u64) -> Self {
        Self {
            visited,
            path,
            cost: Some(cost),
        }
    }

    /// A run that exhausted the frontier without reaching the target
    pub fn not_found(visited: Vec<NodeId>) -> Self {
        Self {
            visited,
            path: Vec::new(),
            cost: None,
        }
    }

    /// Whether a path was found
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}
