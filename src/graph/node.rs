//! Node representation in the workbench graph

use super::edge::EdgeKey;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
///
/// Ids are positive integers handed out monotonically by the model;
/// an id is never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Get the inner integer value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// A 2D canvas position
///
/// Purely presentational: the routing algorithm never reads positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One incident edge as seen from a node
///
/// Every edge is mirrored into both endpoints' adjacency with the same
/// weight and key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    /// The node on the other end of the edge
    pub neighbor: NodeId,
    /// Edge weight
    pub weight: u64,
    /// Canonical key of the edge
    pub key: EdgeKey,
}

/// A node in the workbench graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Canvas position
    pub position: Position,
    /// Incident edges, in insertion order
    pub adjacency: Vec<AdjacencyEntry>,
}

impl Node {
    /// Create a new node with empty adjacency
    pub fn new(id: NodeId, position: Position) -> Self {
        Self {
            id,
            position,
            adjacency: Vec::new(),
        }
    }

    /// Number of incident edges
    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }
}
