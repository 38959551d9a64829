//! Undirected edge representation and canonical keys

use super::node::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical key identifying an undirected edge
///
/// The key orders its endpoints `(min, max)`, so the same pair of nodes
/// always yields the same key regardless of argument order. At most one
/// edge may exist per key.
///
/// Serializes as the string `"a-b"`, e.g. `"1-2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    a: NodeId,
    b: NodeId,
}

impl EdgeKey {
    /// Build the canonical key for a pair of nodes
    pub fn new(x: NodeId, y: NodeId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// The endpoints in canonical (min, max) order
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    /// Whether the given node is one of the endpoints
    pub fn touches(&self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Error parsing an [`EdgeKey`] from its `"a-b"` form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edge key must look like \"1-2\"")]
pub struct ParseEdgeKeyError;

impl std::str::FromStr for EdgeKey {
    type Err = ParseEdgeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s.split_once('-').ok_or(ParseEdgeKeyError)?;
        let a: NodeId = left.trim().parse().map_err(|_| ParseEdgeKeyError)?;
        let b: NodeId = right.trim().parse().map_err(|_| ParseEdgeKeyError)?;
        Ok(Self::new(a, b))
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A weighted undirected edge between two distinct nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Canonical key
    pub key: EdgeKey,
    /// Strictly positive weight
    pub weight: u64,
}

impl Edge {
    /// Create a new edge
    pub fn new(key: EdgeKey, weight: u64) -> Self {
        Self { key, weight }
    }
}
