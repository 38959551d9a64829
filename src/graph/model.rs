//! GraphModel: the mutable graph a user edits interactively

use super::edge::{Edge, EdgeKey};
use super::node::{AdjacencyEntry, Node, NodeId, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur in graph operations
///
/// Every failing operation leaves the model untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeKey),

    #[error("edge weight must be a positive integer, got {0}")]
    InvalidWeight(i64),

    #[error("self-loops are not allowed (node {0})")]
    SelfLoop(NodeId),

    #[error("edge {0} already exists")]
    DuplicateEdge(EdgeKey),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Metadata about a model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// When the model was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the model was last structurally modified
    pub updated_at: Option<DateTime<Utc>>,
}

/// The mutable graph: nodes, edges, and mirrored adjacency
///
/// Structural invariants, maintained across every public operation:
/// every adjacency entry is mirrored on the other endpoint with the
/// same weight and key; no two edges share a canonical key; weights are
/// strictly positive; a removed node's id survives in no edge or
/// adjacency entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphModel {
    /// Nodes by id
    nodes: HashMap<NodeId, Node>,
    /// Edges by canonical key
    edges: HashMap<EdgeKey, Edge>,
    /// Last id handed out; ids are never reused within a session
    next_id: u64,
    /// Model metadata
    pub metadata: ModelMetadata,
}

impl GraphModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            next_id: 0,
            metadata: ModelMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
        }
    }

    /// Add a node at the given position, allocating the next unused id
    pub fn add_node(&mut self, position: Position) -> NodeId {
        self.next_id += 1;
        let id = NodeId::from(self.next_id);
        self.nodes.insert(id, Node::new(id, position));
        self.touch();
        debug!(node = %id, "node added");
        id
    }

    /// Remove a node and every edge incident to it
    ///
    /// Returns the keys of the cascaded edge removals so the caller can
    /// erase their visuals.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Vec<EdgeKey>> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }

        let cascaded: Vec<EdgeKey> = self.nodes[&id]
            .adjacency
            .iter()
            .map(|entry| entry.key)
            .collect();
        for key in &cascaded {
            self.detach_edge(*key);
        }
        self.nodes.remove(&id);
        self.touch();
        debug!(node = %id, cascaded = cascaded.len(), "node removed");
        Ok(cascaded)
    }

    /// Add an edge between two distinct existing nodes
    ///
    /// The weight must be a strictly positive integer; the canonical key
    /// must not already exist.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: i64) -> GraphResult<EdgeKey> {
        if weight <= 0 {
            return Err(GraphError::InvalidWeight(weight));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        if !self.nodes.contains_key(&a) {
            return Err(GraphError::NodeNotFound(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(GraphError::NodeNotFound(b));
        }
        let key = EdgeKey::new(a, b);
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }

        let weight = weight as u64;
        self.edges.insert(key, Edge::new(key, weight));
        self.append_adjacency(a, b, weight, key);
        self.append_adjacency(b, a, weight, key);
        self.touch();
        debug!(edge = %key, weight, "edge added");
        Ok(key)
    }

    /// Remove an edge and both of its adjacency entries
    pub fn remove_edge(&mut self, key: EdgeKey) -> GraphResult<()> {
        if !self.edges.contains_key(&key) {
            return Err(GraphError::EdgeNotFound(key));
        }
        self.detach_edge(key);
        self.touch();
        debug!(edge = %key, "edge removed");
        Ok(())
    }

    /// Move a node to a new position
    ///
    /// Positions are presentational only; weights and adjacency are
    /// unaffected.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> GraphResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        node.position = position;
        Ok(())
    }

    /// Incident edges of a node, in insertion order
    pub fn neighbors(&self, id: NodeId) -> GraphResult<&[AdjacencyEntry]> {
        self.nodes
            .get(&id)
            .map(|node| node.adjacency.as_slice())
            .ok_or(GraphError::NodeNotFound(id))
    }

    /// Get a node by id
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get an edge by canonical key
    pub fn get_edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(&key)
    }

    /// Whether a node with this id exists
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Clear everything and start a fresh session
    ///
    /// The id counter restarts, so ids are reused only across sessions.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.next_id = 0;
        self.touch();
        debug!("model cleared");
    }

    /// Remove an edge from the edge map and strip both adjacency mirrors
    fn detach_edge(&mut self, key: EdgeKey) {
        self.edges.remove(&key);
        let (a, b) = key.endpoints();
        for endpoint in [a, b] {
            if let Some(node) = self.nodes.get_mut(&endpoint) {
                node.adjacency.retain(|entry| entry.key != key);
            }
        }
    }

    fn append_adjacency(&mut self, on: NodeId, neighbor: NodeId, weight: u64, key: EdgeKey) {
        if let Some(node) = self.nodes.get_mut(&on) {
            node.adjacency.push(AdjacencyEntry {
                neighbor,
                weight,
                key,
            });
        }
    }

    /// Update the last modified timestamp
    fn touch(&mut self) {
        self.metadata.updated_at = Some(Utc::now());
    }
}

impl Default for GraphModel {
    fn default() -> Self {
        Self::new()
    }
}
