//! Pathboard: Interactive Weighted-Graph Workbench
//!
//! A small engine for building an undirected, weighted graph
//! interactively and replaying the shortest path between two chosen
//! nodes as a timed animation.
//!
//! # Core Concepts
//!
//! - **GraphModel**: the mutable graph — nodes, edges, and mirrored
//!   adjacency that stays consistent under structural edits
//! - **RouteQuery**: Dijkstra over a model snapshot, producing the
//!   visitation trace and the winning path
//! - **Sequencer**: turns a run result into a paced, cancelable stream
//!   of visual events for a renderer
//! - **Pathboard**: the facade the UI layer talks to
//!
//! # Example
//!
//! ```
//! use pathboard::{GraphModel, Position, RouteQuery};
//!
//! let mut model = GraphModel::new();
//! let a = model.add_node(Position::new(0.0, 0.0));
//! let b = model.add_node(Position::new(10.0, 0.0));
//! let c = model.add_node(Position::new(5.0, 10.0));
//! model.add_edge(a, b, 1).unwrap();
//! model.add_edge(b, c, 1).unwrap();
//! model.add_edge(a, c, 5).unwrap();
//!
//! let result = RouteQuery::between(a, c).execute(&model).unwrap();
//! assert_eq!(result.path, vec![a, b, c]);
//! assert_eq!(result.cost, Some(2));
//! ```

mod api;
mod graph;
pub mod interact;
pub mod replay;
pub mod route;

pub use api::{BoardError, BoardResult, Pathboard, Selection};
pub use graph::{
    AdjacencyEntry, Edge, EdgeKey, GraphError, GraphModel, GraphResult, ModelMetadata, Node,
    NodeId, ParseEdgeKeyError, Position,
};
pub use replay::{
    CancellationToken, ChannelSink, ReplayHandle, ReplayId, ReplayRun, Sequencer, SinkError,
    VisualEvent, VisualSink, DEFAULT_STEP_DELAY,
};
pub use route::{MinQueue, PathResult, RouteQuery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
