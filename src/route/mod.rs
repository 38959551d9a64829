//! Shortest-path queries over the graph model

mod path;
mod queue;
mod types;

pub use path::RouteQuery;
pub use queue::MinQueue;
pub use types::PathResult;
