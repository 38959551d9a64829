//! Visual events emitted during a replay
//!
//! Three semantic event types; the renderer owns colors and styling
//! and only reacts to these.

use crate::graph::{EdgeKey, NodeId};
use crate::route::PathResult;
use serde::{Deserialize, Serialize};

/// A semantic instruction for the renderer during a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VisualEvent {
    /// A node was finalized by the search (endpoints excluded)
    MarkVisited { node: NodeId },
    /// An edge on the winning path, in path order
    HighlightEdge { edge: EdgeKey },
    /// Terminal event; `found` is true iff the path is non-empty
    Completed { found: bool },
}

/// Expand a run result into the full, ordered event script.
///
/// Visitation marks come first (skipping the source and target), then
/// one edge highlight per consecutive path pair, then the terminal
/// `Completed`.
pub fn script(result: &PathResult, source: NodeId, target: NodeId) -> Vec<VisualEvent> {
    let mut events = Vec::new();

    for &node in &result.visited {
        if node != source && node != target {
            events.push(VisualEvent::MarkVisited { node });
        }
    }
    for pair in result.path.windows(2) {
        events.push(VisualEvent::HighlightEdge {
            edge: EdgeKey::new(pair[0], pair[1]),
        });
    }
    events.push(VisualEvent::Completed {
        found: result.is_found(),
    });
    events
}
