//! Consumer-facing facade over the model, router, and sequencer.
//!
//! `Pathboard` is the single entry point for the UI layer. It owns the
//! selection state (the model does not), clears it when a selected node
//! is removed, and holds a read lock on the model for the whole of a
//! `route` call so a run always sees one consistent snapshot.

use crate::graph::{EdgeKey, GraphError, GraphModel, Node, NodeId, Position};
use crate::replay::{ReplayHandle, ReplayRun, Sequencer, VisualSink, DEFAULT_STEP_DELAY};
use crate::route::{PathResult, RouteQuery};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// The current start/end designation, at most one of each
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

/// Errors surfaced by the facade
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("select both a start and an end node before running")]
    SelectionIncomplete,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for facade operations
pub type BoardResult<T> = Result<T, BoardError>;

/// The interactive workbench: one graph, one selection, one replay at a time
pub struct Pathboard {
    model: RwLock<GraphModel>,
    selection: Mutex<Selection>,
    sequencer: Sequencer,
}

impl Pathboard {
    /// Create an empty board with the default step delay
    pub fn new() -> Self {
        Self::with_step_delay(DEFAULT_STEP_DELAY)
    }

    /// Create an empty board with a custom replay step delay
    pub fn with_step_delay(step_delay: Duration) -> Self {
        Self {
            model: RwLock::new(GraphModel::new()),
            selection: Mutex::new(Selection::default()),
            sequencer: Sequencer::new(step_delay),
        }
    }

    // --- Structural mutation ---

    /// Add a node at the given position
    pub fn add_node(&self, position: Position) -> NodeId {
        self.write_model().add_node(position)
    }

    /// Remove a node and its incident edges; clears a matching selection
    ///
    /// Returns the cascaded edge keys so the renderer can erase them.
    pub fn remove_node(&self, id: NodeId) -> BoardResult<Vec<EdgeKey>> {
        let cascaded = self.write_model().remove_node(id)?;
        let mut selection = self.selection_lock();
        if selection.start == Some(id) {
            selection.start = None;
        }
        if selection.end == Some(id) {
            selection.end = None;
        }
        Ok(cascaded)
    }

    /// Add an edge between two existing nodes
    pub fn add_edge(&self, a: NodeId, b: NodeId, weight: i64) -> BoardResult<EdgeKey> {
        Ok(self.write_model().add_edge(a, b, weight)?)
    }

    /// Remove an edge by canonical key
    pub fn remove_edge(&self, key: EdgeKey) -> BoardResult<()> {
        Ok(self.write_model().remove_edge(key)?)
    }

    /// Move a node; weights and adjacency are untouched
    pub fn move_node(&self, id: NodeId, position: Position) -> BoardResult<()> {
        Ok(self.write_model().move_node(id, position)?)
    }

    // --- Read ---

    /// Get a copy of a node
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.read_model().get_node(id).cloned()
    }

    /// A consistent copy of the whole model
    pub fn snapshot(&self) -> GraphModel {
        self.read_model().clone()
    }

    pub fn node_count(&self) -> usize {
        self.read_model().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.read_model().edge_count()
    }

    // --- Selection ---

    /// Designate the start node, replacing any previous one
    pub fn set_start(&self, id: NodeId) -> BoardResult<()> {
        if !self.read_model().contains_node(id) {
            return Err(GraphError::NodeNotFound(id).into());
        }
        self.selection_lock().start = Some(id);
        Ok(())
    }

    /// Designate the end node, replacing any previous one
    pub fn set_end(&self, id: NodeId) -> BoardResult<()> {
        if !self.read_model().contains_node(id) {
            return Err(GraphError::NodeNotFound(id).into());
        }
        self.selection_lock().end = Some(id);
        Ok(())
    }

    /// The current selection
    pub fn selection(&self) -> Selection {
        *self.selection_lock()
    }

    pub fn clear_selection(&self) {
        *self.selection_lock() = Selection::default();
    }

    // --- Runs ---

    /// Compute the shortest path between the selected endpoints.
    ///
    /// The model read lock is held for the whole call, so the run sees
    /// a stable snapshot even with concurrent writers.
    pub fn route(&self) -> BoardResult<PathResult> {
        let (source, target) = self.endpoints()?;
        let model = self.read_model();
        let result = RouteQuery::between(source, target).execute(&model)?;
        info!(
            source = %source,
            target = %target,
            found = result.is_found(),
            cost = ?result.cost,
            "route finished"
        );
        Ok(result)
    }

    /// Compute the route and start its replay, cancelling any previous one
    pub fn run(&self) -> BoardResult<ReplayHandle> {
        let (source, target) = self.endpoints()?;
        let result = self.route()?;
        Ok(self.sequencer.replay(&result, source, target))
    }

    /// Like [`run`](Self::run), but emitting into a caller-supplied sink
    pub fn run_into(&self, sink: Box<dyn VisualSink>) -> BoardResult<ReplayRun> {
        let (source, target) = self.endpoints()?;
        let result = self.route()?;
        Ok(self.sequencer.replay_into(&result, source, target, sink))
    }

    /// Clear the graph, the selection, and any in-flight replay
    pub fn reset(&self) {
        self.sequencer.cancel_active();
        self.write_model().clear();
        self.clear_selection();
        info!("board reset");
    }

    /// The configured replay step delay
    pub fn step_delay(&self) -> Duration {
        self.sequencer.step_delay()
    }

    fn endpoints(&self) -> BoardResult<(NodeId, NodeId)> {
        match self.selection() {
            Selection {
                start: Some(source),
                end: Some(target),
            } => Ok((source, target)),
            _ => Err(BoardError::SelectionIncomplete),
        }
    }

    fn read_model(&self) -> RwLockReadGuard<'_, GraphModel> {
        self.model.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_model(&self) -> RwLockWriteGuard<'_, GraphModel> {
        self.model.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn selection_lock(&self) -> MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Pathboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_board() -> (Pathboard, [NodeId; 3]) {
        let board = Pathboard::with_step_delay(Duration::from_millis(1));
        let a = board.add_node(Position::new(0.0, 0.0));
        let b = board.add_node(Position::new(10.0, 0.0));
        let c = board.add_node(Position::new(5.0, 10.0));
        board.add_edge(a, b, 1).unwrap();
        board.add_edge(b, c, 1).unwrap();
        board.add_edge(a, c, 5).unwrap();
        (board, [a, b, c])
    }

    #[test]
    fn route_requires_both_selections() {
        let (board, [a, _, _]) = triangle_board();
        assert!(matches!(
            board.route(),
            Err(BoardError::SelectionIncomplete)
        ));
        board.set_start(a).unwrap();
        assert!(matches!(
            board.route(),
            Err(BoardError::SelectionIncomplete)
        ));
    }

    #[test]
    fn route_uses_the_selection() {
        let (board, [a, b, c]) = triangle_board();
        board.set_start(a).unwrap();
        board.set_end(c).unwrap();

        let result = board.route().unwrap();
        assert_eq!(result.path, vec![a, b, c]);
        assert_eq!(result.cost, Some(2));
    }

    #[test]
    fn selecting_a_missing_node_fails() {
        let (board, _) = triangle_board();
        let ghost = NodeId::from(9);
        assert!(board.set_start(ghost).is_err());
        assert_eq!(board.selection().start, None);
    }

    #[test]
    fn reselecting_replaces_the_previous_choice() {
        let (board, [a, b, _]) = triangle_board();
        board.set_start(a).unwrap();
        board.set_start(b).unwrap();
        assert_eq!(board.selection().start, Some(b));
    }

    #[test]
    fn removing_a_selected_node_clears_that_selection() {
        let (board, [a, b, c]) = triangle_board();
        board.set_start(a).unwrap();
        board.set_end(b).unwrap();

        board.remove_node(b).unwrap();

        let selection = board.selection();
        assert_eq!(selection.start, Some(a));
        assert_eq!(selection.end, None);
        assert!(board.node(c).is_some());
    }

    #[test]
    fn reset_clears_everything() {
        let (board, [a, _, _]) = triangle_board();
        board.set_start(a).unwrap();

        board.reset();

        assert_eq!(board.node_count(), 0);
        assert_eq!(board.edge_count(), 0);
        assert_eq!(board.selection(), Selection::default());
    }

    #[tokio::test]
    async fn run_replays_the_route() {
        let (board, [a, _, c]) = triangle_board();
        board.set_start(a).unwrap();
        board.set_end(c).unwrap();

        let mut handle = board.run().unwrap();
        let mut events = Vec::new();
        while let Some(event) = handle.next().await {
            events.push(event);
        }
        // One intermediate visit, two path edges, one completion.
        assert_eq!(events.len(), 4);
    }

    #[tokio::test]
    async fn a_second_run_cancels_the_first() {
        let (board, [a, _, c]) = triangle_board();
        board.set_start(a).unwrap();
        board.set_end(c).unwrap();

        let mut stale = board.run().unwrap();
        stale.next().await;
        let _fresh = board.run().unwrap();

        assert!(stale.is_cancelled());
        assert_eq!(stale.next().await, None);
    }
}
