//! Input-mode state machine and pointer dispatch
//!
//! The current interaction mode is an explicit enumerated state, not a
//! shared mutable global: button presses run through [`press`], pointer
//! events through [`InputDispatcher::dispatch`]. Pressing the active
//! mode's button toggles back to idle.

use crate::api::{BoardResult, Pathboard};
use crate::graph::{EdgeKey, GraphError, NodeId, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Interaction mode selected by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Idle,
    AddNode,
    RemoveNode,
    AddEdge,
    RemoveEdge,
    DragNode,
    SetStart,
    SetEnd,
}

impl Mode {
    /// Status line shown while the mode is active
    pub fn status_line(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::AddNode => "add node: click the canvas",
            Mode::RemoveNode => "remove node: click the node to delete",
            Mode::AddEdge => "connect: click the first node",
            Mode::RemoveEdge => "remove edge: click the edge to delete",
            Mode::DragNode => "select: drag a node to move it",
            Mode::SetStart => "set start: click a node",
            Mode::SetEnd => "set end: click a node",
        }
    }
}

/// Apply a toolbar press: selecting the active mode again toggles idle
pub fn press(current: Mode, button: Mode) -> Mode {
    if current == button {
        Mode::Idle
    } else {
        button
    }
}

/// A pointer event from the canvas, already hit-tested by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Click on empty canvas
    Background { position: Position },
    /// Click on a node
    Node { id: NodeId },
    /// Click on an edge
    Edge { key: EdgeKey },
    /// Mouse-down on a node
    DragStart { id: NodeId, at: Position },
    /// Mouse-move while a drag is live
    DragMove { at: Position },
    /// Mouse-up or canvas leave
    DragEnd,
}

/// What a dispatched event did, for the renderer to react to
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// The mode changed (toolbar press or an action that resets it)
    ModeChanged(Mode),
    NodeAdded(NodeId),
    NodeRemoved {
        id: NodeId,
        /// Edges removed by the cascade, for the renderer to erase
        cascaded: Vec<EdgeKey>,
    },
    EdgeAdded(EdgeKey),
    EdgeRemoved(EdgeKey),
    /// First endpoint of a two-click edge chosen; highlight it
    EdgeOriginChosen(NodeId),
    /// Both endpoints chosen; the UI must prompt for a weight and call
    /// [`InputDispatcher::submit_weight`]
    WeightRequired { from: NodeId, to: NodeId },
    StartSet(NodeId),
    EndSet(NodeId),
    NodeMoved(NodeId),
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    id: NodeId,
    offset_x: f64,
    offset_y: f64,
}

/// Routes pointer events to the board according to the current mode.
///
/// Holds the transient interaction state: the mode, the pending edge
/// origin of a two-click connect, and the live drag.
#[derive(Debug, Default)]
pub struct InputDispatcher {
    mode: Mode,
    pending_edge: Option<NodeId>,
    drag: Option<DragState>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Apply a toolbar press; any half-finished connect or drag is dropped
    pub fn press_button(&mut self, button: Mode) -> Feedback {
        self.mode = press(self.mode, button);
        self.pending_edge = None;
        self.drag = None;
        debug!(mode = ?self.mode, "mode changed");
        Feedback::ModeChanged(self.mode)
    }

    /// Dispatch one pointer event against the board
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        board: &Pathboard,
    ) -> BoardResult<Vec<Feedback>> {
        match event {
            PointerEvent::Background { position } if self.mode == Mode::AddNode => {
                Ok(vec![Feedback::NodeAdded(board.add_node(position))])
            }
            PointerEvent::Node { id } => self.node_clicked(id, board),
            PointerEvent::Edge { key } if self.mode == Mode::RemoveEdge => {
                board.remove_edge(key)?;
                self.mode = Mode::Idle;
                Ok(vec![
                    Feedback::EdgeRemoved(key),
                    Feedback::ModeChanged(Mode::Idle),
                ])
            }
            PointerEvent::DragStart { id, at } if self.mode == Mode::DragNode => {
                let node = board.node(id).ok_or(GraphError::NodeNotFound(id))?;
                self.drag = Some(DragState {
                    id,
                    offset_x: at.x - node.position.x,
                    offset_y: at.y - node.position.y,
                });
                Ok(Vec::new())
            }
            PointerEvent::DragMove { at } => match self.drag {
                Some(drag) => {
                    let position = Position::new(at.x - drag.offset_x, at.y - drag.offset_y);
                    board.move_node(drag.id, position)?;
                    Ok(vec![Feedback::NodeMoved(drag.id)])
                }
                None => Ok(Vec::new()),
            },
            PointerEvent::DragEnd => {
                self.drag = None;
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Complete a two-click connect once the UI has collected a weight
    pub fn submit_weight(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: i64,
        board: &Pathboard,
    ) -> BoardResult<Feedback> {
        let key = board.add_edge(from, to, weight)?;
        Ok(Feedback::EdgeAdded(key))
    }

    fn node_clicked(&mut self, id: NodeId, board: &Pathboard) -> BoardResult<Vec<Feedback>> {
        match self.mode {
            Mode::RemoveNode => {
                let cascaded = board.remove_node(id)?;
                Ok(vec![Feedback::NodeRemoved { id, cascaded }])
            }
            Mode::AddEdge => match self.pending_edge.take() {
                None => {
                    self.pending_edge = Some(id);
                    Ok(vec![Feedback::EdgeOriginChosen(id)])
                }
                // Clicking the origin again abandons the connect.
                Some(from) if from == id => Ok(Vec::new()),
                Some(from) => Ok(vec![Feedback::WeightRequired { from, to: id }]),
            },
            Mode::SetStart => {
                board.set_start(id)?;
                self.mode = Mode::Idle;
                Ok(vec![
                    Feedback::StartSet(id),
                    Feedback::ModeChanged(Mode::Idle),
                ])
            }
            Mode::SetEnd => {
                board.set_end(id)?;
                self.mode = Mode::Idle;
                Ok(vec![Feedback::EndSet(id), Feedback::ModeChanged(Mode::Idle)])
            }
            _ => Ok(Vec::new()),
        }
    }
}
