//! The sequencer: paced, cancelable replay of a run result

use super::cancel::CancellationToken;
use super::events::{script, VisualEvent};
use crate::graph::NodeId;
use crate::route::PathResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Delay between consecutive visual events unless configured otherwise
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);

/// Unique identifier for one replay run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplayId(Uuid);

impl ReplayId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ReplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from event delivery
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("event sink closed")]
    Closed,
}

/// The interface through which the sequencer pushes events to a renderer.
///
/// Delivery is awaited, so a slow renderer backpressures the replay
/// rather than piling up stale events.
#[async_trait]
pub trait VisualSink: Send + Sync {
    /// Deliver one event. `Err(Closed)` stops the replay.
    async fn deliver(&self, event: VisualEvent) -> Result<(), SinkError>;
}

/// A sink that forwards events into an mpsc channel
pub struct ChannelSink {
    tx: mpsc::Sender<VisualEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<VisualEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl VisualSink for ChannelSink {
    async fn deliver(&self, event: VisualEvent) -> Result<(), SinkError> {
        self.tx.send(event).await.map_err(|_| SinkError::Closed)
    }
}

/// An in-flight replay: its id, token, and emitter task
pub struct ReplayRun {
    id: ReplayId,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ReplayRun {
    pub fn id(&self) -> ReplayId {
        self.id
    }

    /// Stop further event emission
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the emitter finishes (completion or cancellation)
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// A replay subscription: the run plus its event stream
///
/// Non-restartable: once drained or cancelled it yields nothing more.
pub struct ReplayHandle {
    run: ReplayRun,
    events: mpsc::Receiver<VisualEvent>,
}

impl ReplayHandle {
    pub fn id(&self) -> ReplayId {
        self.run.id()
    }

    pub fn cancel(&self) {
        self.run.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.run.is_cancelled()
    }

    /// Receive the next event, or `None` when the replay has completed
    /// or been cancelled. A buffered event is dropped, not yielded, if
    /// cancellation lands before it is consumed.
    pub async fn next(&mut self) -> Option<VisualEvent> {
        if self.run.is_cancelled() {
            self.events.close();
            return None;
        }
        match self.events.recv().await {
            Some(event) if !self.run.is_cancelled() => Some(event),
            _ => None,
        }
    }
}

/// Turns a run result into a timed sequence of visual events.
///
/// At most one replay is live at a time: starting a new one cancels the
/// previous run outright, so two runs never interleave events.
pub struct Sequencer {
    step_delay: Duration,
    active: Mutex<Option<CancellationToken>>,
}

impl Sequencer {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay,
            active: Mutex::new(None),
        }
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Start a replay and subscribe to its events.
    ///
    /// The channel holds a single event, so emission stays in lockstep
    /// with the consumer.
    pub fn replay(&self, result: &PathResult, source: NodeId, target: NodeId) -> ReplayHandle {
        let (tx, rx) = mpsc::channel(1);
        let run = self.replay_into(result, source, target, Box::new(ChannelSink::new(tx)));
        ReplayHandle { run, events: rx }
    }

    /// Start a replay that emits directly into the given sink.
    pub fn replay_into(
        &self,
        result: &PathResult,
        source: NodeId,
        target: NodeId,
        sink: Box<dyn VisualSink>,
    ) -> ReplayRun {
        let token = CancellationToken::new();
        if let Some(previous) = self.active_lock().replace(token.clone()) {
            previous.cancel();
        }

        let id = ReplayId::new();
        let events = script(result, source, target);
        let delay = self.step_delay;
        let emitter_token = token.clone();
        let task = tokio::spawn(async move {
            emit(events, delay, emitter_token, sink).await;
        });
        debug!(replay = %id, source = %source, target = %target, "replay started");
        ReplayRun { id, token, task }
    }

    /// Cancel the in-flight replay, if any
    pub fn cancel_active(&self) {
        if let Some(token) = self.active_lock().take() {
            token.cancel();
        }
    }

    fn active_lock(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

/// Emit events in order, pausing `delay` before each event after the
/// first and checking the token between emissions.
async fn emit(
    events: Vec<VisualEvent>,
    delay: Duration,
    token: CancellationToken,
    sink: Box<dyn VisualSink>,
) {
    let mut first = true;
    for event in events {
        if !first {
            tokio::time::sleep(delay).await;
        }
        first = false;
        if token.is_cancelled() {
            debug!("replay cancelled");
            return;
        }
        if sink.deliver(event).await.is_err() {
            debug!("event sink closed, stopping replay");
            return;
        }
    }
}
