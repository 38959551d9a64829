//! Timed, cancelable replay of shortest-path runs

mod cancel;
mod events;
mod sequencer;

pub use cancel::CancellationToken;
pub use events::{script, VisualEvent};
pub use sequencer::{
    ChannelSink, ReplayHandle, ReplayId, ReplayRun, Sequencer, SinkError, VisualSink,
    DEFAULT_STEP_DELAY,
};
