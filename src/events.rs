//! Renderer notifications
//!
//! The engine is push-only towards the renderer: every visible change of a
//! sequence is sent as a `SequenceEvent` over an unbounded channel and the
//! engine never waits for the receiver.
//!
//! ```text
//! Algorithm --[swap/set/mark]--> Sequence --[SequenceEvent]--> Renderer
//! ```

use tokio::sync::mpsc;

use crate::model::ElementState;

/// A visible change of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEvent {
    /// The element at `index` now shows `state`
    StateChanged { index: usize, state: ElementState },
    /// The element at `index` now holds `value`
    ValueChanged { index: usize, value: u32 },
    /// All states were reset to inactive
    StatesReset,
    /// The completion animation has run
    Finished,
}

pub type EventSender = mpsc::UnboundedSender<SequenceEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<SequenceEvent>;

/// Create a renderer channel
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
