//! Store-facing sink for `StateMessage`s.
//!
//! DESIGN
//! ======
//! The orchestrator only needs "hand this message to the store". Two sinks
//! ship with the crate: an unbounded tokio channel for hosts that run the
//! reducer on their own task, and [`RecordingDispatch`], which keeps every
//! message and can fold them into a `UserState`.

use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::message::StateMessage;
use crate::state::UserState;

pub trait Dispatch: Send + Sync {
    fn dispatch(&self, message: StateMessage);
}

impl Dispatch for UnboundedSender<StateMessage> {
    fn dispatch(&self, message: StateMessage) {
        if let Err(e) = self.send(message) {
            warn!(kind = e.0.kind(), "store receiver dropped; message discarded");
        }
    }
}

/// Keeps dispatched messages in order.
#[derive(Debug, Default)]
pub struct RecordingDispatch {
    messages: Mutex<Vec<StateMessage>>,
}

impl RecordingDispatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything dispatched so far.
    #[must_use]
    pub fn messages(&self) -> Vec<StateMessage> {
        self.lock().clone()
    }

    /// Remove and return everything dispatched so far.
    pub fn drain(&self) -> Vec<StateMessage> {
        std::mem::take(&mut *self.lock())
    }

    /// Fold the recorded messages into `state` and clear the record.
    pub fn apply_to(&self, state: &mut UserState) {
        for message in self.drain() {
            state.apply(&message);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StateMessage>> {
        self.messages.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, message: StateMessage) {
        self.lock().push(message);
    }
}
