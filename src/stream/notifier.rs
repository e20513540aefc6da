//! Terminal-state notification
//!
//! Watches output chunks for terminal markers and reports the completion of
//! a command at most once per stream session.

use crate::models::{Outcome, TerminalMarker};

/// Per-chunk context supplied by the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyContext {
    /// Whether the stream belongs to a freshly started command
    pub is_new_command: bool,
    /// Whether the hosting page cares about this command
    pub on_relevant_view: bool,
}

/// A command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completed {
    pub outcome: Outcome,
}

/// One-shot completion detector for a single stream session
#[derive(Debug, Clone, Default)]
pub struct TerminalNotifier {
    latched: Option<TerminalMarker>,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marker that ended the session, if one has been seen
    pub fn latched(&self) -> Option<TerminalMarker> {
        self.latched
    }

    /// Inspect an output chunk.
    ///
    /// The first marker latches the session whether or not the context lets
    /// the event through; reconnects and unrelated views therefore never fire
    /// later in the same session either.
    pub fn on_chunk(&mut self, text: &str, context: NotifyContext) -> Option<Completed> {
        if self.latched.is_some() {
            return None;
        }
        let marker = TerminalMarker::detect(text);
        let outcome = marker.outcome()?;
        self.latched = Some(marker);

        if !context.is_new_command {
            debug!("Ignoring {:?} marker on a reconnected stream", outcome);
            return None;
        }
        if !context.on_relevant_view {
            debug!("Ignoring {:?} marker outside the relevant view", outcome);
            return None;
        }
        Some(Completed { outcome })
    }

    /// Forget the latch, for a new session
    pub fn reset(&mut self) {
        self.latched = None;
    }
}
