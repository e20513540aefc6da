//! Terminal markers
//!
//! The process output announces the end of a command with a literal marker
//! line. These literals are the only textual coupling with the process side.

use serde::{Deserialize, Serialize};

/// Marker printed when a command finishes successfully
pub const SUCCESS_MARKER: &str = "Success!";

/// Marker printed when a command is cancelled
pub const CANCELLED_MARKER: &str = "Cancelled!";

/// Marker found in a chunk, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalMarker {
    Success,
    Cancelled,
    #[default]
    None,
}

impl TerminalMarker {
    /// Scan chunk text for a marker. `Success!` wins when both are present.
    pub fn detect(text: &str) -> Self {
        if text.contains(SUCCESS_MARKER) {
            TerminalMarker::Success
        } else if text.contains(CANCELLED_MARKER) {
            TerminalMarker::Cancelled
        } else {
            TerminalMarker::None
        }
    }

    /// Whether this is a terminal marker at all
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalMarker::None)
    }

    /// Completion outcome carried by the marker
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            TerminalMarker::Success => Some(Outcome::Success),
            TerminalMarker::Cancelled => Some(Outcome::Cancelled),
            TerminalMarker::None => None,
        }
    }
}

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Cancelled,
}
