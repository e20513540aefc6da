//! Stream Session Model
//!
//! One `StreamSession` exists per open event-stream connection. It is
//! replaced wholesale when the stream closes or a new one is attached, which
//! is what resets the once-per-session guarantees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::marker::Outcome;

/// State of one event-stream connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSession {
    /// Unique identifier used to correlate log records
    pub id: String,

    /// Every chunk received, in arrival order
    lines: Vec<String>,

    /// Number of chunks received so far
    pub line_count: usize,

    /// Trimmed identity chunk, once resolved
    pub command_identity: Option<String>,

    /// Trimmed command chunk, once received
    pub command_line: Option<String>,

    /// Whether this stream belongs to a freshly started command
    pub is_new_command: bool,

    /// Outcome of the first terminal marker seen
    pub completed: Option<Outcome>,

    /// When the stream was attached
    pub started_at: DateTime<Utc>,
}

impl StreamSession {
    /// Create a session for a newly opened stream
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lines: Vec::new(),
            line_count: 0,
            command_identity: None,
            command_line: None,
            is_new_command: true,
            completed: None,
            started_at: Utc::now(),
        }
    }

    /// Record a received chunk and return its index
    pub fn push_line(&mut self, text: String) -> usize {
        let index = self.line_count;
        self.lines.push(text);
        self.line_count += 1;
        index
    }

    /// All chunks received so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether a terminal marker has already been seen
    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}
