//! Stream Chunk Model
//!
//! A chunk is one frame delivered by the event source. Frames carry a single
//! JSON-encoded string; the decoded string is the chunk text.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest frame excerpt kept in a [`Error::MalformedFrame`]
const FRAME_EXCERPT_LEN: usize = 80;

/// Decode one stream frame into its chunk text
pub fn decode_frame(raw: &str) -> Result<String> {
    serde_json::from_str::<String>(raw).map_err(|e| Error::MalformedFrame {
        frame: raw.chars().take(FRAME_EXCERPT_LEN).collect(),
        reason: e.to_string(),
    })
}

/// Positional role of a chunk within its stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkRole {
    /// First chunk; names the log file of the running command
    Identity,
    /// Command line of the running command
    Command,
    /// Process output, appended verbatim to the log view
    Output,
}

/// Result of classifying a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub is_identity_chunk: bool,
    pub is_command_chunk: bool,
    /// Whether the session belongs to a freshly started command
    pub is_new_command: bool,
}

impl Classification {
    /// Role implied by the identity/command flags
    pub fn role(&self) -> ChunkRole {
        if self.is_identity_chunk {
            ChunkRole::Identity
        } else if self.is_command_chunk {
            ChunkRole::Command
        } else {
            ChunkRole::Output
        }
    }
}
