//! Stream classification and command identity tracking
//!
//! The first chunk of every stream names the log file of the command that
//! produced it. Comparing that identity with the one persisted by the last
//! new command tells a freshly started command apart from a reconnect
//! (page reload, second tab) to a command that is running or finished.

use serde::{Deserialize, Serialize};

use crate::models::{Classification, StreamSession, TerminalMarker};
use crate::store::{CommandRecord, KeyValueStore};

/// Which leading chunks carry metadata rather than output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamLayout {
    /// Identity at index 0, output from index 1
    Merged,
    /// Identity at index 0, command line at index 1, output from index 2
    #[default]
    Separate,
}

impl StreamLayout {
    /// Index of the first output chunk in a stream that opened with an identity
    pub fn first_output_index(self) -> usize {
        match self {
            StreamLayout::Merged => 1,
            StreamLayout::Separate => 2,
        }
    }
}

/// Classifies chunks by position and resolves command identity
#[derive(Debug, Clone)]
pub struct StreamClassifier {
    layout: StreamLayout,
    record: CommandRecord,
}

impl StreamClassifier {
    pub fn new(layout: StreamLayout, record: CommandRecord) -> Self {
        Self { layout, record }
    }

    pub fn layout(&self) -> StreamLayout {
        self.layout
    }

    pub fn record(&self) -> &CommandRecord {
        &self.record
    }

    /// Classify the chunk at `index` and update `session` accordingly.
    ///
    /// For an identity chunk of a new command the identity is persisted
    /// before this returns, so a concurrent reconnect already sees it.
    pub fn classify<K: KeyValueStore + ?Sized>(
        &self,
        session: &mut StreamSession,
        index: usize,
        text: &str,
        store: &mut K,
    ) -> Classification {
        if index == 0 {
            return self.classify_first(session, text, store);
        }

        let is_command_chunk = self.layout == StreamLayout::Separate
            && index == 1
            && session.command_identity.is_some();
        if is_command_chunk {
            let command = text.trim().to_string();
            debug!("Session {} runs '{}'", session.id, command);
            session.command_line = Some(command);
        }

        Classification {
            is_identity_chunk: false,
            is_command_chunk,
            is_new_command: session.is_new_command,
        }
    }

    fn classify_first<K: KeyValueStore + ?Sized>(
        &self,
        session: &mut StreamSession,
        text: &str,
        store: &mut K,
    ) -> Classification {
        // A stream whose very first chunk already ends the command belongs to
        // a command that finished before we attached
        if TerminalMarker::detect(text).is_terminal() {
            info!("Session {} attached to a finished command", session.id);
            session.is_new_command = false;
            return Classification {
                is_identity_chunk: false,
                is_command_chunk: false,
                is_new_command: false,
            };
        }

        let identity = text.trim().to_string();
        let last = self.record.last_identity(store);
        let is_new_command = last.as_deref() != Some(identity.as_str());

        if is_new_command {
            info!("Session {} started new command '{}'", session.id, identity);
            if let Err(e) = self.record.remember(store, &identity) {
                warn!("Failed to persist command identity '{}': {}", identity, e);
            }
        } else {
            info!("Session {} reconnected to command '{}'", session.id, identity);
        }

        session.command_identity = Some(identity);
        session.is_new_command = is_new_command;

        Classification {
            is_identity_chunk: true,
            is_command_chunk: false,
            is_new_command,
        }
    }
}

impl Default for StreamClassifier {
    fn default() -> Self {
        Self::new(StreamLayout::default(), CommandRecord::default())
    }
}
