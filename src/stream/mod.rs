//! Event-stream processing
//!
//! Classification, completion detection, and the synchronizer that drives
//! them for one log panel.

pub mod classifier;
pub mod driver;
pub mod notifier;
pub mod synchronizer;

pub use classifier::{StreamClassifier, StreamLayout};
pub use driver::{frame_payload, frames_from_reader, pump, PumpReport};
pub use notifier::{Completed, NotifyContext, TerminalNotifier};
pub use synchronizer::{ChunkReport, LogStreamSynchronizer};
