//! Data models for tutordash-logs
//!
//! This module contains the core data structures that flow through the
//! log-stream synchronizer.

pub mod chunk;
pub mod marker;
pub mod session;
pub mod toast;

// Re-export main types for convenience
pub use chunk::{decode_frame, ChunkRole, Classification};
pub use marker::{Outcome, TerminalMarker};
pub use session::StreamSession;
pub use toast::{normalize_command, ToastContent, ToastRule, ToastTable};
