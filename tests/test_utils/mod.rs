//! Test Utilities
//!
//! Shared fixtures for the integration, contract and property tests.

#![allow(dead_code)]

pub mod fixtures;

// Re-exports for convenience
pub use fixtures::{feed, frame, synchronizer, synchronizer_with, HookLog};
