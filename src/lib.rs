//! tutordash-logs - log streaming for the tutordash administration dashboard
//!
//! This library models the part of the dashboard that follows a running
//! `tutor` command: it consumes the command's event stream, tells a freshly
//! started command apart from a reconnect, flips the page's run/cancel
//! controls, reports completion exactly once and keeps the log viewport
//! scrolled to the bottom while the user lets it.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`stream`] - Chunk classification, completion detection, the synchronizer and its async driver
//! - [`store`] - Persisted command record (cookie-like key/value store with expiry)
//! - [`timer`] - Cancelable timers on a virtual millisecond clock
//! - [`models`] - Data structures (StreamSession, Classification, ToastContent)
//! - [`config`] - Configuration loading and validation
//! - [`mod@error`] - Error types and Result aliases
//!
//! ### Page Components
//!
//! - [`ui`] - Scroll-position controller, toast lifecycle, page hooks, log sinks
//! - [`launch`] - Launch-required plugin warnings
//!
//! ## Quick Start
//!
//! ```no_run
//! use tutordash_logs::{init, LogStreamSynchronizer, MemoryStore, PageHooks, ViewScope};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = init()?;
//! let hooks = PageHooks::new().on_show_run_button(|| println!("run button back"));
//! let mut sync = LogStreamSynchronizer::new(
//!     Vec::<String>::new(),
//!     MemoryStore::new(),
//!     config,
//!     hooks,
//!     ViewScope::All,
//! );
//! sync.on_frame(0, r#""session-123""#);
//! sync.on_frame(1, r#""$ tutor plugins install demo""#);
//! sync.on_frame(2, r#""Success!""#);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Everything is single-threaded and event driven. Frames, user input and
//! timer expiries are handled one at a time in arrival order; delayed effects
//! (scroll-lock release, toast transitions) are scheduled on [`timer::Timers`]
//! and fired by `tick`. The [`stream::driver`] maps tokio time onto that
//! clock for real event sources.

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod launch;
pub mod models;
pub mod store;
pub mod stream;
pub mod timer;
pub mod ui;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};
pub use stream::{LogStreamSynchronizer, StreamLayout};

// Convenience re-exports for common types
pub use config::loader::ConfigLoader;
pub use models::{Outcome, StreamSession, ToastContent};
pub use store::{CommandRecord, FileStore, KeyValueStore, MemoryStore};
pub use ui::{HtmlLogSink, LogSink, PageHooks, ViewScope};

// Version information
/// The current version of tutordash-logs from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The package name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The package description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration from the default locations
///
/// Falls back to the default configuration when no file is found or the
/// file found cannot be used, so a broken config file never disables the
/// log panel.
pub fn init() -> Result<Config> {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific file
pub fn init_with_config(config_path: &std::path::Path) -> Result<Config> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    ConfigLoader::new().load_from_path(config_path).map_err(|e| {
        error!(
            "Failed to load configuration from {}: {}",
            config_path.display(),
            e
        );
        e
    })
}

/// Human-readable explanation of a startup error
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigLoadFailed { path, reason } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}\n\nTry:\n• Check configuration file syntax\n• Use default configuration",
                path.display(),
                reason
            )
        }
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}\n\nTry:\n• Check configuration value\n• Use default configuration",
                field, reason
            )
        }
        Error::StoreIoFailed { path, reason } | Error::StoreCorrupted { path, reason } => {
            format!(
                "Store Error: '{}': {}\n\nTry:\n• Check file permissions\n• Remove the store file to start fresh",
                path.display(),
                reason
            )
        }
        Error::StreamClosedEarly => {
            "Stream Error: The event stream delivered no frames\n\nTry:\n• Check that the command log exists".to_string()
        }
        _ => format!("Unexpected Error: {}", error),
    }
}
