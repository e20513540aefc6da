//! Configuration management for tutordash-logs
//!
//! Timing constants, store keys, scroll policy and the toast table all live
//! in [`Config`]. Defaults reproduce the dashboard behaviour; files found by
//! [`loader::ConfigLoader`] override them.

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::stream::StreamLayout;
use crate::models::ToastTable;
use crate::ui::ScrollPolicy;
use crate::timer::Millis;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stream framing
    pub stream: StreamConfig,

    /// Viewport follow behaviour
    pub scroll: ScrollConfig,

    /// Persisted command record
    pub record: RecordConfig,

    /// Toast table and timings
    pub toast: ToastConfig,
}

impl Config {
    /// Check every field for values the synchronizer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ScrollPolicy::BottomAware { tolerance } = self.scroll.policy {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        if !self.scroll.line_height.is_finite() || self.scroll.line_height <= 0.0 {
            return Err(ConfigError::InvalidLineHeight(self.scroll.line_height));
        }
        if self.scroll.release_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::InvalidDelay {
                field: "scroll.release_delay_ms",
                value: self.scroll.release_delay_ms,
            });
        }
        if self.record.identity_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("record.identity_key"));
        }
        if self.record.launch_required_key.trim().is_empty() {
            return Err(ConfigError::EmptyKey("record.launch_required_key"));
        }
        if !(1..=MAX_TTL_DAYS).contains(&self.record.ttl_days) {
            return Err(ConfigError::InvalidTtl(self.record.ttl_days));
        }
        if self.toast.remove_delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::InvalidDelay {
                field: "toast.remove_delay_ms",
                value: self.toast.remove_delay_ms,
            });
        }
        if let Some(delay) = self.toast.auto_dismiss_ms {
            if delay == 0 {
                return Err(ConfigError::InvalidDelay {
                    field: "toast.auto_dismiss_ms",
                    value: delay,
                });
            }
        }
        Ok(())
    }
}

/// Upper bound for any configured delay
const MAX_DELAY_MS: Millis = 60_000;

/// Upper bound for the identity record lifetime
pub const MAX_TTL_DAYS: u32 = 3650;

/// Stream framing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Which leading chunks carry metadata
    pub layout: StreamLayout,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            layout: StreamLayout::Separate,
        }
    }
}

/// Viewport follow configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// How user scroll events affect following
    pub policy: ScrollPolicy,

    /// Delay before a programmatic scroll stops absorbing scroll events
    pub release_delay_ms: Millis,

    /// Height added to the content per appended line
    pub line_height: f32,

    /// Visible height of the log viewport
    pub client_height: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            policy: ScrollPolicy::default(),
            release_delay_ms: 10,
            line_height: 16.0,
            client_height: 480.0,
        }
    }
}

/// Persisted record configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    /// Store key holding the identity of the last started command
    pub identity_key: String,

    /// Lifetime of the identity record in days
    pub ttl_days: u32,

    /// Store key listing plugins that need a platform launch
    pub launch_required_key: String,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            identity_key: "last-log-file".to_string(),
            ttl_days: 1,
            launch_required_key: "plugins-require-launch".to_string(),
        }
    }
}

/// Toast configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Command-prefix keyed toast content
    pub table: ToastTable,

    /// Delay between displaying the toast and activating it
    pub activate_delay_ms: Millis,

    /// Delay between deactivating the toast and removing it
    pub remove_delay_ms: Millis,

    /// Dismiss automatically after this long, if set
    pub auto_dismiss_ms: Option<Millis>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            table: ToastTable::default(),
            activate_delay_ms: 1,
            remove_delay_ms: 500,
            auto_dismiss_ms: None,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid bottom tolerance: {0} (must be a non-negative number)")]
    InvalidTolerance(f32),

    #[error("Invalid line height: {0} (must be greater than 0)")]
    InvalidLineHeight(f32),

    #[error("Invalid delay for {field}: {value}ms")]
    InvalidDelay { field: &'static str, value: Millis },

    #[error("Store key {0} cannot be empty")]
    EmptyKey(&'static str),

    #[error("Invalid record lifetime: {0} days (must be between 1 and 3650)")]
    InvalidTtl(u32),
}

impl ConfigError {
    /// Dotted path of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::InvalidTolerance(_) => "scroll.policy.tolerance",
            ConfigError::InvalidLineHeight(_) => "scroll.line_height",
            ConfigError::InvalidDelay { field, .. } => field,
            ConfigError::EmptyKey(field) => field,
            ConfigError::InvalidTtl(_) => "record.ttl_days",
        }
    }
}
