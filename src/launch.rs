//! Launch-required warnings
//!
//! Enabling or upgrading a plugin only takes effect after the platform is
//! launched again. The server lists those plugins in a cookie; pages show a
//! warning next to each of them, and a successful `local launch` clears it.

use crate::error::Result;
use crate::models::normalize_command;
use crate::store::KeyValueStore;

/// Command whose success applies all pending plugin changes
pub const LAUNCH_COMMAND: &str = "local launch";

/// Parse the cookie value: a quoted, `+`-separated list of plugin names
pub fn parse_launch_required(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    value
        .split('+')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Plugins that still need a platform launch
pub fn plugins_requiring_launch<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Vec<String> {
    store
        .get(key)
        .map(|value| parse_launch_required(&value))
        .unwrap_or_default()
}

/// Whether `command` launches the platform
pub fn is_launch_command(command: &str) -> bool {
    normalize_command(command).starts_with(LAUNCH_COMMAND)
}

/// Forget the pending plugin list after a successful launch
pub fn clear_launch_required<K: KeyValueStore + ?Sized>(store: &mut K, key: &str) -> Result<()> {
    info!("Platform launched, clearing launch-required warnings");
    store.erase(key)
}
