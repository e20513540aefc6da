//! Cookie-like key/value storage
//!
//! The dashboard keeps the identity of the last started command in a cookie
//! so that a reload or a second tab can tell a reconnect from a new command.
//! [`KeyValueStore`] abstracts that cookie jar; [`MemoryStore`] and
//! [`FileStore`] are the two implementations shipped here.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RecordConfig;
use crate::error::{Error, Result};

/// Source of the current time for expiry checks
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cookie-like store with per-entry expiry
pub trait KeyValueStore {
    /// Value for `key`, unless absent or expired
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key` for `ttl_days`
    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()>;

    /// Remove `key`
    fn erase(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn new(key: &str, value: &str, now: DateTime<Utc>, ttl_days: u32) -> Result<Self> {
        let expires_at = Duration::try_days(i64::from(ttl_days))
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| Error::StoreExpiryOverflow {
                key: key.to_string(),
                ttl_days,
            })?;
        Ok(Self {
            value: value.to_string(),
            expires_at,
        })
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-memory store
pub struct MemoryStore {
    entries: HashMap<String, Entry>,
    clock: Clock,
}

impl MemoryStore {
    /// Create an empty store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Create an empty store with a custom clock
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Number of entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        let now = (self.clock)();
        let entry = Entry::new(key, value, now, ttl_days)?;
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn erase(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON file backed store
///
/// The whole jar is rewritten on every change; expired entries are pruned
/// when the file is opened.
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Entry>,
    clock: Clock,
}

impl FileStore {
    /// Default location of the jar
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tutordash")
            .join("cookies.json")
    }

    /// Open (or lazily create) the jar at `path`
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(Utc::now))
    }

    /// Open the jar with a custom clock
    pub fn open_with_clock(path: &Path, clock: Clock) -> Result<Self> {
        let mut entries: HashMap<String, Entry> = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| Error::StoreIoFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| Error::StoreCorrupted {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
        } else {
            HashMap::new()
        };

        let now = clock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        if entries.len() != before {
            debug!("Pruned {} expired entries from {}", before - entries.len(), path.display());
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            clock,
        })
    }

    /// Location of the jar
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let io_err = |e: std::io::Error| Error::StoreIoFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) -> Result<()> {
        let now = (self.clock)();
        let entry = Entry::new(key, value, now, ttl_days)?;
        self.entries.insert(key.to_string(), entry);
        self.persist()
    }

    fn erase(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Typed access to the persisted identity of the last started command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    key: String,
    ttl_days: u32,
}

impl CommandRecord {
    pub fn new(key: &str, ttl_days: u32) -> Self {
        Self {
            key: key.to_string(),
            ttl_days,
        }
    }

    pub fn from_config(config: &RecordConfig) -> Self {
        Self::new(&config.identity_key, config.ttl_days)
    }

    /// Identity persisted by the last new command, if still valid
    pub fn last_identity<K: KeyValueStore + ?Sized>(&self, store: &K) -> Option<String> {
        store.get(&self.key)
    }

    /// Overwrite the persisted identity
    pub fn remember<K: KeyValueStore + ?Sized>(&self, store: &mut K, identity: &str) -> Result<()> {
        store.set(&self.key, identity, self.ttl_days)
    }

    /// Drop the persisted identity
    pub fn forget<K: KeyValueStore + ?Sized>(&self, store: &mut K) -> Result<()> {
        store.erase(&self.key)
    }
}

impl Default for CommandRecord {
    fn default() -> Self {
        Self::from_config(&RecordConfig::default())
    }
}
