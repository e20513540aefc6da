//! Configuration File Loading
//!
//! Handles loading and saving configuration files from various locations
//! with support for TOML and JSON and a fallback to defaults.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Base file name, without extension
const CONFIG_FILE_STEM: &str = "logs";

/// Configuration file loader
pub struct ConfigLoader {
    /// Directories searched for configuration files
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// Current configuration file path (if loaded)
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(ConfigFormat::Toml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to fall back to the default config if none exists
    pub create_default: bool,
    /// Whether to validate configuration after loading
    pub validate: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            create_default: true,
            validate: true,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load configuration with default options
    pub fn load() -> Result<Config> {
        Self::new().load_with_options(LoadOptions::default())
    }

    /// Load configuration from the search paths with custom options
    pub fn load_with_options(&mut self, options: LoadOptions) -> Result<Config> {
        if let Some((path, config)) = self.find_and_load_config()? {
            info!("Configuration loaded from {}", path.display());
            self.current_path = Some(path);
            if options.validate {
                config.validate()?;
            }
            return Ok(config);
        }

        if options.create_default {
            debug!("No configuration file found, using defaults");
            let config = Config::default();
            if options.validate {
                config.validate()?;
            }
            Ok(config)
        } else {
            Err(Error::ConfigNotFound)
        }
    }

    /// Load and validate a specific configuration file
    pub fn load_from_path(&mut self, path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "Configuration file does not exist".to_string(),
            });
        }
        let format = ConfigFormat::from_path(path).ok_or_else(|| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: "Unsupported configuration file extension".to_string(),
        })?;

        let config = self.load_config_file(path, format)?;
        config.validate()?;
        self.current_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to a specific path, format chosen by extension
    pub fn save_to_path(&self, config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::ConfigSaveFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let content = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => serde_json::to_string_pretty(config).map_err(|e| {
                Error::ConfigSerializationFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                }
            })?,
            _ => toml::to_string_pretty(config).map_err(|e| Error::ConfigSerializationFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            })?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for dir in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = self.get_config_path_for_format(dir, *format);

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            // Keep searching, a broken file should not hide a good one
                            warn!(
                                "Failed to load config from {}: {}",
                                config_path.display(),
                                e
                            );
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parsed = match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason,
        })
    }

    /// Get configuration file path for a specific format
    fn get_config_path_for_format(&self, dir: &Path, format: ConfigFormat) -> PathBuf {
        dir.join(CONFIG_FILE_STEM).with_extension(format.extension())
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(explicit) = env::var("TUTORDASH_CONFIG_DIR") {
            paths.push(PathBuf::from(explicit));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tutordash"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tutordash"));
        }

        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(".tutordash"));
        }

        paths
    }

    /// Get the current configuration file path
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
