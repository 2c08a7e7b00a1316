use glicemia_core::DEFAULT_SHARE_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// How links are placed on the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    /// Platform copy command (pbcopy, wl-copy, xclip, xsel, clip)
    #[default]
    Auto,
    /// OSC 52 terminal escape sequence
    Osc52,
}

impl std::fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardBackend::Auto => write!(f, "auto"),
            ClipboardBackend::Osc52 => write!(f, "osc52"),
        }
    }
}

impl FromStr for ClipboardBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ClipboardBackend::Auto),
            "osc52" => Ok(ClipboardBackend::Osc52),
            _ => Err(format!(
                "Invalid clipboard backend '{}'. Valid options: auto, osc52",
                s
            )),
        }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the persisted records
    pub data_dir: ConfigValue<PathBuf>,
    /// Base URL for generated share links
    pub share_base_url: ConfigValue<String>,
    /// Clipboard backend
    pub clipboard: ConfigValue<ClipboardBackend>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    share_base_url: Option<String>,
    clipboard: Option<ClipboardBackend>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut share_base_url =
            ConfigValue::new(DEFAULT_SHARE_BASE_URL.to_string(), ConfigSource::Default);
        let mut clipboard = ConfigValue::new(ClipboardBackend::default(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(url) = file_config.share_base_url {
                share_base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(backend) = file_config.clipboard {
                clipboard = ConfigValue::new(backend, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("GLIC_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("GLIC_SHARE_URL") {
            share_base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(backend) = std::env::var("GLIC_CLIPBOARD") {
            match backend.parse() {
                Ok(backend) => clipboard = ConfigValue::new(backend, ConfigSource::Environment),
                Err(e) => tracing::warn!("Ignoring GLIC_CLIPBOARD: {}", e),
            }
        }

        Ok(Self {
            data_dir,
            share_base_url,
            clipboard,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/glicemia/
    /// - macOS: ~/Library/Application Support/glicemia/
    /// - Windows: %APPDATA%/glicemia/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glicemia")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/glicemia/
    /// - macOS: ~/Library/Application Support/glicemia/
    /// - Windows: %APPDATA%/glicemia/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glicemia")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
