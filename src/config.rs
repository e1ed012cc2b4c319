//! Configuration Module - User preferences from ~/.dprobe/config.toml
//!
//! Supports:
//! - Probe read policy (sample size, whole-file retry)
//! - Scan defaults (workers, hidden files, depth, extensions)
//! - Output preferences

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::probe::{Prober, DEFAULT_SAMPLE_SIZE};

/// Diamond Probe Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Probe settings
    pub probe: ProbeConfig,
    /// Scan settings
    pub scan: ScanConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Bytes read before the first identification attempt
    pub sample_size: usize,
    /// Map the whole file when the sample is not recognised
    pub full_read_on_miss: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            full_read_on_miss: true,
        }
    }
}

impl ProbeConfig {
    pub fn prober(&self) -> Prober {
        Prober::new(self.sample_size.max(1), self.full_read_on_miss)
    }
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of parallel workers (0 = auto)
    pub workers: usize,
    /// Skip hidden files by default
    pub skip_hidden: bool,
    /// Max depth (0 = unlimited)
    pub max_depth: usize,
    /// Default file extensions to filter (empty = all)
    pub default_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 0, // auto-detect
            skip_hidden: true,
            max_depth: 0,
            default_extensions: Vec::new(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default format: human or json
    pub format: String,
    /// Colorize human output
    pub color: bool,
    /// Show leading bytes in hex
    pub show_magic: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            show_magic: false,
        }
    }
}

impl Config {
    /// Load config from the default path, or defaults when there is none
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_path())
    }

    /// Load config from `path`; a missing file yields the defaults, a
    /// malformed one is an error
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "tunclon", "diamond-probe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".dprobe")
                    .join("config.toml")
            })
    }

    /// Write the commented sample config to `path` unless a file is already there.
    /// Returns true when a new file was written.
    pub fn ensure_exists(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, generate_sample_config())
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        tracing::info!("Created default config at {}", path.display());
        Ok(true)
    }

    /// Scan depth as walkdir expects it
    pub fn max_depth(&self) -> Option<usize> {
        match self.scan.max_depth {
            0 => None,
            depth => Some(depth),
        }
    }

    /// Extension filter as the scanner expects it
    pub fn extensions(&self) -> Option<Vec<String>> {
        if self.scan.default_extensions.is_empty() {
            None
        } else {
            Some(self.scan.default_extensions.clone())
        }
    }
}

/// Generate a sample config file with comments
pub fn generate_sample_config() -> String {
    r#"# Diamond Probe Configuration
# Location: ~/.dprobe/config.toml (or %APPDATA%\diamond-probe\config.toml on Windows)

[general]
# Log level: trace, debug, info, warn, error
# RUST_LOG overrides this when set
log_level = "info"

[probe]
# Bytes read before the first identification attempt
sample_size = 500000

# Map the whole file when the sample is not recognised.
# Needed for OOXML, APK and some PowerPoint files whose markers sit
# further into the file.
full_read_on_miss = true

[scan]
# Number of parallel workers (0 = auto-detect CPU count)
workers = 0

# Skip hidden files and directories
skip_hidden = true

# Maximum scan depth (0 = unlimited)
max_depth = 0

# Default file extensions filter (empty = all files)
# Example: ["jpg", "png", "pdf", "doc"]
default_extensions = []

[output]
# Output format: "human" or "json"
format = "human"

# Colorize human output
color = true

# Show the first 16 bytes of each file in hex
show_magic = false
"#
    .to_string()
}
