//! Configuration system for pyprobe.
//!
//! Loads config from:
//! 1. Global: ~/.config/pyprobe/config.toml
//! 2. Per-project: .pyprobe/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [serve]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [export]
//! default_format = "pytest"
//! ```

use pyprobe_analyze::export::DEFAULT_FORMAT;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServeConfig {
    /// Address to bind. Default: 127.0.0.1
    pub host: Option<String>,
    /// Port to listen on. Default: 5000
    pub port: Option<u16>,
}

impl ServeConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
        }
    }
}

/// Test export configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when a request names none. Default: pytest
    pub default_format: Option<String>,
}

impl ExportConfig {
    pub fn default_format(&self) -> &str {
        self.default_format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            default_format: other.default_format.or(self.default_format),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PyprobeConfig {
    pub serve: ServeConfig,
    pub export: ExportConfig,
}

impl PyprobeConfig {
    /// Load configuration for a working directory.
    ///
    /// Loads global config from ~/.config/pyprobe/config.toml,
    /// then merges with per-project config from .pyprobe/config.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path()
            && let Some(global) = Self::load_file(&global_path)
        {
            config = config.merge(global);
        }

        let project_path = root.join(".pyprobe").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("pyprobe").join("config.toml"))
    }

    /// Load config from a file path. Unreadable files are skipped silently,
    /// malformed ones with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(path = %path.display(), "ignoring invalid config: {err}");
                None
            }
        }
    }

    /// Values set in `other` take precedence.
    fn merge(self, other: Self) -> Self {
        Self {
            serve: self.serve.merge(other.serve),
            export: self.export.merge(other.export),
        }
    }
}
