use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub pages: PagesConfig,
}

/// Where the site generator reads from and writes to.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub static_dir: PathBuf,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PagesConfig {
    /// File extension given to rendered pages.
    pub extension: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
        }
    }
}

impl Config {
    /// The configuration bundled with the binary. `build.rs` checks its shape.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("default_config.toml is checked by build.rs")
    }

    /// Load config from a TOML file. A missing file is `Ok(None)`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    /// Load config from a TOML file, falling back to the compiled defaults if it is absent.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_else(Self::compiled_default))
    }
}
