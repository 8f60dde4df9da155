//! Configuration loading from `.mdphpfix.toml`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

/// Top-level configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// The main configuration section for mdphpfix.
    #[serde(default)]
    pub mdphpfix: MdphpfixConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` when defaults are in effect.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

/// Configuration options for mdphpfix.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct MdphpfixConfig {
    /// Documentation tree to scan when no path is given on the command line.
    pub docs_dir: Option<String>,
    /// List of folders to exclude while walking.
    pub exclude_folders: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration from the current directory or its ancestors.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// A missing or unparsable file falls back to the defaults rather than
    /// failing the run.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let config_toml = current.join(CONFIG_FILENAME);
            if config_toml.exists() {
                if let Ok(content) = fs::read_to_string(&config_toml) {
                    if let Ok(mut config) = toml::from_str::<Self>(&content) {
                        config.config_file_path = Some(config_toml);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Self::default()
    }
}
