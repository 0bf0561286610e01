//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application base directory (default: current directory).
    pub base_dir: PathBuf,

    /// Optional override for the plugins directory. Relative values are
    /// resolved against `base_dir`; absolute values pass through unchanged.
    pub plugins_directory: Option<PathBuf>,

    /// Installed plugin names, in configured order.
    pub plugins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_dir = env::var("BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let plugins_directory = env::var("PLUGINS_DIR").ok().map(PathBuf::from);

        let plugins = env::var("PLUGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            base_dir,
            plugins_directory,
            plugins,
        })
    }

    /// Directory that holds one subdirectory per installed plugin.
    ///
    /// A configured `plugins_directory` wins; a relative value is resolved
    /// against the base directory. Without an override this is
    /// `<base_dir>/plugins`.
    pub fn plugin_base_dir(&self) -> PathBuf {
        match &self.plugins_directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.join("plugins"),
        }
    }
}
