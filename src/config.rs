use crate::error::ConfigError;
use crate::variant::DEFAULT_SLUG;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "ICON_CATALOG_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<variant>/<category>/<name>.svg`.
    pub asset_root: PathBuf,
    pub bind: String,
    /// Slug of the variant shown first.
    pub default_variant: String,
    pub preferences_path: PathBuf,
    /// Extra files served under `/static`.
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("icons/svg"),
            bind: "127.0.0.1:3000".to_string(),
            default_variant: DEFAULT_SLUG.to_string(),
            preferences_path: PathBuf::from(".icon-catalog/preferences.json"),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let txt = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the file named by [`CONFIG_ENV`], or fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
