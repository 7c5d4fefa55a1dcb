use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The one persisted preference: the display theme.
pub trait PreferenceStore: Send + Sync {
    fn theme(&self) -> Theme;
    fn set_theme(&self, theme: Theme) -> Result<(), ConfigError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Stored {
    #[serde(default)]
    theme: Theme,
}

/// Stores the theme as `{"theme": "dark"}` in a JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn theme(&self) -> Theme {
        let Ok(txt) = fs::read_to_string(&self.path) else {
            return Theme::default();
        };
        match serde_json::from_str::<Stored>(&txt) {
            Ok(stored) => stored.theme,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "ignoring unreadable preferences");
                Theme::default()
            }
        }
    }

    fn set_theme(&self, theme: Theme) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&Stored { theme }).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}
