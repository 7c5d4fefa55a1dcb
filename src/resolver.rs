//! Asset discovery. A resolver lists the locators of one variant and hands
//! each one a loader; it never reads content while discovering.

use crate::error::{CatalogError, LoadError};
use crate::index::AssetLocator;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Discovers the locators of a variant. Must be idempotent.
pub trait AssetResolver: Send + Sync {
    fn discover(&self, variant_dir: &str) -> Result<Vec<AssetLocator>, CatalogError>;
}

/// Reads `<root>/<variant>/<category>/<name>.svg` from disk.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locator_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut parts = Vec::new();
        for c in rel.components() {
            if let Component::Normal(part) = c {
                parts.push(part.to_str()?);
            }
        }
        Some(parts.join("/"))
    }
}

impl AssetResolver for FsResolver {
    fn discover(&self, variant_dir: &str) -> Result<Vec<AssetLocator>, CatalogError> {
        let dir = self.root.join(variant_dir);
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "variant directory missing");
            return Ok(Vec::new());
        }

        let mut locators = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(CatalogError::Discover { root: dir, source });
                }
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("svg") {
                continue;
            }
            let Some(locator) = self.locator_path(entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
                continue;
            };

            let file = entry.into_path();
            let name = locator.clone();
            locators.push(AssetLocator::new(
                locator,
                Arc::new(move || {
                    fs::read_to_string(&file).map_err(|err| LoadError::Io {
                        locator: name.clone(),
                        message: err.to_string(),
                    })
                }),
            ));
        }
        Ok(locators)
    }
}

/// In-memory assets keyed by locator path.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    assets: Vec<(String, Arc<str>)>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, markup: impl Into<Arc<str>>) -> Self {
        self.insert(path, markup);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, markup: impl Into<Arc<str>>) {
        self.assets.push((path.into(), markup.into()));
    }
}

impl AssetResolver for MemoryResolver {
    fn discover(&self, variant_dir: &str) -> Result<Vec<AssetLocator>, CatalogError> {
        let prefix = format!("{variant_dir}/");
        Ok(self
            .assets
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, markup)| {
                let markup = Arc::clone(markup);
                AssetLocator::new(path.clone(), Arc::new(move || Ok(markup.to_string())))
            })
            .collect())
    }
}
