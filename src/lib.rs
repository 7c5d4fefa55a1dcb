use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub use error::{CatalogError, ConfigError, IndexIntegrityWarning, IntegrityIssue, LoadError};

/// Deferred content accessor. Calling it twice must yield equal content.
pub type Loader = Arc<dyn Fn() -> Result<String, LoadError> + Send + Sync>;

/// name → asset, in first-seen order.
pub type NameMap = IndexMap<String, IconAsset>;
/// category → names, in first-seen order.
pub type CategoryMap = IndexMap<String, NameMap>;

#[derive(Clone)]
pub struct IconAsset {
    pub variant: String,
    pub category: String,
    pub name: String,
    pub locator: String,
    load: Loader,
}

impl IconAsset {
    pub fn new(variant: String, category: String, name: String, locator: String, load: Loader) -> Self {
        Self { variant, category, name, locator, load }
    }

    /// Invoke the deferred accessor. Callers are expected to cache the result.
    pub fn load(&self) -> Result<String, LoadError> {
        (self.load)()
    }

    pub(crate) fn loader(&self) -> Loader {
        Arc::clone(&self.load)
    }
}

impl fmt::Debug for IconAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconAsset")
            .field("variant", &self.variant)
            .field("category", &self.category)
            .field("name", &self.name)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

pub mod browser;
pub mod cache;
pub mod codegen;
pub mod config;
pub mod error;
pub mod index;
pub mod naming;
pub mod preferences;
pub mod resolver;
pub mod search;
pub mod server;
pub mod variant;

pub use browser::{Browser, Export, Library};
pub use cache::{ContentCache, EntryState, LoadTicket};
pub use codegen::{is_canonical, to_component_source, ExportFormat};
pub use index::{build, AssetLocator, IndexOutcome};
pub use resolver::{AssetResolver, FsResolver, MemoryResolver};
pub use variant::Variant;
