//! Browsing state. A [`Library`] holds every variant's slice, indexed once;
//! a [`Browser`] is the content cache of one variant over that slice. The
//! search text is never stored: callers pass it with each request.

use crate::cache::{ContentCache, EntryState, LoadTicket};
use crate::codegen::{is_canonical, to_component_source, ExportFormat};
use crate::error::{CatalogError, IndexIntegrityWarning, LoadError};
use crate::index::build;
use crate::naming::sanitize_identifier;
use crate::resolver::AssetResolver;
use crate::search;
use crate::variant::{Variant, VARIANTS};
use crate::{CategoryMap, IconAsset};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// A payload ready for the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    pub format: ExportFormat,
    pub payload: String,
    /// The markup did not have the canonical root element, so the component
    /// source is only partially transformed.
    pub shape_mismatch: bool,
}

/// Every variant's slice, keyed by slug.
#[derive(Debug, Default)]
pub struct Library {
    slices: IndexMap<&'static str, Arc<CategoryMap>>,
    warnings: Vec<IndexIntegrityWarning>,
}

impl Library {
    pub fn index(resolver: &dyn AssetResolver) -> Result<Self, CatalogError> {
        let mut library = Self::default();
        for variant in VARIANTS {
            let outcome = build(resolver.discover(variant.directory)?, variant.directory);
            library.warnings.extend(outcome.warnings);
            library.slices.insert(variant.slug, Arc::new(outcome.categories));
        }
        Ok(library)
    }

    /// Empty when the variant has no assets.
    pub fn slice(&self, variant: &Variant) -> Arc<CategoryMap> {
        self.slices.get(variant.slug).cloned().unwrap_or_default()
    }

    pub fn icon_count(&self, variant: &Variant) -> usize {
        self.slices
            .get(variant.slug)
            .map_or(0, |categories| categories.values().map(|names| names.len()).sum())
    }

    pub fn warnings(&self) -> &[IndexIntegrityWarning] {
        &self.warnings
    }
}

pub struct Browser {
    variant: &'static Variant,
    categories: Arc<CategoryMap>,
    cache: ContentCache,
}

impl Browser {
    pub fn new(library: &Library, variant: &'static Variant) -> Self {
        Self {
            variant,
            categories: library.slice(variant),
            cache: ContentCache::new(variant.directory),
        }
    }

    pub fn variant(&self) -> &'static Variant {
        self.variant
    }

    /// The slice narrowed to `query`.
    pub fn visible(&self, query: &str) -> CategoryMap {
        search::filter(&self.categories, query)
    }

    pub fn reveal(&mut self, category: &str, name: &str) -> Result<Option<LoadTicket>, CatalogError> {
        let asset = lookup(&self.categories, self.variant, category, name)?;
        Ok(self.cache.reveal(asset))
    }

    pub fn complete(&mut self, ticket: LoadTicket, result: Result<String, LoadError>) -> bool {
        self.cache.complete(ticket, result)
    }

    pub fn state(&self, category: &str, name: &str) -> &EntryState {
        self.cache.state(category, name)
    }

    /// The icon left the view. Its next reveal loads again.
    pub fn unmount(&mut self, category: &str, name: &str) -> bool {
        self.cache.unmount(category, name)
    }

    /// Re-mount every failed entry so the next reveal retries it.
    pub fn remount_failed(&mut self) -> usize {
        self.cache.clear_failed()
    }

    /// Loaded markup, loading inline on first use.
    pub fn content(&mut self, category: &str, name: &str) -> Result<Arc<str>, CatalogError> {
        let asset = lookup(&self.categories, self.variant, category, name)?;
        match self.cache.ensure_loaded(asset) {
            EntryState::Loaded(markup) => Ok(Arc::clone(markup)),
            EntryState::Failed(err) => Err(err.clone().into()),
            EntryState::Unrequested | EntryState::Requested => Err(CatalogError::Pending {
                category: category.to_string(),
                name: name.to_string(),
            }),
        }
    }

    pub fn export(&mut self, category: &str, name: &str, format: ExportFormat) -> Result<Export, CatalogError> {
        let markup = self.content(category, name)?;
        let export = match format {
            ExportFormat::Markup => Export {
                format,
                payload: markup.to_string(),
                shape_mismatch: false,
            },
            ExportFormat::Component => {
                let canonical = is_canonical(&markup);
                if !canonical {
                    tracing::warn!(category, name, "markup has no canonical root element");
                }
                Export {
                    format,
                    payload: to_component_source(&markup, &sanitize_identifier(name), self.variant.label),
                    shape_mismatch: !canonical,
                }
            }
        };
        Ok(export)
    }
}

fn lookup<'a>(
    categories: &'a CategoryMap,
    variant: &Variant,
    category: &str,
    name: &str,
) -> Result<&'a IconAsset, CatalogError> {
    categories
        .get(category)
        .and_then(|names| names.get(name))
        .ok_or_else(|| CatalogError::UnknownIcon {
            variant: variant.slug.to_string(),
            category: category.to_string(),
            name: name.to_string(),
        })
}
