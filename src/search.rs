//! Free-text icon search.
//!
//! A name matches when its display key contains the normalized query, or
//! when the raw identifier contains the query with its spaces removed (so
//! a typed `wifi` still finds `Wi Fi`).

use crate::naming::{normalize, title_case};
use crate::{CategoryMap, NameMap};

/// A query prepared once and checked against many names.
#[derive(Debug, Clone)]
pub struct Query {
    normalized: String,
    compact: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let compact = normalized.replace(' ', "");
        Self { normalized, compact }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        normalize(&title_case(name)).contains(&self.normalized)
            || name.to_lowercase().contains(&self.compact)
    }
}

pub fn matches(name: &str, query: &str) -> bool {
    Query::new(query).matches(name)
}

/// Keep only the matching names. Every input category is kept, even when
/// nothing in it matches.
pub fn filter(categories: &CategoryMap, query: &str) -> CategoryMap {
    let query = Query::new(query);
    categories
        .iter()
        .map(|(category, names)| {
            let kept: NameMap = names
                .iter()
                .filter(|(name, _)| query.matches(name))
                .map(|(name, asset)| (name.clone(), asset.clone()))
                .collect();
            (category.clone(), kept)
        })
        .collect()
}
