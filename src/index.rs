//! Catalog index building.
//!
//! Locators are grouped by variant, category and name without touching
//! their content. Loading is left to [`crate::cache`].

use crate::error::{IndexIntegrityWarning, IntegrityIssue};
use crate::{CategoryMap, IconAsset, Loader};
use indexmap::map::Entry;
use std::fmt;

const ASSET_EXTENSION: &str = ".svg";

/// Where an icon lives (`variant/category/name.svg`) plus its deferred loader.
#[derive(Clone)]
pub struct AssetLocator {
    pub path: String,
    loader: Loader,
}

impl fmt::Debug for AssetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetLocator").field(&self.path).finish()
    }
}

/// The (variant, category, name) triple encoded by a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorParts<'a> {
    pub variant: &'a str,
    pub category: &'a str,
    pub name: &'a str,
}

impl AssetLocator {
    pub fn new(path: impl Into<String>, loader: Loader) -> Self {
        Self { path: path.into(), loader }
    }

    pub fn parse(&self) -> Result<LocatorParts<'_>, IndexIntegrityWarning> {
        let warn = |issue| IndexIntegrityWarning { locator: self.path.clone(), issue };

        let segments: Vec<&str> = self.path.split('/').collect();
        let &[variant, category, file] = segments.as_slice() else {
            return Err(warn(IntegrityIssue::SegmentCount(segments.len())));
        };
        if variant.is_empty() || category.is_empty() || file.is_empty() {
            return Err(warn(IntegrityIssue::EmptySegment));
        }
        match file.strip_suffix(ASSET_EXTENSION) {
            Some(name) if !name.is_empty() => Ok(LocatorParts { variant, category, name }),
            _ => Err(warn(IntegrityIssue::NotAnAsset)),
        }
    }

    fn into_asset(self, parts: &LocatorParts<'_>) -> IconAsset {
        IconAsset::new(
            parts.variant.to_string(),
            parts.category.to_string(),
            parts.name.to_string(),
            self.path.clone(),
            self.loader,
        )
    }
}

/// One variant's slice of the catalog and everything dropped on the way.
#[derive(Debug, Default)]
pub struct IndexOutcome {
    pub categories: CategoryMap,
    pub warnings: Vec<IndexIntegrityWarning>,
}

/// Index the locators belonging to `variant` (an asset directory name).
pub fn build<I>(locators: I, variant: &str) -> IndexOutcome
where
    I: IntoIterator<Item = AssetLocator>,
{
    let mut outcome = IndexOutcome::default();

    for locator in locators {
        let parts = match locator.parse() {
            Ok(parts) => parts,
            Err(warning) => {
                tracing::warn!(%warning, "dropping locator");
                outcome.warnings.push(warning);
                continue;
            }
        };
        if parts.variant != variant {
            continue;
        }
        insert(&mut outcome.categories, &mut outcome.warnings, &locator, &parts);
    }

    tracing::debug!(
        variant,
        categories = outcome.categories.len(),
        dropped = outcome.warnings.len(),
        "indexed variant"
    );
    outcome
}

fn insert(
    categories: &mut CategoryMap,
    warnings: &mut Vec<IndexIntegrityWarning>,
    locator: &AssetLocator,
    parts: &LocatorParts<'_>,
) {
    let names = categories.entry(parts.category.to_string()).or_default();
    match names.entry(parts.name.to_string()) {
        Entry::Occupied(_) => {
            let warning = IndexIntegrityWarning {
                locator: locator.path.clone(),
                issue: IntegrityIssue::DuplicateName,
            };
            tracing::warn!(%warning, "dropping locator");
            warnings.push(warning);
        }
        Entry::Vacant(slot) => {
            slot.insert(locator.clone().into_asset(parts));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(path: &str, calls: &Arc<AtomicUsize>) -> AssetLocator {
        let calls = Arc::clone(calls);
        let body = path.to_string();
        AssetLocator::new(
            path,
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(body.clone())
            }),
        )
    }

    #[test]
    fn build_preserves_order_and_never_loads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let locators = vec![
            counting("Outline/Weather/Sun.svg", &calls),
            counting("Outline/Weather/Moon.svg", &calls),
            counting("Bold/Weather/Sun.svg", &calls),
            counting("Outline/Devices/Laptop.svg", &calls),
        ];

        let outcome = build(locators, "Outline");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(outcome.warnings.is_empty());
        let categories: Vec<_> = outcome.categories.keys().cloned().collect();
        assert_eq!(categories, ["Weather", "Devices"]);
        let names: Vec<_> = outcome.categories["Weather"].keys().cloned().collect();
        assert_eq!(names, ["Sun", "Moon"]);

        let moon = &outcome.categories["Weather"]["Moon"];
        assert_eq!(moon.load().as_deref(), Ok("Outline/Weather/Moon.svg"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn malformed_locators_are_dropped_with_warnings() {
        let calls = Arc::new(AtomicUsize::new(0));
        let locators = vec![
            counting("Outline/Sun.svg", &calls),
            counting("Outline/Weather/Deep/Sun.svg", &calls),
            counting("Outline//Sun.svg", &calls),
            counting("Outline/Weather/readme.txt", &calls),
            counting("Outline/Weather/.svg", &calls),
            counting("Outline/Weather/Cloud.svg", &calls),
        ];

        let outcome = build(locators, "Outline");

        let issues: Vec<_> = outcome.warnings.iter().map(|w| w.issue.clone()).collect();
        assert_eq!(
            issues,
            [
                IntegrityIssue::SegmentCount(2),
                IntegrityIssue::SegmentCount(4),
                IntegrityIssue::EmptySegment,
                IntegrityIssue::NotAnAsset,
                IntegrityIssue::NotAnAsset,
            ]
        );
        assert_eq!(outcome.categories["Weather"].len(), 1);
    }

    #[test]
    fn duplicate_names_keep_first_seen() {
        let first: Loader = Arc::new(|| Ok("first".to_string()));
        let second: Loader = Arc::new(|| Ok("second".to_string()));
        let outcome = build(
            vec![
                AssetLocator::new("Bold/Weather/Sun.svg", first),
                AssetLocator::new("Bold/Weather/Sun.svg", second),
            ],
            "Bold",
        );

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].issue, IntegrityIssue::DuplicateName);
        assert_eq!(outcome.categories["Weather"]["Sun"].load().as_deref(), Ok("first"));
    }
}
