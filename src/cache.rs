//! Visibility-gated content cache.
//!
//! Each entry moves `Unrequested → Requested → Loaded | Failed` and never
//! back while mounted. The first reveal hands out a [`LoadTicket`]; later
//! reveals get nothing, so at most one load is in flight per entry. Loads
//! can run anywhere (inline, a blocking pool) and report back through
//! [`ContentCache::complete`], which drops results whose entry has since
//! been unmounted or that belong to another variant's cache.

use crate::error::LoadError;
use crate::{IconAsset, Loader};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const COLOR_KEYWORD: &str = "black";
const CURRENT_COLOR: &str = "currentColor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Unrequested,
    Requested,
    Loaded(Arc<str>),
    Failed(LoadError),
}

static UNREQUESTED: EntryState = EntryState::Unrequested;

#[derive(Debug)]
struct RenderCacheEntry {
    token: u64,
    state: EntryState,
}

type EntryKey = (String, String);

/// Permission to run one load. Hand it back to [`ContentCache::complete`].
pub struct LoadTicket {
    key: EntryKey,
    variant: String,
    token: u64,
    loader: Loader,
}

impl LoadTicket {
    pub fn run(&self) -> Result<String, LoadError> {
        (self.loader)()
    }
}

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTicket")
            .field("variant", &self.variant)
            .field("category", &self.key.0)
            .field("name", &self.key.1)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Loaded content for the mounted entries of one variant.
#[derive(Debug)]
pub struct ContentCache {
    variant: String,
    entries: HashMap<EntryKey, RenderCacheEntry>,
    next_token: u64,
}

impl ContentCache {
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            entries: HashMap::new(),
            next_token: 0,
        }
    }

    pub fn state(&self, category: &str, name: &str) -> &EntryState {
        self.entries
            .get(&(category.to_string(), name.to_string()))
            .map_or(&UNREQUESTED, |entry| &entry.state)
    }

    /// The entry became visible (or a consumer asked for its content).
    /// Returns a ticket only on the first reveal of a mounted entry.
    pub fn reveal(&mut self, asset: &IconAsset) -> Option<LoadTicket> {
        if asset.variant != self.variant {
            tracing::debug!(
                asset = %asset.locator,
                cache = %self.variant,
                "ignoring reveal from another variant"
            );
            return None;
        }

        let key = (asset.category.clone(), asset.name.clone());
        let token = match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => return None,
            Entry::Vacant(slot) => {
                let token = self.next_token;
                self.next_token += 1;
                slot.insert(RenderCacheEntry { token, state: EntryState::Requested });
                token
            }
        };

        tracing::debug!(asset = %asset.locator, token, "requesting load");
        Some(LoadTicket {
            key,
            variant: self.variant.clone(),
            token,
            loader: asset.loader(),
        })
    }

    /// Record the outcome of a ticket. Returns `false` when the write was
    /// discarded because the entry is gone or was remounted.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<String, LoadError>) -> bool {
        if ticket.variant != self.variant {
            tracing::debug!(?ticket, "discarding load for another variant");
            return false;
        }
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(?ticket, "discarding load for unmounted entry");
            return false;
        };
        if entry.token != ticket.token || entry.state != EntryState::Requested {
            tracing::debug!(?ticket, "discarding stale load");
            return false;
        }

        entry.state = match result {
            Ok(markup) => EntryState::Loaded(recolor(&markup).into()),
            Err(err) => {
                tracing::warn!(%err, "icon load failed");
                EntryState::Failed(err)
            }
        };
        true
    }

    /// Reveal and load inline.
    pub fn ensure_loaded(&mut self, asset: &IconAsset) -> &EntryState {
        if let Some(ticket) = self.reveal(asset) {
            let result = ticket.run();
            self.complete(ticket, result);
        }
        self.state(&asset.category, &asset.name)
    }

    /// Drop an entry. The next reveal starts over, which is also how a
    /// failed load gets retried.
    pub fn unmount(&mut self, category: &str, name: &str) -> bool {
        self.entries
            .remove(&(category.to_string(), name.to_string()))
            .is_some()
    }

    /// Drop every failed entry, as a reload of the page does. Loaded and
    /// in-flight entries are untouched.
    pub fn clear_failed(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !matches!(entry.state, EntryState::Failed(_)));
        let cleared = before - self.entries.len();
        if cleared > 0 {
            tracing::debug!(variant = %self.variant, cleared, "remounting failed entries");
        }
        cleared
    }
}

/// Swap the hard-coded colour keyword for the current text colour.
pub fn recolor(markup: &str) -> String {
    markup.replace(COLOR_KEYWORD, CURRENT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn asset(variant: &str, name: &str, calls: &Arc<AtomicUsize>) -> IconAsset {
        let calls = Arc::clone(calls);
        IconAsset::new(
            variant.to_string(),
            "Weather".to_string(),
            name.to_string(),
            format!("{variant}/Weather/{name}.svg"),
            Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(r#"<path stroke="black"/>"#.to_string())
            }),
        )
    }

    #[test]
    fn repeated_reveals_issue_one_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sun = asset("Bold", "Sun", &calls);
        let mut cache = ContentCache::new("Bold");

        let first = cache.reveal(&sun);
        let second = cache.reveal(&sun);
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(cache.state("Weather", "Sun"), &EntryState::Requested);

        let ticket = first.unwrap();
        let result = ticket.run();
        assert!(cache.complete(ticket, result));
        assert!(cache.reveal(&sun).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn loaded_content_is_recolored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cache = ContentCache::new("Bold");
        let state = cache.ensure_loaded(&asset("Bold", "Sun", &calls)).clone();
        assert_eq!(state, EntryState::Loaded(r#"<path stroke="currentColor"/>"#.into()));
    }

    #[test]
    fn unmount_before_completion_discards_the_write() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sun = asset("Bold", "Sun", &calls);
        let mut cache = ContentCache::new("Bold");

        let stale = cache.reveal(&sun).unwrap();
        assert!(cache.unmount("Weather", "Sun"));
        let fresh = cache.reveal(&sun).unwrap();

        assert!(!cache.complete(stale, Ok("old".to_string())));
        assert_eq!(cache.state("Weather", "Sun"), &EntryState::Requested);
        assert!(cache.complete(fresh, Ok("new".to_string())));
        assert_eq!(cache.state("Weather", "Sun"), &EntryState::Loaded("new".into()));
    }

    #[test]
    fn reveal_from_another_variant_is_ignored() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cache = ContentCache::new("Bold");

        assert!(cache.reveal(&asset("Linear", "Sun", &calls)).is_none());
        assert_eq!(cache.state("Weather", "Sun"), &EntryState::Unrequested);
        assert!(matches!(cache.ensure_loaded(&asset("Bold", "Sun", &calls)), EntryState::Loaded(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ticket_from_another_cache_is_discarded() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut linear = ContentCache::new("Linear");
        let mut bold = ContentCache::new("Bold");

        let ticket = linear.reveal(&asset("Linear", "Sun", &calls)).unwrap();
        bold.reveal(&asset("Bold", "Sun", &calls)).unwrap();
        assert!(!bold.complete(ticket, Ok("late".to_string())));
        assert_eq!(bold.state("Weather", "Sun"), &EntryState::Requested);
    }

    #[test]
    fn failures_stick_until_remount() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let broken = IconAsset::new(
            "Bold".to_string(),
            "Weather".to_string(),
            "Storm".to_string(),
            "Bold/Weather/Storm.svg".to_string(),
            Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(LoadError::Io {
                    locator: "Bold/Weather/Storm.svg".to_string(),
                    message: "gone".to_string(),
                })
            }),
        );
        let mut cache = ContentCache::new("Bold");

        assert!(matches!(cache.ensure_loaded(&broken), EntryState::Failed(_)));
        assert!(matches!(cache.ensure_loaded(&broken), EntryState::Failed(_)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);

        cache.unmount("Weather", "Storm");
        cache.ensure_loaded(&broken);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_failed_keeps_loaded_and_in_flight_entries() {
        let calls = Arc::new(AtomicUsize::new(0));
        let broken = IconAsset::new(
            "Bold".to_string(),
            "Weather".to_string(),
            "Storm".to_string(),
            "Bold/Weather/Storm.svg".to_string(),
            Arc::new(|| {
                Err(LoadError::Malformed {
                    locator: "Bold/Weather/Storm.svg".to_string(),
                    reason: "empty".to_string(),
                })
            }),
        );
        let mut cache = ContentCache::new("Bold");
        cache.ensure_loaded(&asset("Bold", "Sun", &calls));
        let in_flight = cache.reveal(&asset("Bold", "Moon", &calls)).unwrap();
        cache.ensure_loaded(&broken);

        assert_eq!(cache.clear_failed(), 1);
        assert_eq!(cache.clear_failed(), 0);
        assert_eq!(cache.state("Weather", "Storm"), &EntryState::Unrequested);
        assert!(matches!(cache.state("Weather", "Sun"), EntryState::Loaded(_)));
        assert!(cache.complete(in_flight, Ok("moon".to_string())));
    }
}
