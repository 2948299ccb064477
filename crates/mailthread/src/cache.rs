//! Per-view response cache
//!
//! Summaries and generated replies are cached per conversation view so that
//! reopening a panel does not re-query the backend. The cache is an explicit
//! object owned by the host; navigating to a different location drops every
//! entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use log::debug;

use crate::error::ExtractError;
use crate::view::Snapshot;

/// Key used when nothing identifies the current view
const DEFAULT_VIEW: &str = "default";

/// Attribute probes tried in order when identifying a view
const VIEW_ID_PROBES: &[(&str, &str)] = &[
    ("[data-thread-id]", "data-thread-id"),
    ("h2[data-legacy-thread-id]", "data-legacy-thread-id"),
    ("span[email]", "email"),
];

/// What a cached value is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Thread analysis / summary
    Summary,
    /// Generated reply
    AutoReply,
}

impl CacheKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            CacheKind::Summary => "summary_",
            CacheKind::AutoReply => "autoreply_",
        }
    }
}

/// Identifier of one conversation view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identify a view from its snapshot, falling back to its location and
    /// finally to a shared default key.
    pub fn resolve(snapshot: &Snapshot, location: Option<&str>) -> Result<Self, ExtractError> {
        for (selector, attr) in VIEW_ID_PROBES {
            if let Some(el) = snapshot.select_first(selector)?
                && let Some(value) = el.value().attr(attr)
                && !value.trim().is_empty()
            {
                return Ok(Self::new(value.trim()));
            }
        }

        match location.map(str::trim) {
            Some(location) if !location.is_empty() => Ok(Self::new(location)),
            _ => Ok(Self::new(DEFAULT_VIEW)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full cache key for a value of the given kind
    pub fn cache_key(&self, kind: CacheKind) -> String {
        format!("{}{}", kind.prefix(), self.0)
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Thread-safe cache of backend responses keyed by kind and view
///
/// Uses a HashMap protected by an RwLock, alongside the last observed
/// location used for navigation invalidation.
pub struct ThreadCache<V> {
    entries: RwLock<HashMap<String, V>>,
    location: RwLock<Option<String>>,
}

impl<V: Clone> ThreadCache<V> {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            location: RwLock::new(None),
        }
    }

    pub fn get(&self, kind: CacheKind, view: &ViewKey) -> Option<V> {
        let entries = self.entries.read().unwrap();
        entries.get(&view.cache_key(kind)).cloned()
    }

    /// Store a value, returning the one it replaced
    pub fn insert(&self, kind: CacheKind, view: &ViewKey, value: V) -> Option<V> {
        let mut entries = self.entries.write().unwrap();
        entries.insert(view.cache_key(kind), value)
    }

    pub fn remove(&self, kind: CacheKind, view: &ViewKey) -> Option<V> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&view.cache_key(kind))
    }

    pub fn contains(&self, kind: CacheKind, view: &ViewKey) -> bool {
        self.entries
            .read()
            .unwrap()
            .contains_key(&view.cache_key(kind))
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record the current location. A change from the previously observed
    /// location clears every entry; returns whether that happened.
    ///
    /// The first observation only records the location.
    pub fn observe_location(&self, location: &str) -> bool {
        let mut current = self.location.write().unwrap();
        let changed = matches!(current.as_deref(), Some(previous) if previous != location);

        if changed {
            let mut entries = self.entries.write().unwrap();
            debug!(
                "[CACHE] Location changed, dropping {} cached response(s)",
                entries.len()
            );
            entries.clear();
        }

        *current = Some(location.to_string());
        changed
    }
}

impl<V: Clone> Default for ThreadCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
