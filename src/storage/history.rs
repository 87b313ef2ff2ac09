// SPDX-License-Identifier: MPL-2.0
//! Recently-viewed image history, newest first, bounded and persisted.

use super::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Storage key for the history list.
pub const HISTORY_KEY: &str = "history";

/// Maximum number of retained entries.
pub const HISTORY_CAP: usize = 100;

/// One opened image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub name: String,
    /// Epoch milliseconds at the moment the image was opened.
    pub timestamp_ms: i64,
}

/// In-memory history list mirrored to the key-value store after each append.
#[derive(Debug, Clone, Default)]
pub struct ViewHistory {
    entries: Vec<HistoryEntry>,
}

impl ViewHistory {
    /// Loads the persisted history, or an empty list if nothing (readable)
    /// is stored.
    #[must_use]
    pub fn load(store: &KeyValueStore) -> Self {
        Self {
            entries: store.get(HISTORY_KEY, Vec::new()),
        }
    }

    /// Records an opened image at the front of the list, truncates to
    /// [`HISTORY_CAP`], and persists the new list.
    ///
    /// A storage failure is non-fatal: the in-memory list is updated either
    /// way so the History tab stays correct for this session.
    pub fn record(&mut self, store: &KeyValueStore, url: &str, name: &str) {
        self.record_at(store, url, name, chrono::Utc::now().timestamp_millis());
    }

    /// [`record`](Self::record) with an explicit timestamp (tests).
    pub fn record_at(&mut self, store: &KeyValueStore, url: &str, name: &str, timestamp_ms: i64) {
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                name: name.to_string(),
                timestamp_ms,
            },
        );
        self.entries.truncate(HISTORY_CAP);
        store.set(HISTORY_KEY, &self.entries);
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, KeyValueStore) {
        let dir = tempdir().expect("create temp dir");
        let store = KeyValueStore::with_base_dir(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn record_prepends_newest_first() {
        let (_dir, store) = store();
        let mut history = ViewHistory::default();
        history.record_at(&store, "https://example.com/a.png", "a", 1);
        history.record_at(&store, "https://example.com/b.png", "b", 2);

        assert_eq!(history.entries()[0].name, "b");
        assert_eq!(history.entries()[1].name, "a");
    }

    #[test]
    fn history_is_capped_at_one_hundred() {
        let (_dir, store) = store();
        let mut history = ViewHistory::default();
        for i in 0..150 {
            history.record_at(&store, &format!("https://example.com/{i}.png"), "m", i);
        }

        assert_eq!(history.len(), HISTORY_CAP);
        // Newest (149) survives, the oldest fifty were dropped.
        assert_eq!(history.entries()[0].timestamp_ms, 149);
        assert_eq!(history.entries()[HISTORY_CAP - 1].timestamp_ms, 50);
    }

    #[test]
    fn history_persists_across_loads() {
        let (_dir, store) = store();
        let mut history = ViewHistory::default();
        history.record_at(&store, "https://example.com/a.png", "a", 10);

        let reloaded = ViewHistory::load(&store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].url, "https://example.com/a.png");
    }

    #[test]
    fn load_with_empty_store_is_empty() {
        let (_dir, store) = store();
        let history = ViewHistory::load(&store);
        assert!(history.is_empty());
    }
}
