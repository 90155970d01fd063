//! Saved palette entries behind an injected key-value store.
//!
//! The list is small (at most [`MAX_FAVORITES`]) and stored as one JSON
//! string under [`FAVORITES_KEY`]. Storage is abstracted as
//! [`KeyValueStore`] so the same logic runs over an in-memory map in tests
//! and a JSON file on disk in the CLI.
//!
//! A stored value that no longer parses is logged and treated as an empty
//! list. Losing five swatches is preferable to refusing to start.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use swatch_color::Rgb;
use thiserror::Error;
use tracing::{debug, warn};

use crate::theme::PaletteEntry;

/// Key the favorites list is stored under.
pub const FAVORITES_KEY: &str = "swatch.favorites";

/// Maximum number of saved entries.
pub const MAX_FAVORITES: usize = 5;

/// A failure of the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store file {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

// ─── Stores ──────────────────────────────────────────────────────────────────

/// String key-value persistence.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Backend failures only; a missing key is not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Backend failures.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile store backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store persisted as a single JSON object file (`{"key": "value", ...}`).
///
/// The file is read on every `get` and rewritten on every `set`; the data
/// is a handful of short strings.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io { path: self.path.clone(), source });
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}

// ─── Favorites ───────────────────────────────────────────────────────────────

/// Most-recent-first list of saved palette entries.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    entries: Vec<PaletteEntry>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Load the saved list from `store`.
    ///
    /// # Errors
    ///
    /// Backend failures. An unparseable stored value is not an error.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let entries = match store.get(FAVORITES_KEY)? {
            None => Vec::new(),
            Some(json) => match serde_json::from_str::<Vec<PaletteEntry>>(&json) {
                Ok(mut entries) => {
                    entries.truncate(MAX_FAVORITES);
                    entries
                }
                Err(err) => {
                    warn!(%err, "ignoring unreadable saved favorites");
                    Vec::new()
                }
            },
        };
        debug!(count = entries.len(), "favorites loaded");
        Ok(Self { store, entries })
    }

    /// Saved entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Save `entry` at the front. An existing entry with the same color is
    /// moved rather than duplicated; the oldest entry falls off past the cap.
    ///
    /// # Errors
    ///
    /// Backend failures while persisting.
    pub fn add(&mut self, entry: PaletteEntry) -> Result<(), StoreError> {
        let mut next: Vec<PaletteEntry> = self
            .entries
            .iter()
            .filter(|e| e.color != entry.color)
            .cloned()
            .collect();
        next.insert(0, entry);
        next.truncate(MAX_FAVORITES);
        self.commit(next)
    }

    /// Remove the entry with `color`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Backend failures while persisting.
    pub fn remove(&mut self, color: Rgb) -> Result<bool, StoreError> {
        let next: Vec<PaletteEntry> =
            self.entries.iter().filter(|e| e.color != color).cloned().collect();
        if next.len() == self.entries.len() {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Drop every saved entry.
    ///
    /// # Errors
    ///
    /// Backend failures while persisting.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new())
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Write `next` to the store and only then adopt it, so a failed write
    /// leaves the in-memory list matching what is stored.
    fn commit(&mut self, next: Vec<PaletteEntry>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&next)?;
        self.store.set(FAVORITES_KEY, &json)?;
        self.entries = next;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(label: &str, hex: &str) -> PaletteEntry {
        PaletteEntry::new(label, Rgb::from_hex(hex).unwrap())
    }

    fn labels<S: KeyValueStore>(favs: &Favorites<S>) -> Vec<&str> {
        favs.entries().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn empty_store_loads_empty() {
        let favs = Favorites::load(MemoryStore::new()).unwrap();
        assert!(favs.entries().is_empty());
    }

    #[test]
    fn add_is_most_recent_first_and_capped() {
        let mut favs = Favorites::load(MemoryStore::new()).unwrap();
        for (i, hex) in ["#111", "#222", "#333", "#444", "#555", "#666"].iter().enumerate() {
            favs.add(entry(&format!("c{i}"), hex)).unwrap();
        }
        assert_eq!(labels(&favs), ["c5", "c4", "c3", "c2", "c1"]);
    }

    #[test]
    fn re_adding_a_color_moves_it_to_front() {
        let mut favs = Favorites::load(MemoryStore::new()).unwrap();
        favs.add(entry("a", "#111")).unwrap();
        favs.add(entry("b", "#222")).unwrap();
        favs.add(entry("again", "#111111")).unwrap();
        assert_eq!(labels(&favs), ["again", "b"]);
    }

    #[test]
    fn persists_across_loads() {
        let mut favs = Favorites::load(MemoryStore::new()).unwrap();
        favs.add(entry("primary", "#FF7A59")).unwrap();
        let store = favs.into_store();

        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(raw, r##"[{"label":"primary","color":"#FF7A59","onColor":"#000000"}]"##);

        let reloaded = Favorites::load(store).unwrap();
        assert_eq!(reloaded.entries(), &[entry("primary", "#FF7A59")]);
    }

    #[test]
    fn corrupt_value_is_treated_as_empty() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        let favs = Favorites::load(store).unwrap();
        assert!(favs.entries().is_empty());
    }

    #[test]
    fn invalid_stored_color_is_treated_as_empty() {
        let mut store = MemoryStore::new();
        store
            .set(FAVORITES_KEY, r##"[{"label":"x","color":"#GGGGGG","onColor":"#000000"}]"##)
            .unwrap();
        assert!(Favorites::load(store).unwrap().entries().is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut favs = Favorites::load(MemoryStore::new()).unwrap();
        favs.add(entry("a", "#111")).unwrap();
        favs.add(entry("b", "#222")).unwrap();
        assert!(favs.remove(Rgb::new(0x11, 0x11, 0x11)).unwrap());
        assert!(!favs.remove(Rgb::new(0x11, 0x11, 0x11)).unwrap());
        assert_eq!(labels(&favs), ["b"]);
        favs.clear().unwrap();
        assert!(favs.entries().is_empty());
        assert_eq!(favs.into_store().get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    /// Accepts reads, fails every write.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("read-only"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn failed_write_keeps_memory_in_sync_with_store() {
        let mut seeded = MemoryStore::new();
        seeded
            .set(FAVORITES_KEY, r##"[{"label":"a","color":"#111111","onColor":"#FFFFFF"}]"##)
            .unwrap();
        let mut favs = Favorites::load(ReadOnlyStore(seeded)).unwrap();
        assert_eq!(labels(&favs), ["a"]);

        assert!(favs.add(entry("b", "#222")).is_err());
        assert_eq!(labels(&favs), ["a"]);

        assert!(favs.remove(Rgb::new(0x11, 0x11, 0x11)).is_err());
        assert_eq!(labels(&favs), ["a"]);

        assert!(favs.clear().is_err());
        assert_eq!(labels(&favs), ["a"]);
    }

    // ── JsonFileStore ───────────────────────────────────────────────

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("swatch-{name}-{}.json", std::process::id()))
    }

    #[test]
    fn file_store_round_trips() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        store.set("other", "w").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("w"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let path = temp_path("corrupt");
        fs::write(&path, "[1, 2").unwrap();
        let err = JsonFileStore::new(&path).get("k").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }), "{err}");
        fs::remove_file(&path).unwrap();
    }
}
