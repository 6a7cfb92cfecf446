//! Persisted label → text-list store.
//!
//! The store is a single JSON object on disk mapping label strings to
//! ordered lists of extracted slide text. Every append is a full
//! read-modify-write: load the mapping (a missing file means an empty
//! store), push one string onto the label's list, and rewrite the whole
//! file pretty-printed. The `&mut self` receiver makes the store
//! single-writer by construction; there is no cross-crash atomicity.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// In-memory shape of the store file: label → ordered text entries.
pub type StoreMap = BTreeMap<String, Vec<String>>;

/// Read a store-shaped JSON file. A missing file yields an empty map.
pub fn read_map(path: &Path) -> Result<StoreMap> {
    if !path.exists() {
        return Ok(StoreMap::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a store-shaped map as pretty-printed UTF-8 JSON.
///
/// Non-ASCII text (e.g. Cyrillic OCR output) is written unescaped.
pub fn write_map(path: &Path, map: &StoreMap) -> Result<()> {
    let json = serde_json::to_string_pretty(map)?;
    fs::write(path, json)?;
    Ok(())
}

/// Incremental text store persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    /// Create a store handle for the given file path.
    ///
    /// The file is not touched until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full mapping from disk. A missing file is an empty store.
    pub fn load(&self) -> Result<StoreMap> {
        read_map(&self.path)
    }

    /// Append one text entry under `label` and rewrite the file.
    ///
    /// Creates the label's list if it does not exist yet. Entries for a
    /// label stay in insertion order.
    pub fn append(&mut self, label: &str, text: &str) -> Result<()> {
        let mut map = self.load()?;
        map.entry(label.to_string())
            .or_default()
            .push(text.to_string());
        write_map(&self.path, &map)?;
        log::debug!(
            "Appended {} chars under '{}' ({} entries)",
            text.len(),
            label,
            map[label].len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> TextStore {
        TextStore::new(dir.path().join("extracted_text.json"))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_to_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("latoken_info", "slide one").unwrap();

        let map = store.load().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["latoken_info"], vec!["slide one"]);
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("l", "first").unwrap();
        store.append("l", "second").unwrap();
        store.append("l", "third").unwrap();

        let map = store.load().unwrap();
        assert_eq!(map["l"], vec!["first", "second", "third"]);
    }

    #[test]
    fn test_second_label_does_not_disturb_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("a", "a1").unwrap();
        store.append("a", "a2").unwrap();
        store.append("b", "b1").unwrap();

        let map = store.load().unwrap();
        assert_eq!(map["a"], vec!["a1", "a2"]);
        assert_eq!(map["b"], vec!["b1"]);
    }

    #[test]
    fn test_round_trip_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("hackathon_info", "Добро пожаловать").unwrap();
        store.append("hackathon_info", "second slide").unwrap();
        store.append("latoken_info", "about page").unwrap();

        let before = store.load().unwrap();
        write_map(store.path(), &before).unwrap();
        let after = store.load().unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_non_ascii_written_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.append("l", "Привет").unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("Привет"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn test_append_resumes_from_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_text.json");

        std::fs::write(&path, r#"{ "l": ["old"] }"#).unwrap();

        let mut store = TextStore::new(&path);
        store.append("l", "new").unwrap();

        assert_eq!(store.load().unwrap()["l"], vec!["old", "new"]);
    }
}
