//! Reusable creative library
//!
//! Image and logo URLs plus opaque presets, stored as one JSON document under
//! [`ASSET_LIBRARY_STORE_KEY`]. The library only grows: entries are read and
//! appended, never edited.

use crate::error::Result;
use adplan_llm::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Store key of the library document
pub const ASSET_LIBRARY_STORE_KEY: &str = "adplan_asset_library";

/// Library document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryContents {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub logos: Vec<String>,
    #[serde(default)]
    pub presets: Vec<Value>,
}

/// Asset library over a key-value store
#[derive(Clone)]
pub struct AssetLibrary {
    store: Arc<dyn KeyValueStore>,
}

impl AssetLibrary {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current contents, empty when nothing was saved yet
    pub fn load(&self) -> Result<LibraryContents> {
        match self.store.get_string(ASSET_LIBRARY_STORE_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(LibraryContents::default()),
        }
    }

    fn save(&self, contents: &LibraryContents) -> Result<()> {
        let raw = serde_json::to_string(contents)?;
        self.store.set_string(ASSET_LIBRARY_STORE_KEY, &raw)?;
        Ok(())
    }

    /// Add an image URL; returns false when it is already present
    pub fn add_image(&self, url: &str) -> Result<bool> {
        self.add_url(url, |c| &mut c.images)
    }

    /// Add a logo URL; returns false when it is already present
    pub fn add_logo(&self, url: &str) -> Result<bool> {
        self.add_url(url, |c| &mut c.logos)
    }

    fn add_url<F>(&self, url: &str, list: F) -> Result<bool>
    where
        F: FnOnce(&mut LibraryContents) -> &mut Vec<String>,
    {
        let url = url.trim();
        if url.is_empty() {
            return Ok(false);
        }

        let mut contents = self.load()?;
        let urls = list(&mut contents);
        if urls.iter().any(|u| u == url) {
            return Ok(false);
        }
        urls.push(url.to_string());
        self.save(&contents)?;
        Ok(true)
    }

    /// Append a preset
    pub fn add_preset(&self, preset: Value) -> Result<()> {
        let mut contents = self.load()?;
        contents.presets.push(preset);
        self.save(&contents)
    }

    pub fn images(&self) -> Result<Vec<String>> {
        Ok(self.load()?.images)
    }

    pub fn logos(&self) -> Result<Vec<String>> {
        Ok(self.load()?.logos)
    }

    pub fn presets(&self) -> Result<Vec<Value>> {
        Ok(self.load()?.presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adplan_llm::{InMemoryStore, JsonFileStore};
    use serde_json::json;

    #[test]
    fn test_empty_library() {
        let library = AssetLibrary::new(Arc::new(InMemoryStore::new()));
        assert_eq!(library.load().unwrap(), LibraryContents::default());
    }

    #[test]
    fn test_add_dedupes_urls() {
        let library = AssetLibrary::new(Arc::new(InMemoryStore::new()));

        assert!(library.add_image("https://cdn.example/pool.jpg").unwrap());
        assert!(!library.add_image(" https://cdn.example/pool.jpg ").unwrap());
        assert!(library.add_logo("https://cdn.example/logo.svg").unwrap());
        assert!(!library.add_image("").unwrap());

        assert_eq!(library.images().unwrap(), vec!["https://cdn.example/pool.jpg"]);
        assert_eq!(library.logos().unwrap(), vec!["https://cdn.example/logo.svg"]);
    }

    #[test]
    fn test_presets_persist_in_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let library = AssetLibrary::new(Arc::new(JsonFileStore::new(&path)));
        library.add_preset(json!({ "name": "Summer", "images": 3 })).unwrap();
        library.add_image("https://cdn.example/beach.jpg").unwrap();

        let reopened = AssetLibrary::new(Arc::new(JsonFileStore::new(&path)));
        assert_eq!(reopened.presets().unwrap(), vec![json!({ "name": "Summer", "images": 3 })]);
        assert_eq!(reopened.images().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let store = Arc::new(InMemoryStore::new());
        store.set_string(ASSET_LIBRARY_STORE_KEY, "not json").unwrap();

        let library = AssetLibrary::new(store);
        assert!(library.load().is_err());
    }
}
