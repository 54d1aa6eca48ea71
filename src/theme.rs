//! Theme preference persistence
//!
//! One process-wide preference with two variants, loaded once at startup
//! and persisted on every toggle. A missing or unreadable stored value
//! falls back to the default without surfacing an error.

use std::fs;
use std::path::PathBuf;

use log::warn;
use serde_json::{Map, Value};

use crate::error::Error;

/// Storage key the theme preference is saved under
pub const THEME_KEY: &str = "theme";

/// Visual theme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Stored string form of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other variant
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_stored(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Durable key-value storage for user preferences
///
/// Only two operations exist: read a string by key and write a string by
/// key. Nothing is ever deleted.
pub trait PreferenceStore {
    /// Read the stored value for `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Preference store backed by a single JSON object file
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Create a store over the given file path; the file is created on
    /// first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>, Error> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::general("preference file is not a JSON object")),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(String::from))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // A corrupt file is replaced rather than kept around as a
        // permanent write failure.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), Value::String(value.to_string()));
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        Ok(())
    }
}

/// Owns the theme lifecycle: load once at startup, persist on toggle
pub struct ThemeManager<S: PreferenceStore> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Load the saved theme from the default key, falling back to the
    /// default variant when the stored value is absent or unreadable
    pub fn load(store: S) -> Self {
        Self::load_with_key(store, THEME_KEY)
    }

    /// Load the saved theme from a custom key
    pub fn load_with_key(store: S, key: &str) -> Self {
        let current = match store.get(key) {
            Ok(Some(value)) => Theme::from_stored(&value).unwrap_or_else(|| {
                warn!("unrecognized stored theme {:?}, using default", value);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("failed to load theme preference: {}", err);
                Theme::default()
            }
        };

        Self {
            store,
            key: key.to_string(),
            current,
        }
    }

    /// The active theme
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip between light and dark and persist the choice
    ///
    /// The in-memory theme changes even when persisting fails; the failure
    /// is logged and the next toggle tries again.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        if let Err(err) = self.store.set(&self.key, self.current.as_str()) {
            warn!("failed to save theme preference: {}", err);
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> FilePreferenceStore {
        FilePreferenceStore::new(dir.path().join("preferences.json"))
    }

    #[test]
    fn defaults_to_dark_when_nothing_is_stored() {
        let dir = tempdir().unwrap();
        let manager = ThemeManager::load(store_in(&dir));
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_across_reload() {
        let dir = tempdir().unwrap();

        let mut manager = ThemeManager::load(store_in(&dir));
        assert_eq!(manager.toggle(), Theme::Light);

        // A fresh load sees the toggled value.
        let reloaded = ThemeManager::load(store_in(&dir));
        assert_eq!(reloaded.current(), Theme::Light);

        let mut manager = ThemeManager::load(store_in(&dir));
        manager.toggle();
        let reloaded = ThemeManager::load(store_in(&dir));
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn unrecognized_stored_value_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set(THEME_KEY, "sepia").unwrap();

        let manager = ThemeManager::load(store);
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn corrupt_preference_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json at all").unwrap();

        let manager = ThemeManager::load(FilePreferenceStore::new(&path));
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn toggle_overwrites_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{ broken").unwrap();

        let mut manager = ThemeManager::load(FilePreferenceStore::new(&path));
        manager.toggle();

        let reloaded = ThemeManager::load(FilePreferenceStore::new(&path));
        assert_eq!(reloaded.current(), Theme::Light);
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set("other", "value").unwrap();
        store.set(THEME_KEY, "light").unwrap();

        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
