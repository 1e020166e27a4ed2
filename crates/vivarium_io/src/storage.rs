//! Key-value settings storage with a JSON envelope.
//!
//! The sandbox persists its settings and pattern collection through an
//! opaque string store. Each value is wrapped in a `{"val": ...}` envelope;
//! a missing key or an unreadable value falls back to a caller-supplied
//! default instead of failing the whole startup.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An opaque string store, keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct Persisted<T> {
    val: T,
}

/// Reads `key` through the envelope, falling back to `default` when the key
/// is absent or its value does not parse.
pub fn load_or<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Some(raw) => match serde_json::from_str::<Persisted<T>>(&raw) {
            Ok(persisted) => persisted.val,
            Err(err) => {
                tracing::warn!(key, %err, "discarding unreadable stored value");
                default()
            }
        },
        None => default(),
    }
}

/// Writes `value` under `key` through the envelope.
pub fn store_value<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(&Persisted { val: value })?;
    store.set(key, raw)
}

/// In-memory backend, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// File backend: one JSON object per store, written through atomically
/// (tmp file, then rename).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, starting empty when the file is missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let entries = if path.exists() {
            let file = File::open(&path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)?
        } else {
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<()> {
        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &self.entries)?;
        }
        std::fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_or_falls_back_on_missing_key() {
        let store = MemoryStore::new();
        let value: u16 = load_or(&store, "grid_size", || 10);
        assert_eq!(value, 10);
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let mut store = MemoryStore::new();
        store_value(&mut store, "grid_size", &14u16).unwrap();
        assert_eq!(store.get("grid_size").unwrap(), r#"{"val":14}"#);
        let value: u16 = load_or(&store, "grid_size", || 10);
        assert_eq!(value, 14);
    }

    #[test]
    fn test_load_or_falls_back_on_garbage() {
        let mut store = MemoryStore::new();
        store.set("wrap_edges", "definitely not json".into()).unwrap();
        let value: bool = load_or(&store, "wrap_edges", || true);
        assert!(value);

        // well-formed JSON without the envelope is also rejected
        store.set("wrap_edges", "false".into()).unwrap();
        let value: bool = load_or(&store, "wrap_edges", || true);
        assert!(value);
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "vivarium_store_{}_{}.json",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store_value(&mut store, "grid_size", &22u16).unwrap();
            store_value(&mut store, "wrap_edges", &false).unwrap();
        }
        {
            let store = JsonFileStore::open(&path).unwrap();
            assert_eq!(load_or(&store, "grid_size", || 0u16), 22);
            assert!(!load_or(&store, "wrap_edges", || true));
        }

        let _ = std::fs::remove_file(&path);
    }
}
