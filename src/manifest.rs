use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde_json::{Map, Value};

use crate::error::{HashError, Result};

/// One source asset and the hashed copy made from it, both as manifest keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub source: String,
    pub hashed: String,
}

/// Source key to hashed key, in insertion order.
///
/// Built once from the entries a run produced. A repeated source key keeps
/// its first position and takes the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: Map<String, Value>,
}

impl Manifest {
    pub fn from_entries(entries: impl IntoIterator<Item = ManifestEntry>) -> Self {
        let mut map = Map::new();
        for entry in entries {
            if let Some(previous) = map.insert(entry.source.clone(), Value::String(entry.hashed)) {
                warn!(
                    "Manifest key {} produced twice, replacing {}",
                    entry.source, previous
                );
            }
        }
        Self { entries: map }
    }

    /// Number of distinct source keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no asset was hashed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hashed key recorded for a source key.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).and_then(Value::as_str)
    }

    /// `(source, hashed)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
    }

    /// Pretty JSON with two-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).map_err(HashError::ManifestSerialize)
    }

    /// Overwrites `path` with the JSON form of the manifest.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| HashError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote manifest with {} entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Reads a manifest written by [`Manifest::write`], for consumers that
    /// rewrite asset references from it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| HashError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        let entries: Map<String, Value> =
            serde_json::from_str(&text).map_err(HashError::ManifestSerialize)?;
        Ok(Self { entries })
    }
}
